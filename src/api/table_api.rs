// ==========================================
// 餐厅 POS 后台 - 餐桌管理 API
// ==========================================
// 职责: 餐桌创建、列表、占用状态与客人数变更
// 红线: 已并桌的餐桌不能单独变更占用状态
// 红线: 存在未完成订单（COOKING/MEAL）的餐桌不能变更占用状态
// 红线: 空桌不能设置客人数，客人数不能为负
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::table::{DiningTable, NewDiningTable};
use crate::domain::types::OrderStatus;
use crate::repository::order_repo::OrderStore;
use crate::repository::table_repo::DiningTableStore;

// ==========================================
// TableManager - 餐桌管理
// ==========================================
pub struct TableManager {
    table_store: Arc<dyn DiningTableStore>,
    order_store: Arc<dyn OrderStore>,
}

impl TableManager {
    pub fn new(table_store: Arc<dyn DiningTableStore>, order_store: Arc<dyn OrderStore>) -> Self {
        Self {
            table_store,
            order_store,
        }
    }

    /// 创建餐桌（不属于任何桌组）
    pub fn create(&self, request: TableRequest) -> ApiResult<TableResponse> {
        let table = NewDiningTable::new(request.number_of_guests, request.empty)?;
        let saved = self.table_store.save(&table)?;
        tracing::info!(
            table_id = saved.id,
            number_of_guests = saved.number_of_guests,
            empty = saved.empty,
            "餐桌已创建"
        );
        Ok(TableResponse::from(saved))
    }

    /// 查询全部餐桌
    pub fn list(&self) -> ApiResult<Vec<TableResponse>> {
        let tables = self.table_store.find_all()?;
        Ok(tables.into_iter().map(TableResponse::from).collect())
    }

    /// 变更餐桌占用状态
    ///
    /// # 参数
    /// - table_id: 餐桌ID
    /// - empty: 目标占用状态（仅读取该字段）
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 餐桌不存在
    /// - Err(ApiError::Validation): 已并桌 / 存在未完成订单
    pub fn change_empty(&self, table_id: i64, empty: bool) -> ApiResult<TableResponse> {
        let mut table = self.load(table_id)?;

        if table.is_grouped() {
            tracing::warn!(table_id, table_group_id = ?table.table_group_id, "已并桌餐桌不能变更占用状态");
            return Err(ApiError::validation(format!(
                "餐桌已加入桌组，不能单独变更占用状态: table_id={}",
                table_id
            )));
        }

        if self
            .order_store
            .exists_by_order_table_id_and_order_status_in(table_id, &OrderStatus::ACTIVE)?
        {
            tracing::warn!(table_id, "餐桌存在未完成订单");
            return Err(ApiError::validation(format!(
                "餐桌存在未完成订单，不能变更占用状态: table_id={}",
                table_id
            )));
        }

        table.empty = empty;
        let saved = self.table_store.update(&table)?;
        tracing::info!(table_id, empty, "餐桌占用状态已变更");
        Ok(TableResponse::from(saved))
    }

    /// 变更客人数
    ///
    /// # 返回
    /// - Err(ApiError::Validation): 客人数为负 / 餐桌为空桌
    /// - Err(ApiError::NotFound): 餐桌不存在
    pub fn change_number_of_guests(
        &self,
        table_id: i64,
        number_of_guests: i32,
    ) -> ApiResult<TableResponse> {
        if number_of_guests < 0 {
            return Err(ApiError::validation(format!(
                "客人数不能为负: {}",
                number_of_guests
            )));
        }

        let mut table = self.load(table_id)?;
        if table.empty {
            tracing::warn!(table_id, "空桌不能设置客人数");
            return Err(ApiError::validation(format!(
                "空桌不能设置客人数: table_id={}",
                table_id
            )));
        }

        table.number_of_guests = number_of_guests;
        let saved = self.table_store.update(&table)?;
        tracing::info!(table_id, number_of_guests, "客人数已变更");
        Ok(TableResponse::from(saved))
    }

    fn load(&self, table_id: i64) -> ApiResult<DiningTable> {
        self.table_store
            .find_by_id(table_id)?
            .ok_or_else(|| ApiError::not_found("DiningTable", table_id))
    }
}

// ==========================================
// DTO 类型定义
// ==========================================

/// 餐桌创建请求
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TableRequest {
    pub number_of_guests: i32,
    pub empty: bool,
}

impl TableRequest {
    pub fn new(number_of_guests: i32, empty: bool) -> Self {
        Self {
            number_of_guests,
            empty,
        }
    }

    /// 空桌
    pub fn empty_table() -> Self {
        Self::new(0, true)
    }
}

/// 餐桌信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableResponse {
    pub id: i64,
    pub table_group_id: Option<i64>,
    pub number_of_guests: i32,
    pub empty: bool,
}

impl From<DiningTable> for TableResponse {
    fn from(table: DiningTable) -> Self {
        Self {
            id: table.id,
            table_group_id: table.table_group_id,
            number_of_guests: table.number_of_guests,
            empty: table.empty,
        }
    }
}
