// ==========================================
// 餐厅 POS 后台 - 桌组协调 API
// ==========================================
// 职责: 并桌、解散桌组、查询桌组
// 红线: 并桌至少需要2张餐桌
// 红线: 只有空桌且未并桌的餐桌可以加入新桌组
// 红线: 任一成员存在未完成订单时不能解散
// 说明: 解散只清除成员的桌组ID，不修改占用标志，桌组记录保留
// ==========================================

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::table_api::TableResponse;
use crate::domain::table::TableGroup;
use crate::domain::types::OrderStatus;
use crate::repository::order_repo::OrderStore;
use crate::repository::table_group_repo::TableGroupStore;
use crate::repository::table_repo::DiningTableStore;

/// 并桌所需的最少餐桌数
pub const MIN_GROUP_SIZE: usize = 2;

// ==========================================
// TableGroupCoordinator - 桌组协调
// ==========================================
pub struct TableGroupCoordinator {
    table_store: Arc<dyn DiningTableStore>,
    table_group_store: Arc<dyn TableGroupStore>,
    order_store: Arc<dyn OrderStore>,
}

impl TableGroupCoordinator {
    pub fn new(
        table_store: Arc<dyn DiningTableStore>,
        table_group_store: Arc<dyn TableGroupStore>,
        order_store: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            table_store,
            table_group_store,
            order_store,
        }
    }

    /// 并桌
    ///
    /// # 校验顺序
    /// 1. 餐桌ID不足2个
    /// 2. 存在无法解析的餐桌ID（解析数量 < 请求数量）
    /// 3. 存在非空桌或已并桌的餐桌
    ///
    /// # 返回
    /// - Ok(TableGroupResponse): 新桌组，成员均已绑定桌组ID且标记为占用
    pub fn create(&self, request: TableGroupRequest) -> ApiResult<TableGroupResponse> {
        let requested = request.order_table_ids;
        if requested.len() < MIN_GROUP_SIZE {
            tracing::warn!(requested = requested.len(), "并桌餐桌数不足");
            return Err(ApiError::validation(format!(
                "并桌至少需要{}张餐桌，实际{}张",
                MIN_GROUP_SIZE,
                requested.len()
            )));
        }

        let mut tables = self.table_store.find_all_by_id_in(&requested)?;
        if tables.len() != requested.len() {
            let found: HashSet<i64> = tables.iter().map(|t| t.id).collect();
            let missing: Vec<i64> = requested
                .iter()
                .copied()
                .filter(|id| !found.contains(id))
                .collect();
            tracing::warn!(?requested, ?missing, "并桌餐桌解析不完整");
            return Err(ApiError::validation(format!(
                "餐桌不存在或重复: requested={:?}, missing={:?}",
                requested, missing
            )));
        }

        if let Some(table) = tables.iter().find(|t| !t.is_groupable()) {
            tracing::warn!(
                table_id = table.id,
                empty = table.empty,
                table_group_id = ?table.table_group_id,
                "餐桌不可并桌"
            );
            return Err(ApiError::validation(format!(
                "只有未并桌的空桌可以并桌: table_id={}",
                table.id
            )));
        }

        let mut group = self.table_group_store.save(now())?;
        for table in tables.iter_mut() {
            table.join_group(group.id);
            self.table_store.update(table)?;
        }
        group.order_tables = tables;

        tracing::info!(
            table_group_id = group.id,
            table_ids = ?group.order_tables.iter().map(|t| t.id).collect::<Vec<_>>(),
            "桌组已创建"
        );
        Ok(TableGroupResponse::from(group))
    }

    /// 解散桌组
    ///
    /// # 说明
    /// - 成员的占用标志保持不变
    /// - 没有成员的桌组解散为空操作
    pub fn ungroup(&self, table_group_id: i64) -> ApiResult<()> {
        let members = self.table_store.find_all_by_table_group_id(table_group_id)?;
        let member_ids: Vec<i64> = members.iter().map(|t| t.id).collect();

        if self
            .order_store
            .exists_by_order_table_id_in_and_order_status_in(&member_ids, &OrderStatus::ACTIVE)?
        {
            tracing::warn!(table_group_id, ?member_ids, "桌组成员存在未完成订单");
            return Err(ApiError::validation(format!(
                "桌组成员存在未完成订单，不能解散: table_group_id={}",
                table_group_id
            )));
        }

        for mut table in members {
            table.leave_group();
            self.table_store.update(&table)?;
        }

        tracing::info!(table_group_id, ?member_ids, "桌组已解散");
        Ok(())
    }

    /// 查询桌组（装配当前成员）
    pub fn find(&self, table_group_id: i64) -> ApiResult<TableGroupResponse> {
        let mut group = self
            .table_group_store
            .find_by_id(table_group_id)?
            .ok_or_else(|| ApiError::not_found("TableGroup", table_group_id))?;
        group.order_tables = self.table_store.find_all_by_table_group_id(table_group_id)?;
        Ok(TableGroupResponse::from(group))
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// ==========================================
// DTO 类型定义
// ==========================================

/// 并桌请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableGroupRequest {
    pub order_table_ids: Vec<i64>,
}

impl TableGroupRequest {
    pub fn new(order_table_ids: impl Into<Vec<i64>>) -> Self {
        Self {
            order_table_ids: order_table_ids.into(),
        }
    }
}

/// 桌组信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGroupResponse {
    pub id: i64,
    pub created_date: NaiveDateTime,
    pub order_tables: Vec<TableResponse>,
}

impl From<TableGroup> for TableGroupResponse {
    fn from(group: TableGroup) -> Self {
        Self {
            id: group.id,
            created_date: group.created_date,
            order_tables: group
                .order_tables
                .into_iter()
                .map(TableResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::domain::table::NewDiningTable;
    use crate::repository::{DiningTableRepository, OrderRepository, TableGroupRepository};
    use std::sync::Mutex;

    struct Fixture {
        coordinator: TableGroupCoordinator,
        tables: Arc<DiningTableRepository>,
    }

    fn fixture() -> Fixture {
        let conn = Arc::new(Mutex::new(open_in_memory().unwrap()));
        let tables = Arc::new(DiningTableRepository::new(conn.clone()));
        let coordinator = TableGroupCoordinator::new(
            tables.clone(),
            Arc::new(TableGroupRepository::new(conn.clone())),
            Arc::new(OrderRepository::new(conn)),
        );
        Fixture {
            coordinator,
            tables,
        }
    }

    fn table(f: &Fixture, empty: bool) -> i64 {
        f.tables
            .save(&NewDiningTable::new(0, empty).unwrap())
            .unwrap()
            .id
    }

    #[test]
    fn test_create_requires_two_tables() {
        let f = fixture();
        let t1 = table(&f, true);
        assert!(f
            .coordinator
            .create(TableGroupRequest::new(vec![t1]))
            .unwrap_err()
            .is_validation());

        let t2 = table(&f, true);
        let group = f
            .coordinator
            .create(TableGroupRequest::new(vec![t1, t2]))
            .unwrap();
        assert_eq!(group.order_tables.len(), MIN_GROUP_SIZE);
    }

    #[test]
    fn test_create_marks_members_occupied() {
        let f = fixture();
        let t1 = table(&f, true);
        let t2 = table(&f, true);

        let group = f
            .coordinator
            .create(TableGroupRequest::new(vec![t1, t2]))
            .unwrap();
        assert_eq!(group.order_tables.len(), 2);
        for member in &group.order_tables {
            assert_eq!(member.table_group_id, Some(group.id));
            assert!(!member.empty);
        }
        assert_eq!(f.coordinator.find(group.id).unwrap(), group);
    }

    #[test]
    fn test_create_rejects_duplicate_ids() {
        let f = fixture();
        let t1 = table(&f, true);
        let err = f
            .coordinator
            .create(TableGroupRequest::new(vec![t1, t1]))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_rejects_occupied_table() {
        let f = fixture();
        let t1 = table(&f, true);
        let t2 = table(&f, false);
        assert!(f
            .coordinator
            .create(TableGroupRequest::new(vec![t1, t2]))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_ungroup_keeps_occupancy() {
        let f = fixture();
        let t1 = table(&f, true);
        let t2 = table(&f, true);
        let group = f
            .coordinator
            .create(TableGroupRequest::new(vec![t1, t2]))
            .unwrap();

        f.coordinator.ungroup(group.id).unwrap();

        let found = f.coordinator.find(group.id).unwrap();
        assert!(found.order_tables.is_empty());
        for id in [t1, t2] {
            let t = f.tables.find_by_id(id).unwrap().unwrap();
            assert_eq!(t.table_group_id, None);
            assert!(!t.empty);
        }
    }

    #[test]
    fn test_find_unknown_group_is_not_found() {
        assert!(fixture().coordinator.find(42).unwrap_err().is_not_found());
    }
}
