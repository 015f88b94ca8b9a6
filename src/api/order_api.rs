// ==========================================
// 餐厅 POS 后台 - 订单流程 API
// ==========================================
// 状态机: COOKING(初始) → MEAL → COMPLETION(终态)
// 职责: 下单、订单列表、订单状态变更
// 红线: 订单行不能为空，菜单必须全部存在且不重复
// 红线: 订单只能下到存在且非空的餐桌
// 红线: COMPLETION 之后不允许任何状态迁移
// ==========================================

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::{NewOrder, NewOrderLineItem, Order, OrderLineItem};
use crate::domain::types::OrderStatus;
use crate::repository::menu_repo::MenuStore;
use crate::repository::order_repo::{OrderLineItemStore, OrderStore};
use crate::repository::table_repo::DiningTableStore;

// ==========================================
// OrderWorkflow - 订单流程
// ==========================================
pub struct OrderWorkflow {
    order_store: Arc<dyn OrderStore>,
    order_line_item_store: Arc<dyn OrderLineItemStore>,
    menu_store: Arc<dyn MenuStore>,
    table_store: Arc<dyn DiningTableStore>,
}

impl OrderWorkflow {
    pub fn new(
        order_store: Arc<dyn OrderStore>,
        order_line_item_store: Arc<dyn OrderLineItemStore>,
        menu_store: Arc<dyn MenuStore>,
        table_store: Arc<dyn DiningTableStore>,
    ) -> Self {
        Self {
            order_store,
            order_line_item_store,
            menu_store,
            table_store,
        }
    }

    /// 下单
    ///
    /// # 校验顺序
    /// 1. 订单行缺失或为空
    /// 2. 订单行数量必须为正
    /// 3. 存在的菜单数 ≠ 订单行数（不存在与重复的菜单ID一并拒绝）
    /// 4. 餐桌不存在 / 餐桌为空桌
    ///
    /// # 返回
    /// - Ok(OrderResponse): 状态为 COOKING、带订单行的订单
    pub fn create(&self, request: OrderRequest) -> ApiResult<OrderResponse> {
        let requested = match request.order_line_items {
            Some(lines) if !lines.is_empty() => lines,
            _ => {
                tracing::warn!(order_table_id = request.order_table_id, "订单行为空");
                return Err(ApiError::validation("订单至少需要一个订单行"));
            }
        };

        let lines = requested
            .iter()
            .map(|line| NewOrderLineItem::new(line.menu_id, line.quantity))
            .collect::<Result<Vec<_>, _>>()?;

        let menu_ids: Vec<i64> = lines.iter().map(|line| line.menu_id()).collect();
        let existing = self.menu_store.count_by_id_in(&menu_ids)?;
        if existing != menu_ids.len() {
            tracing::warn!(?menu_ids, existing, "订单引用的菜单不存在或重复");
            return Err(ApiError::validation(format!(
                "菜单不存在或重复: menu_ids={:?}",
                menu_ids
            )));
        }

        let table = self
            .table_store
            .find_by_id(request.order_table_id)?
            .ok_or_else(|| {
                tracing::warn!(order_table_id = request.order_table_id, "下单餐桌不存在");
                ApiError::validation(format!(
                    "餐桌不存在: order_table_id={}",
                    request.order_table_id
                ))
            })?;
        if table.empty {
            tracing::warn!(order_table_id = table.id, "空桌不能下单");
            return Err(ApiError::validation(format!(
                "空桌不能下单: order_table_id={}",
                table.id
            )));
        }

        let mut order = self.order_store.save(&NewOrder::new(table.id, now()))?;
        for line in &lines {
            let saved = self.order_line_item_store.save(order.id, line)?;
            order.order_line_items.push(saved);
        }

        tracing::info!(
            order_id = order.id,
            order_table_id = order.order_table_id,
            lines = order.order_line_items.len(),
            "订单已创建"
        );
        Ok(OrderResponse::from(order))
    }

    /// 查询全部订单（逐个装配订单行）
    pub fn list(&self) -> ApiResult<Vec<OrderResponse>> {
        let orders = self.order_store.find_all()?;
        let mut result = Vec::with_capacity(orders.len());
        for mut order in orders {
            order.order_line_items = self.order_line_item_store.find_all_by_order_id(order.id)?;
            result.push(OrderResponse::from(order));
        }
        Ok(result)
    }

    /// 变更订单状态
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 订单不存在
    /// - Err(ApiError::Validation): 当前状态为 COMPLETION
    pub fn change_order_status(
        &self,
        order_id: i64,
        order_status: OrderStatus,
    ) -> ApiResult<OrderResponse> {
        let mut order = self
            .order_store
            .find_by_id(order_id)?
            .ok_or_else(|| ApiError::not_found("Order", order_id))?;

        let previous = order.order_status;
        order.change_status(order_status).map_err(|e| {
            tracing::warn!(order_id, from = %previous, to = %order_status, "订单已完成，拒绝状态变更");
            e
        })?;

        self.order_store.update_status(order.id, order.order_status)?;
        order.order_line_items = self.order_line_item_store.find_all_by_order_id(order.id)?;

        tracing::info!(order_id, from = %previous, to = %order.order_status, "订单状态已变更");
        Ok(OrderResponse::from(order))
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// ==========================================
// DTO 类型定义
// ==========================================

/// 下单请求
///
/// order_line_items 为 None 与空列表同样被拒绝
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_table_id: i64,
    pub order_line_items: Option<Vec<OrderLineRequest>>,
}

impl OrderRequest {
    pub fn new(order_table_id: i64, order_line_items: Vec<OrderLineRequest>) -> Self {
        Self {
            order_table_id,
            order_line_items: Some(order_line_items),
        }
    }
}

/// 订单行请求
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub menu_id: i64,
    pub quantity: i64,
}

impl OrderLineRequest {
    pub fn new(menu_id: i64, quantity: i64) -> Self {
        Self { menu_id, quantity }
    }
}

/// 订单信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i64,
    pub order_table_id: i64,
    pub order_status: OrderStatus,
    pub ordered_time: NaiveDateTime,
    pub order_line_items: Vec<OrderLineResponse>,
}

/// 订单行信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub seq: i64,
    pub order_id: i64,
    pub menu_id: i64,
    pub quantity: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_table_id: order.order_table_id,
            order_status: order.order_status,
            ordered_time: order.ordered_time,
            order_line_items: order
                .order_line_items
                .into_iter()
                .map(OrderLineResponse::from)
                .collect(),
        }
    }
}

impl From<OrderLineItem> for OrderLineResponse {
    fn from(line: OrderLineItem) -> Self {
        Self {
            seq: line.seq,
            order_id: line.order_id,
            menu_id: line.menu_id,
            quantity: line.quantity,
        }
    }
}
