// ==========================================
// 餐厅 POS 后台 - 订单领域模型
// ==========================================
// 状态机: COOKING → MEAL → COMPLETION
// 红线: COMPLETION 为终态，不允许任何迁移
// ==========================================

use crate::domain::error::DomainError;
use crate::domain::types::OrderStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 订单
// ==========================================
// 对齐: orders 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_table_id: i64,          // 创建后不可变
    pub order_status: OrderStatus,
    pub ordered_time: NaiveDateTime,  // 创建后不可变
    pub order_line_items: Vec<OrderLineItem>,
}

impl Order {
    /// 变更订单状态
    ///
    /// # 返回
    /// - Err(DomainError::OrderAlreadyCompleted): 当前状态为终态
    pub fn change_status(&mut self, new_status: OrderStatus) -> Result<(), DomainError> {
        if self.order_status.is_terminal() {
            return Err(DomainError::OrderAlreadyCompleted {
                order_id: self.id,
                requested: new_status,
            });
        }
        self.order_status = new_status;
        Ok(())
    }
}

/// 待持久化订单（状态固定为 COOKING）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    order_table_id: i64,
    ordered_time: NaiveDateTime,
}

impl NewOrder {
    pub fn new(order_table_id: i64, ordered_time: NaiveDateTime) -> Self {
        Self {
            order_table_id,
            ordered_time,
        }
    }

    pub fn order_table_id(&self) -> i64 {
        self.order_table_id
    }

    pub fn order_status(&self) -> OrderStatus {
        OrderStatus::Cooking
    }

    pub fn ordered_time(&self) -> NaiveDateTime {
        self.ordered_time
    }

    pub fn into_order(self, id: i64) -> Order {
        Order {
            id,
            order_table_id: self.order_table_id,
            order_status: OrderStatus::Cooking,
            ordered_time: self.ordered_time,
            order_line_items: Vec::new(),
        }
    }
}

// ==========================================
// OrderLineItem - 订单行 (菜单 × 数量)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub seq: i64,
    pub order_id: i64,
    pub menu_id: i64,
    pub quantity: i64,
}

/// 待持久化订单行（order_id 在订单落库后才确定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLineItem {
    menu_id: i64,
    quantity: i64,
}

impl NewOrderLineItem {
    pub fn new(menu_id: i64, quantity: i64) -> Result<Self, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantity {
                entity: "order_line_item",
                quantity,
            });
        }
        Ok(Self { menu_id, quantity })
    }

    pub fn menu_id(&self) -> i64 {
        self.menu_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(status: OrderStatus) -> Order {
        let ordered_time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Order {
            id: 1,
            order_table_id: 9,
            order_status: status,
            ordered_time,
            order_line_items: Vec::new(),
        }
    }

    #[test]
    fn test_forward_transitions() {
        let mut o = order(OrderStatus::Cooking);
        assert!(o.change_status(OrderStatus::Meal).is_ok());
        assert!(o.change_status(OrderStatus::Completion).is_ok());
        assert_eq!(o.order_status, OrderStatus::Completion);
    }

    #[test]
    fn test_completion_is_terminal_for_every_target() {
        for target in [OrderStatus::Cooking, OrderStatus::Meal, OrderStatus::Completion] {
            let mut o = order(OrderStatus::Completion);
            assert!(matches!(
                o.change_status(target),
                Err(DomainError::OrderAlreadyCompleted { .. })
            ));
            assert_eq!(o.order_status, OrderStatus::Completion);
        }
    }

    #[test]
    fn test_new_order_line_item_requires_positive_quantity() {
        assert!(NewOrderLineItem::new(1, 1).is_ok());
        assert!(NewOrderLineItem::new(1, 0).is_err());
        assert!(NewOrderLineItem::new(1, -3).is_err());
    }
}
