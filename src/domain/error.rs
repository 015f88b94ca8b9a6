// ==========================================
// 餐厅 POS 后台 - 领域层错误类型
// ==========================================
// 职责: 值对象/实体构造校验失败
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::OrderStatus;
use thiserror::Error;

/// 领域构造错误（均为调用方可修正的校验失败）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("价格不能为空或负数: {0}")]
    InvalidPrice(String),

    #[error("名称不能为空: {0}")]
    BlankName(&'static str),

    #[error("数量不合法 ({entity}): {quantity}")]
    InvalidQuantity { entity: &'static str, quantity: i64 },

    #[error("金额计算溢出: {0}")]
    AmountOverflow(&'static str),

    #[error("客人数不能为负数: {0}")]
    NegativeGuestCount(i32),

    #[error("未知的订单状态: {0}")]
    UnknownOrderStatus(String),

    #[error("订单已完成，不能变更状态: order_id={order_id}, requested={requested}")]
    OrderAlreadyCompleted {
        order_id: i64,
        requested: OrderStatus,
    },
}
