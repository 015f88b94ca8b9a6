// ==========================================
// 餐厅 POS 后台 - 领域类型定义
// ==========================================
// 职责: 订单状态机、金额值对象
// ==========================================

use crate::domain::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 状态机: COOKING(初始) → MEAL → COMPLETION(终态)
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Cooking,    // 烹饪中
    Meal,       // 用餐中
    Completion, // 已完成
}

impl OrderStatus {
    /// 进行中的订单状态（阻止餐桌状态变更 / 解散桌组）
    pub const ACTIVE: [OrderStatus; 2] = [OrderStatus::Cooking, OrderStatus::Meal];

    /// 是否为进行中订单
    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// 是否为终态（不允许再迁移）
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completion)
    }

    /// 转换为数据库存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OrderStatus::Cooking => "COOKING",
            OrderStatus::Meal => "MEAL",
            OrderStatus::Completion => "COMPLETION",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COOKING" => Ok(OrderStatus::Cooking),
            "MEAL" => Ok(OrderStatus::Meal),
            "COMPLETION" => Ok(OrderStatus::Completion),
            other => Err(DomainError::UnknownOrderStatus(other.to_string())),
        }
    }
}

// ==========================================
// 金额 (Price)
// ==========================================
// 红线: 金额不可缺失、不可为负
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// 校验并创建金额
    ///
    /// # 返回
    /// - Err(DomainError::InvalidPrice): 金额缺失或为负
    pub fn new(value: Option<Decimal>) -> Result<Self, DomainError> {
        match value {
            Some(v) if v >= Decimal::ZERO => Ok(Price(v)),
            Some(v) => Err(DomainError::InvalidPrice(v.to_string())),
            None => Err(DomainError::InvalidPrice("null".to_string())),
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Price::new(Some(value))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl From<u32> for Price {
    fn from(value: u32) -> Self {
        Price(Decimal::from(value))
    }
}

impl Price {
    /// 单价 × 数量，溢出时返回 None
    pub fn checked_mul(self, quantity: i64) -> Option<Price> {
        self.0.checked_mul(Decimal::from(quantity)).map(Price)
    }

    /// 金额相加，溢出时返回 None
    pub fn checked_add(self, other: Price) -> Option<Price> {
        self.0.checked_add(other.0).map(Price)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_missing_and_negative() {
        assert!(Price::new(None).is_err());
        assert!(Price::new(Some(Decimal::from(-1))).is_err());
        assert_eq!(
            Price::new(Some(Decimal::ZERO)).unwrap(),
            Price::ZERO,
            "0 元是合法价格"
        );
    }

    #[test]
    fn test_price_checked_arithmetic() {
        let line = Price::from(16000).checked_mul(2).unwrap();
        assert_eq!(line.value(), Decimal::from(32000));
        assert_eq!(
            line.checked_add(Price::from(16000)).unwrap().value(),
            Decimal::from(48000)
        );

        let huge = Price::new(Some(Decimal::MAX)).unwrap();
        assert_eq!(huge.checked_mul(2), None);
        assert_eq!(huge.checked_add(huge), None);
    }

    #[test]
    fn test_order_status_roundtrip_and_activity() {
        for status in [OrderStatus::Cooking, OrderStatus::Meal, OrderStatus::Completion] {
            assert_eq!(status.to_db_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!(OrderStatus::Cooking.is_active());
        assert!(OrderStatus::Meal.is_active());
        assert!(!OrderStatus::Completion.is_active());
        assert!(OrderStatus::Completion.is_terminal());
        assert!("SERVED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_serde_format() {
        let json = serde_json::to_string(&OrderStatus::Completion).unwrap();
        assert_eq!(json, "\"COMPLETION\"");
    }
}
