// ==========================================
// 餐厅 POS 后台 - 菜品领域模型
// ==========================================

use crate::domain::error::DomainError;
use crate::domain::types::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Product - 菜品（已持久化）
// ==========================================
// 对齐: product 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Price,
}

// ==========================================
// NewProduct - 待持久化菜品
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    price: Price,
}

impl NewProduct {
    /// 校验并创建待持久化菜品
    ///
    /// # 返回
    /// - Err(DomainError::InvalidPrice): 价格缺失或为负
    /// - Err(DomainError::BlankName): 名称为空
    pub fn new(name: impl Into<String>, price: Option<Decimal>) -> Result<Self, DomainError> {
        let price = Price::new(price)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::BlankName("product"));
        }
        Ok(Self { name, price })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// 绑定生成的 ID
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_validation() {
        assert!(NewProduct::new("炸鸡", Some(Decimal::from(16000))).is_ok());
        assert_eq!(
            NewProduct::new("炸鸡", None),
            Err(DomainError::InvalidPrice("null".to_string()))
        );
        assert!(NewProduct::new("炸鸡", Some(Decimal::from(-1))).is_err());
        assert_eq!(
            NewProduct::new("  ", Some(Decimal::ONE)),
            Err(DomainError::BlankName("product"))
        );
    }
}
