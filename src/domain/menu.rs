// ==========================================
// 餐厅 POS 后台 - 菜单领域模型
// ==========================================
// 红线: 菜单价格 ≤ Σ(数量 × 菜品单价)，仅在创建时校验
// ==========================================

use crate::domain::error::DomainError;
use crate::domain::types::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// MenuGroup - 菜单分组
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuGroup {
    name: String,
}

impl NewMenuGroup {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::BlankName("menu_group"));
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ==========================================
// MenuProduct - 菜单行 (菜品 × 数量)
// ==========================================
// 归属: 由所属 Menu 独占，无独立生命周期
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuProduct {
    pub seq: i64,
    pub menu_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

/// 待持久化菜单行（menu_id 在菜单落库后才确定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMenuProduct {
    product_id: i64,
    quantity: i64,
}

impl NewMenuProduct {
    pub fn new(product_id: i64, quantity: i64) -> Result<Self, DomainError> {
        if quantity < 0 {
            return Err(DomainError::InvalidQuantity {
                entity: "menu_product",
                quantity,
            });
        }
        Ok(Self {
            product_id,
            quantity,
        })
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

// ==========================================
// Menu - 菜单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub price: Price,
    pub menu_group_id: i64,
    pub menu_products: Vec<MenuProduct>,
}

/// 待持久化菜单
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenu {
    name: String,
    price: Price,
    menu_group_id: i64,
}

impl NewMenu {
    pub fn new(
        name: impl Into<String>,
        price: Option<Decimal>,
        menu_group_id: i64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: name.into(),
            price: Price::new(price)?,
            menu_group_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn menu_group_id(&self) -> i64 {
        self.menu_group_id
    }

    /// 菜单价格是否超出组成菜品总价
    pub fn exceeds(&self, total: Price) -> bool {
        self.price > total
    }
}

/// 计算菜单行总价: Σ(数量 × 单价)
///
/// # 参数
/// - lines: (菜品单价, 数量) 序列
///
/// # 返回
/// - Err(DomainError::AmountOverflow): 乘积或累加超出 Decimal 表示范围
pub fn sum_of_lines<I>(lines: I) -> Result<Price, DomainError>
where
    I: IntoIterator<Item = (Price, i64)>,
{
    lines
        .into_iter()
        .try_fold(Price::ZERO, |total, (unit_price, quantity)| {
            unit_price
                .checked_mul(quantity)
                .and_then(|line| total.checked_add(line))
                .ok_or(DomainError::AmountOverflow("menu_product"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_price_against_sum() {
        let total =
            sum_of_lines(vec![(Price::from(16000), 1), (Price::from(16000), 1)]).unwrap();
        assert_eq!(total, Price::from(32000));

        let combo = NewMenu::new("双拼套餐", Some(Decimal::from(30000)), 1).unwrap();
        assert!(!combo.exceeds(total));

        let expensive = NewMenu::new("双拼套餐", Some(Decimal::from(33000)), 1).unwrap();
        assert!(expensive.exceeds(total));

        let exact = NewMenu::new("双拼套餐", Some(Decimal::from(32000)), 1).unwrap();
        assert!(!exact.exceeds(total), "价格等于总价是允许的");
    }

    #[test]
    fn test_sum_of_lines_overflow() {
        let max = Price::new(Some(Decimal::from(i64::MAX))).unwrap();
        assert_eq!(
            sum_of_lines(vec![(max, i64::MAX)]),
            Err(DomainError::AmountOverflow("menu_product"))
        );

        let near_max = Price::new(Some(Decimal::MAX)).unwrap();
        assert_eq!(
            sum_of_lines(vec![(near_max, 1), (near_max, 1)]),
            Err(DomainError::AmountOverflow("menu_product"))
        );
        assert_eq!(sum_of_lines(Vec::new()), Ok(Price::ZERO));
    }

    #[test]
    fn test_new_menu_product_quantity() {
        assert!(NewMenuProduct::new(1, 0).is_ok());
        assert!(NewMenuProduct::new(1, -1).is_err());
    }

    #[test]
    fn test_new_menu_group_name() {
        assert!(NewMenuGroup::new("推荐菜单").is_ok());
        assert_eq!(
            NewMenuGroup::new(""),
            Err(DomainError::BlankName("menu_group"))
        );
    }
}
