// ==========================================
// 餐厅 POS 后台 - 菜单组合 API
// ==========================================
// 职责: 菜单创建（含菜单行）、菜单列表
// 红线: 菜单价格 ≤ Σ(数量 × 当前菜品单价)
// 说明: 仅在创建时按当时的菜品价格校验，菜品调价后不回溯
// ==========================================

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::menu::{sum_of_lines, Menu, MenuProduct, NewMenu, NewMenuProduct};
use crate::domain::types::Price;
use crate::repository::menu_group_repo::MenuGroupStore;
use crate::repository::menu_repo::{MenuProductStore, MenuStore};
use crate::repository::product_repo::ProductStore;

// ==========================================
// MenuComposer - 菜单组合
// ==========================================

/// 菜单组合API
///
/// 依赖：
/// 1. ProductStore: 菜品存在性与单价
/// 2. MenuGroupStore: 分组存在性
/// 3. MenuStore / MenuProductStore: 菜单头与菜单行落库
pub struct MenuComposer {
    menu_store: Arc<dyn MenuStore>,
    menu_product_store: Arc<dyn MenuProductStore>,
    menu_group_store: Arc<dyn MenuGroupStore>,
    product_store: Arc<dyn ProductStore>,
}

impl MenuComposer {
    pub fn new(
        menu_store: Arc<dyn MenuStore>,
        menu_product_store: Arc<dyn MenuProductStore>,
        menu_group_store: Arc<dyn MenuGroupStore>,
        product_store: Arc<dyn ProductStore>,
    ) -> Self {
        Self {
            menu_store,
            menu_product_store,
            menu_group_store,
            product_store,
        }
    }

    /// 创建菜单
    ///
    /// # 校验顺序
    /// 1. 价格缺失或为负
    /// 2. 菜单分组不存在
    /// 3. 菜单行为空 / 菜品不存在
    /// 4. 菜品总价溢出 / 价格超过组成菜品总价
    ///
    /// # 返回
    /// - Ok(MenuResponse): 菜单及其菜单行（均带生成ID）
    /// - Err(ApiError::Validation): 任一校验失败，此时不落库
    pub fn create(&self, request: MenuRequest) -> ApiResult<MenuResponse> {
        let menu = NewMenu::new(request.name, request.price, request.menu_group_id)?;

        if !self.menu_group_store.exists_by_id(menu.menu_group_id())? {
            tracing::warn!(menu_group_id = menu.menu_group_id(), "菜单分组不存在");
            return Err(ApiError::validation(format!(
                "菜单分组不存在: menu_group_id={}",
                menu.menu_group_id()
            )));
        }

        if request.menu_products.is_empty() {
            return Err(ApiError::validation("菜单至少需要一个菜品"));
        }

        let mut lines = Vec::with_capacity(request.menu_products.len());
        let mut priced = Vec::with_capacity(request.menu_products.len());
        for line in &request.menu_products {
            let line = NewMenuProduct::new(line.product_id, line.quantity)?;
            let product = self
                .product_store
                .find_by_id(line.product_id())?
                .ok_or_else(|| {
                    tracing::warn!(product_id = line.product_id(), "菜单引用的菜品不存在");
                    ApiError::validation(format!("菜品不存在: product_id={}", line.product_id()))
                })?;
            priced.push((product.price, line.quantity()));
            lines.push(line);
        }

        let total: Price = sum_of_lines(priced).map_err(|e| {
            tracing::warn!(error = %e, "菜单行总价计算溢出");
            ApiError::from(e)
        })?;
        if menu.exceeds(total) {
            tracing::warn!(price = %menu.price(), total = %total, "菜单价格超过菜品总价");
            return Err(ApiError::validation(format!(
                "菜单价格({})不能超过菜品总价({})",
                menu.price(),
                total
            )));
        }

        let mut saved = self.menu_store.save(&menu)?;
        for line in &lines {
            let saved_line = self.menu_product_store.save(saved.id, line)?;
            saved.menu_products.push(saved_line);
        }

        tracing::info!(
            menu_id = saved.id,
            name = %saved.name,
            price = %saved.price,
            lines = saved.menu_products.len(),
            "菜单已创建"
        );
        Ok(MenuResponse::from(saved))
    }

    /// 查询全部菜单（逐个装配菜单行）
    pub fn list(&self) -> ApiResult<Vec<MenuResponse>> {
        let menus = self.menu_store.find_all()?;
        let mut result = Vec::with_capacity(menus.len());
        for mut menu in menus {
            menu.menu_products = self.menu_product_store.find_all_by_menu_id(menu.id)?;
            result.push(MenuResponse::from(menu));
        }
        Ok(result)
    }
}

// ==========================================
// DTO 类型定义
// ==========================================

/// 菜单创建请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuRequest {
    pub name: String,
    pub price: Option<Decimal>,
    pub menu_group_id: i64,
    pub menu_products: Vec<MenuProductRequest>,
}

/// 菜单行请求
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MenuProductRequest {
    pub product_id: i64,
    pub quantity: i64,
}

impl MenuProductRequest {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// 菜单信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuResponse {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub menu_group_id: i64,
    pub menu_products: Vec<MenuProductResponse>,
}

/// 菜单行信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuProductResponse {
    pub seq: i64,
    pub menu_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

impl From<Menu> for MenuResponse {
    fn from(menu: Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            price: menu.price.value(),
            menu_group_id: menu.menu_group_id,
            menu_products: menu
                .menu_products
                .into_iter()
                .map(MenuProductResponse::from)
                .collect(),
        }
    }
}

impl From<MenuProduct> for MenuProductResponse {
    fn from(line: MenuProduct) -> Self {
        Self {
            seq: line.seq,
            menu_id: line.menu_id,
            product_id: line.product_id,
            quantity: line.quantity,
        }
    }
}
