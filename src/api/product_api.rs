// ==========================================
// 餐厅 POS 后台 - 菜品目录 API
// ==========================================
// 职责: 菜品创建、查询
// 红线: 价格不可缺失、不可为负
// ==========================================

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::domain::product::{NewProduct, Product};
use crate::repository::product_repo::ProductStore;

// ==========================================
// ProductCatalog - 菜品目录
// ==========================================
pub struct ProductCatalog {
    product_store: Arc<dyn ProductStore>,
}

impl ProductCatalog {
    pub fn new(product_store: Arc<dyn ProductStore>) -> Self {
        Self { product_store }
    }

    /// 创建菜品
    ///
    /// # 返回
    /// - Ok(ProductResponse): 带生成ID的菜品
    /// - Err(ApiError::Validation): 价格缺失或为负 / 名称为空
    pub fn create(&self, request: ProductRequest) -> ApiResult<ProductResponse> {
        let product = NewProduct::new(request.name, request.price).map_err(|e| {
            tracing::warn!(error = %e, "菜品创建被拒绝");
            e
        })?;

        let saved = self.product_store.save(&product)?;
        tracing::info!(product_id = saved.id, name = %saved.name, price = %saved.price, "菜品已创建");
        Ok(ProductResponse::from(saved))
    }

    /// 查询全部菜品
    pub fn list(&self) -> ApiResult<Vec<ProductResponse>> {
        let products = self.product_store.find_all()?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

// ==========================================
// DTO 类型定义
// ==========================================

/// 菜品创建请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: Option<Decimal>,
}

impl ProductRequest {
    pub fn new(name: impl Into<String>, price: impl Into<Decimal>) -> Self {
        Self {
            name: name.into(),
            price: Some(price.into()),
        }
    }
}

/// 菜品信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price.value(),
        }
    }
}
