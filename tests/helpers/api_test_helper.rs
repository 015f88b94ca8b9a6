// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use tempfile::NamedTempFile;

pub use kitchen_pos::api::*;
pub use kitchen_pos::OrderStatus;

use kitchen_pos::app::AppState;
use kitchen_pos::config::ConfigManager;
use kitchen_pos::db::open_sqlite_connection;
use kitchen_pos::repository::{
    DiningTableRepository, DiningTableStore, OrderRepository, OrderStore,
};
use kitchen_pos::{logging, DiningTable};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有业务组件，以及用于数据准备/断言的仓储
pub struct ApiTestEnv {
    pub db_path: String,
    pub product_catalog: Arc<ProductCatalog>,
    pub menu_group_catalog: Arc<MenuGroupCatalog>,
    pub menu_composer: Arc<MenuComposer>,
    pub table_manager: Arc<TableManager>,
    pub table_group_coordinator: Arc<TableGroupCoordinator>,
    pub order_workflow: Arc<OrderWorkflow>,
    pub config_manager: Arc<ConfigManager>,

    // Repository层（用于断言持久化结果）
    pub table_repo: Arc<DiningTableRepository>,
    pub order_repo: Arc<OrderRepository>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境
    ///
    /// # 说明
    /// - 使用临时数据库文件
    /// - 初始化所有Repository和业务组件
    pub fn new() -> Result<Self, String> {
        Self::with_config(&[])
    }

    /// 先写入配置再装配组件
    pub fn with_config(entries: &[(&str, &str)]) -> Result<Self, String> {
        logging::init_test();

        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        if !entries.is_empty() {
            let config = ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?;
            for (key, value) in entries {
                config
                    .set_config_value(key, value)
                    .map_err(|e| format!("写入配置失败: {}", e))?;
            }
        }

        let table_repo = Arc::new(DiningTableRepository::new(conn.clone()));
        let order_repo = Arc::new(OrderRepository::new(conn.clone()));
        let state = AppState::from_connection(db_path.clone(), conn)?;

        Ok(Self {
            db_path,
            product_catalog: state.product_catalog,
            menu_group_catalog: state.menu_group_catalog,
            menu_composer: state.menu_composer,
            table_manager: state.table_manager,
            table_group_coordinator: state.table_group_coordinator,
            order_workflow: state.order_workflow,
            config_manager: state.config_manager,
            table_repo,
            order_repo,
            _temp_file: temp_file,
        })
    }

    // ==========================================
    // 数据准备
    // ==========================================

    pub fn create_product(&self, name: &str, price: i64) -> ProductResponse {
        self.product_catalog
            .create(ProductRequest::new(name, price))
            .expect("创建菜品失败")
    }

    pub fn create_menu_group(&self, name: &str) -> MenuGroupResponse {
        self.menu_group_catalog
            .create(MenuGroupRequest::new(name))
            .expect("创建菜单分组失败")
    }

    /// 菜单请求（价格与菜单行由调用方指定）
    pub fn menu_request(
        &self,
        price: i64,
        menu_group_id: i64,
        lines: &[(i64, i64)],
    ) -> MenuRequest {
        MenuRequest {
            name: "双拼套餐".to_string(),
            price: Some(Decimal::from(price)),
            menu_group_id,
            menu_products: lines
                .iter()
                .map(|(product_id, quantity)| MenuProductRequest::new(*product_id, *quantity))
                .collect(),
        }
    }

    /// 创建一个可直接下单的菜单（16000 × 2 的双拼，定价 30000）
    pub fn create_combo_menu(&self) -> MenuResponse {
        let fried = self.create_product("原味炸鸡", 16000);
        let seasoned = self.create_product("调味炸鸡", 16000);
        let group = self.create_menu_group("双拼菜单");
        self.menu_composer
            .create(self.menu_request(30000, group.id, &[(fried.id, 1), (seasoned.id, 1)]))
            .expect("创建菜单失败")
    }

    pub fn create_empty_table(&self) -> TableResponse {
        self.table_manager
            .create(TableRequest::empty_table())
            .expect("创建餐桌失败")
    }

    pub fn create_seated_table(&self, number_of_guests: i32) -> TableResponse {
        self.table_manager
            .create(TableRequest::new(number_of_guests, false))
            .expect("创建餐桌失败")
    }

    /// 在指定餐桌下单（单行，数量1）
    pub fn place_order(&self, order_table_id: i64, menu_id: i64) -> OrderResponse {
        self.order_workflow
            .create(OrderRequest::new(
                order_table_id,
                vec![OrderLineRequest::new(menu_id, 1)],
            ))
            .expect("下单失败")
    }

    // ==========================================
    // 持久化断言
    // ==========================================

    /// 直接从仓储读取餐桌（绕过组件）
    pub fn find_table(&self, id: i64) -> DiningTable {
        self.table_repo
            .find_by_id(id)
            .expect("查询失败")
            .expect("餐桌应存在")
    }

    /// 直接从仓储读取订单状态
    pub fn find_order_status(&self, id: i64) -> OrderStatus {
        self.order_repo
            .find_by_id(id)
            .expect("查询失败")
            .expect("订单应存在")
            .order_status
    }
}
