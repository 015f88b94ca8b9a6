// ==========================================
// 餐厅 POS 后台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和组件实例
// 说明: 所有仓储共享同一个连接，边界层持有 AppState 调用各组件
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{
    MenuComposer, MenuGroupCatalog, OrderWorkflow, ProductCatalog, TableGroupCoordinator,
    TableManager,
};
use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_in_memory, open_sqlite_connection};
use crate::repository::{
    DiningTableRepository, MenuGroupRepository, MenuProductRepository, MenuRepository,
    OrderLineItemRepository, OrderRepository, ProductRepository, TableGroupRepository,
};

/// 应用状态
///
/// 包含所有业务组件和共享资源
pub struct AppState {
    /// 数据库路径（内存库为 ":memory:"）
    pub db_path: String,

    /// 菜品目录
    pub product_catalog: Arc<ProductCatalog>,

    /// 菜单分组目录
    pub menu_group_catalog: Arc<MenuGroupCatalog>,

    /// 菜单组合
    pub menu_composer: Arc<MenuComposer>,

    /// 餐桌管理
    pub table_manager: Arc<TableManager>,

    /// 桌组协调
    pub table_group_coordinator: Arc<TableGroupCoordinator>,

    /// 订单流程
    pub order_workflow: Arc<OrderWorkflow>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 成功创建（已完成建表）
    /// - Err(String): 创建失败
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;

        Self::from_connection(db_path, Arc::new(Mutex::new(conn)))
    }

    /// 基于内存库创建（测试/演示用）
    pub fn in_memory() -> Result<Self, String> {
        let conn = open_in_memory().map_err(|e| format!("无法打开内存数据库: {}", e))?;
        Self::from_connection(":memory:".to_string(), Arc::new(Mutex::new(conn)))
    }

    /// 基于已建表的共享连接装配所有组件
    pub fn from_connection(db_path: String, conn: Arc<Mutex<Connection>>) -> Result<Self, String> {
        // ==========================================
        // 初始化Repository层
        // ==========================================
        let product_repo = Arc::new(ProductRepository::new(conn.clone()));
        let menu_group_repo = Arc::new(MenuGroupRepository::new(conn.clone()));
        let menu_repo = Arc::new(MenuRepository::new(conn.clone()));
        let menu_product_repo = Arc::new(MenuProductRepository::new(conn.clone()));
        let table_repo = Arc::new(DiningTableRepository::new(conn.clone()));
        let table_group_repo = Arc::new(TableGroupRepository::new(conn.clone()));
        let order_repo = Arc::new(OrderRepository::new(conn.clone()));
        let order_line_item_repo = Arc::new(OrderLineItemRepository::new(conn.clone()));

        // ==========================================
        // 初始化配置
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化业务组件
        // ==========================================
        let product_catalog = Arc::new(ProductCatalog::new(product_repo.clone()));
        let menu_group_catalog = Arc::new(MenuGroupCatalog::new(menu_group_repo.clone()));
        let menu_composer = Arc::new(MenuComposer::new(
            menu_repo.clone(),
            menu_product_repo,
            menu_group_repo,
            product_repo,
        ));
        let table_manager = Arc::new(TableManager::new(table_repo.clone(), order_repo.clone()));
        let order_workflow = Arc::new(OrderWorkflow::new(
            order_repo.clone(),
            order_line_item_repo,
            menu_repo,
            table_repo.clone(),
        ));
        let table_group_coordinator = Arc::new(TableGroupCoordinator::new(
            table_repo,
            table_group_repo,
            order_repo,
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            product_catalog,
            menu_group_catalog,
            menu_composer,
            table_manager,
            table_group_coordinator,
            order_workflow,
            config_manager,
        })
    }
}

/// 获取默认数据库路径
///
/// # 优先级
/// 1. 环境变量 KITCHEN_POS_DB_PATH
/// 2. 用户数据目录下的 kitchen-pos/kitchen_pos.db
/// 3. 当前目录 ./kitchen_pos.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("KITCHEN_POS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./kitchen_pos.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("kitchen-pos-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("kitchen-pos");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("kitchen_pos.db");
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ProductRequest, TableGroupRequest, TableRequest};

    #[test]
    fn test_in_memory_state_wires_components() {
        let state = AppState::in_memory().unwrap();
        assert_eq!(state.db_path, ":memory:");

        state
            .product_catalog
            .create(ProductRequest::new("炸鸡", 16000))
            .unwrap();
        assert_eq!(state.product_catalog.list().unwrap().len(), 1);

        let t1 = state.table_manager.create(TableRequest::empty_table()).unwrap();
        let t2 = state.table_manager.create(TableRequest::empty_table()).unwrap();
        let group = state
            .table_group_coordinator
            .create(TableGroupRequest::new(vec![t1.id, t2.id]))
            .unwrap();
        assert_eq!(group.order_tables.len(), 2);
    }
}
