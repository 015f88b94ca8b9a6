// ==========================================
// 餐厅 POS 后台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 菜品/菜单目录、餐桌占用、并桌、订单状态流转
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务组件
pub mod api;

// 应用层 - 组件装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{OrderStatus, Price};

// 领域实体
pub use domain::{
    DiningTable, Menu, MenuGroup, MenuProduct, Order, OrderLineItem, Product, TableGroup,
};

// API
pub use api::{
    ApiError, ApiResult, MenuComposer, MenuGroupCatalog, OrderWorkflow, ProductCatalog,
    TableGroupCoordinator, TableManager,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "餐厅 POS 后台";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
