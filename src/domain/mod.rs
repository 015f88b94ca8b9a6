// ==========================================
// 餐厅 POS 后台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值对象、状态机
// 红线: 不含数据访问逻辑
// 约束: 实体通过校验构造函数创建，非法状态在构造时拒绝
// ==========================================

pub mod error;
pub mod menu;
pub mod order;
pub mod product;
pub mod table;
pub mod types;

// 重导出核心类型
pub use error::DomainError;
pub use menu::{Menu, MenuGroup, MenuProduct, NewMenu, NewMenuGroup, NewMenuProduct};
pub use order::{NewOrder, NewOrderLineItem, Order, OrderLineItem};
pub use product::{NewProduct, Product};
pub use table::{DiningTable, NewDiningTable, TableGroup};
pub use types::{OrderStatus, Price};
