// ==========================================
// 餐厅 POS 后台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供按实体拆分的数据访问接口 (XxxStore trait)，屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// 约束: 每次调用为单条语句，多步流程的原子性由调用方的事务范围决定
// ==========================================

pub mod error;
pub mod menu_group_repo;
pub mod menu_repo;
pub mod order_repo;
pub mod product_repo;
pub mod sql_utils;
pub mod table_group_repo;
pub mod table_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use menu_group_repo::{MenuGroupRepository, MenuGroupStore};
pub use menu_repo::{MenuProductRepository, MenuProductStore, MenuRepository, MenuStore};
pub use order_repo::{OrderLineItemRepository, OrderLineItemStore, OrderRepository, OrderStore};
pub use product_repo::{ProductRepository, ProductStore};
pub use table_group_repo::{TableGroupRepository, TableGroupStore};
pub use table_repo::{DiningTableRepository, DiningTableStore};
