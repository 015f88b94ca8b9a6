// ==========================================
// 餐厅 POS 后台 - API 层
// ==========================================
// 职责: 六个业务组件，接收已校验输入结构，返回输出结构或类型化失败
// 依赖顺序: ProductCatalog, MenuGroupCatalog → MenuComposer;
//           TableManager → OrderWorkflow → TableGroupCoordinator
// ==========================================

pub mod error;
pub mod menu_api;
pub mod menu_group_api;
pub mod order_api;
pub mod product_api;
pub mod table_api;
pub mod table_group_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use menu_api::{MenuComposer, MenuProductRequest, MenuProductResponse, MenuRequest, MenuResponse};
pub use menu_group_api::{MenuGroupCatalog, MenuGroupRequest, MenuGroupResponse};
pub use order_api::{
    OrderLineRequest, OrderLineResponse, OrderRequest, OrderResponse, OrderWorkflow,
};
pub use product_api::{ProductCatalog, ProductRequest, ProductResponse};
pub use table_api::{TableManager, TableRequest, TableResponse};
pub use table_group_api::{TableGroupCoordinator, TableGroupRequest, TableGroupResponse};
