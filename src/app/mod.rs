// ==========================================
// 餐厅 POS 后台 - 应用层
// ==========================================
// 职责: 装配仓储与业务组件，供边界层托管
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
