// ==========================================
// 餐厅 POS 后台 - 主入口
// ==========================================
// 职责: 初始化日志、打开数据库并建表、装配组件、输出当前数据概况
// 说明: 请求/响应边界层由宿主应用提供，此处只做启动自检
// ==========================================

use anyhow::{anyhow, Context, Result};
use kitchen_pos::app::{get_default_db_path, AppState};
use kitchen_pos::{logging, OrderStatus};

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 系统版本: {}", kitchen_pos::APP_NAME, kitchen_pos::VERSION);
    tracing::info!("==================================================");

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;
    let store_name = state
        .config_manager
        .get_store_name()
        .map_err(|e| anyhow!("读取门店名称失败: {}", e))?;
    tracing::info!(store = %store_name, "门店配置已加载");

    let products = state.product_catalog.list().context("查询菜品失败")?;
    let menu_groups = state.menu_group_catalog.list().context("查询菜单分组失败")?;
    let menus = state.menu_composer.list().context("查询菜单失败")?;
    let tables = state.table_manager.list().context("查询餐桌失败")?;
    let orders = state.order_workflow.list().context("查询订单失败")?;

    let occupied = tables.iter().filter(|t| !t.empty).count();
    let grouped = tables.iter().filter(|t| t.table_group_id.is_some()).count();
    let active = orders
        .iter()
        .filter(|o| o.order_status.is_active())
        .count();
    let completed = orders
        .iter()
        .filter(|o| o.order_status == OrderStatus::Completion)
        .count();

    tracing::info!(
        products = products.len(),
        menu_groups = menu_groups.len(),
        menus = menus.len(),
        "目录概况"
    );
    tracing::info!(
        tables = tables.len(),
        occupied,
        grouped,
        "餐桌概况"
    );
    tracing::info!(orders = orders.len(), active, completed, "订单概况");

    Ok(())
}
