// ==========================================
// 日志系统初始化
// ==========================================
// 业务组件在 kitchen_pos::api::* 目标下输出:
// - info: 实体创建、订单状态变更、并桌/解散
// - warn: 业务规则拒绝请求
// 仓储层不输出日志，基础设施故障由调用方决定如何记录
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的默认过滤器
const DEFAULT_FILTER: &str = "info";

/// 测试默认过滤器：业务组件 debug，其余（含 rusqlite trace）只保留 warn
const TEST_FILTER: &str = "warn,kitchen_pos=debug";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 过滤器，默认 info
///   - 只看业务拒绝: RUST_LOG=warn,kitchen_pos::api=warn
///   - 排查桌组流程: RUST_LOG=info,kitchen_pos::api::table_group_api=debug
///
/// # 示例
/// ```no_run
/// use kitchen_pos::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 初始化测试日志（输出经 test writer 捕获，失败用例才会显示）
///
/// 可重复调用，仅第一次生效；RUST_LOG 优先于默认测试过滤器
pub fn init_test() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(TEST_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}
