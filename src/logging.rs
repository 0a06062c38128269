// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别, 支持 JSON 格式输出
// 日志写 stderr, stdout 保留给 JSON 结果
// ==========================================

use crate::config::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统（默认过滤器 + pretty 格式）
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: onco_planner=info）
///   例如: RUST_LOG=debug 或 RUST_LOG=onco_planner=trace
///
/// # 示例
/// ```no_run
/// use onco_planner::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with("onco_planner=info", LogFormat::Pretty);
}

/// 按配置初始化日志系统
///
/// # 参数
/// - default_filter: RUST_LOG 未设置时使用的过滤器
/// - format: pretty / json
pub fn init_with(default_filter: &str, format: LogFormat) {
    // RUST_LOG 优先; 配置的过滤器无效时回退到 info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 重复初始化时忽略
    let _ = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
