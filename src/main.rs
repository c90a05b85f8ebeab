use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, info, warn};

// 从 lib.rs 导入模块
use rust_bookserver_next::config::AppConfig;
use rust_bookserver_next::runtime::lifetime;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();

    // 记录程序启动时间
    let start_datetime = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return std::process::ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    // 打印信息
    warn!(
        "Starting schema bootstrap...
        Project: {}
        Version: {}
        Authors: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    let context = match lifetime::startup::prepare_startup().await {
        Ok(context) => context,
        Err(e) => {
            error!("Bootstrap failed: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    for (name, table) in context.answer_tables.iter() {
        info!(
            "Answer table {} ({}): {}",
            name,
            table.kind(),
            table.column_names().join(", ")
        );
    }

    // 可选参数：课程名，给出时输出该课程的作答统计
    if let Some(course_name) = std::env::args().nth(1) {
        match lifetime::startup::report_answer_counts(&context, &course_name).await {
            Ok(total) => info!("Course {} has {} answers in total", course_name, total),
            Err(e) => {
                error!("Failed to count answers for {}: {}", course_name, e);
                return std::process::ExitCode::FAILURE;
            }
        }
    }

    debug!(
        "Bootstrap completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start_datetime)
            .num_milliseconds()
    );

    std::process::ExitCode::SUCCESS
}
