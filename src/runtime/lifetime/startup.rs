use crate::answers::{AnswerTableRegistry, all_answer_tables, debug_answer_table_registry};
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub answer_tables: &'static AnswerTableRegistry,
}

/// 准备启动上下文
///
/// 注册表必须先于数据库构建，重复注册在这里直接失败。
pub async fn prepare_startup() -> Result<StartupContext> {
    let answer_tables = all_answer_tables()?;
    info!("{} answer tables registered", answer_tables.len());

    if cfg!(debug_assertions) {
        debug_answer_table_registry();
        debug!("Debug mode: answer table registry dumped");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    Ok(StartupContext {
        storage,
        answer_tables,
    })
}

/// 输出课程在各答案表中的作答数量，返回总数
pub async fn report_answer_counts(context: &StartupContext, course_name: &str) -> Result<u64> {
    let counts = context.storage.count_course_answers(course_name).await?;

    let mut total = 0;
    for count in &counts {
        info!(
            "{:<24} {:<14} {} rows",
            count.table,
            count.kind.tag(),
            count.count
        );
        total += count.count;
    }

    Ok(total)
}
