//! 作答存储操作
//!
//! 写入按题型分派到具体实体；读取、导出和统计只通过注册表访问答案表。

use super::{SeaOrmStorage, now};
use crate::answers::{AnswerKey, AnswerKind, AnswerRow, all_answer_tables};
use crate::entity::timed_exam;
use crate::errors::{BookServerError, Result};
use crate::models::answers::{
    entities::TimedExamResult,
    requests::{AnswerPayload, AnswerSubmission, TimedExamSubmission},
    responses::{AnswerTableCount, AnswerTableExport, CourseAnswerExport, RecordAnswerResponse},
};
use crate::utils::legacy_bool;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

/// 按 (sid, div_id, course_name) 写入一行作答，已有作答时原地覆盖
///
/// 返回 `(是否覆盖, 写入后的行)`。
macro_rules! upsert_answer {
    ($storage:expr, $module:ident, $key:expr, $timestamp:expr, { $($field:ident: $value:expr),* $(,)? }) => {{
        use crate::entity::$module::{ActiveModel, Column, Entity};

        let key: &AnswerKey = $key;
        let existing = Entity::find()
            .filter(Column::Sid.eq(key.sid.as_str()))
            .filter(Column::DivId.eq(key.div_id.as_str()))
            .filter(Column::CourseName.eq(key.course_name.as_str()))
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .one(&$storage.db)
            .await
            .map_err(|e| {
                BookServerError::database_operation(format!(
                    "查询 {} 已有作答失败: {e}",
                    stringify!($module)
                ))
            })?;

        let resubmission = existing.is_some();
        let mut model = match &existing {
            Some(m) => ActiveModel {
                id: Set(m.id),
                ..Default::default()
            },
            None => ActiveModel {
                div_id: Set(Some(key.div_id.clone())),
                sid: Set(Some(key.sid.clone())),
                course_name: Set(Some(key.course_name.clone())),
                ..Default::default()
            },
        };

        model.timestamp = Set(Some($timestamp));
        $(model.$field = Set($value);)*

        let saved = if resubmission {
            model.update(&$storage.db).await
        } else {
            model.insert(&$storage.db).await
        }
        .map_err(|e| {
            BookServerError::database_operation(format!(
                "保存 {} 作答失败: {e}",
                stringify!($module)
            ))
        })?;

        (resubmission, AnswerRow::from_model::<Entity>(&saved))
    }};
}

impl SeaOrmStorage {
    /// 记录作答
    pub async fn record_answer_impl(
        &self,
        submission: AnswerSubmission,
    ) -> Result<RecordAnswerResponse> {
        submission.validate()?;

        let key = submission.key();
        let kind = submission.payload.kind();
        let timestamp = submission.timestamp.unwrap_or_else(now);

        let (resubmission, row) = match submission.payload {
            AnswerPayload::MultipleChoice {
                answer,
                correct,
                percent,
            } => upsert_answer!(self, mchoice_answers, &key, timestamp, {
                answer: Some(answer),
                correct: legacy_bool::encode_column(correct),
                percent: percent,
            }),
            AnswerPayload::FillInTheBlank {
                answer,
                correct,
                percent,
            } => upsert_answer!(self, fitb_answers, &key, timestamp, {
                answer: Some(answer),
                correct: legacy_bool::encode_column(correct),
                percent: percent,
            }),
            AnswerPayload::DragAndDrop {
                answer,
                correct,
                percent,
            } => upsert_answer!(self, dragndrop_answers, &key, timestamp, {
                answer: Some(answer),
                correct: legacy_bool::encode_column(correct),
                percent: percent,
            }),
            AnswerPayload::ClickableArea {
                answer,
                correct,
                percent,
            } => upsert_answer!(self, clickablearea_answers, &key, timestamp, {
                answer: Some(answer),
                correct: legacy_bool::encode_column(correct),
                percent: percent,
            }),
            AnswerPayload::Parsons {
                answer,
                source,
                correct,
                percent,
            } => upsert_answer!(self, parsons_answers, &key, timestamp, {
                answer: Some(answer),
                source: source,
                correct: legacy_bool::encode_column(correct),
                percent: percent,
            }),
            AnswerPayload::CodeLens {
                answer,
                source,
                correct,
                percent,
            } => upsert_answer!(self, codelens_answers, &key, timestamp, {
                answer: Some(answer),
                source: source,
                correct: legacy_bool::encode_column(correct),
                percent: percent,
            }),
            AnswerPayload::ShortAnswer { answer } => {
                upsert_answer!(self, shortanswer_answers, &key, timestamp, {
                    answer: Some(answer),
                })
            }
            AnswerPayload::UnitTest {
                answer,
                passed,
                failed,
                correct,
                percent,
            } => upsert_answer!(self, unittest_answers, &key, timestamp, {
                answer: Some(answer),
                passed: passed,
                failed: failed,
                correct: legacy_bool::encode_column(correct),
                percent: percent,
            }),
            AnswerPayload::LanguagePractice { answer, grade } => {
                upsert_answer!(self, lp_answers, &key, timestamp, {
                    answer: Some(answer),
                    correct: grade,
                })
            }
        };

        debug!(
            "作答已保存: {} {} {} (覆盖: {})",
            kind, key.course_name, key.div_id, resubmission
        );

        Ok(RecordAnswerResponse {
            kind,
            resubmission,
            row,
        })
    }

    /// 记录限时测验结果，每次提交追加一行
    pub async fn record_timed_exam_impl(
        &self,
        submission: TimedExamSubmission,
    ) -> Result<TimedExamResult> {
        if submission.sid.trim().is_empty() || submission.div_id.trim().is_empty() {
            return Err(BookServerError::validation("sid 和 div_id 不能为空"));
        }

        let model = timed_exam::ActiveModel {
            timestamp: Set(Some(submission.timestamp.unwrap_or_else(now))),
            div_id: Set(Some(submission.div_id)),
            sid: Set(Some(submission.sid)),
            course_name: Set(Some(submission.course_name)),
            correct: Set(submission.correct),
            incorrect: Set(submission.incorrect),
            skipped: Set(submission.skipped),
            time_taken: Set(submission.time_taken),
            reset: Set(legacy_bool::encode_column(submission.reset)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("记录限时测验失败: {e}")))?;

        result.try_into_result()
    }

    /// 最近一次作答
    pub async fn latest_answer_impl(
        &self,
        kind: AnswerKind,
        key: &AnswerKey,
    ) -> Result<Option<AnswerRow>> {
        let registry = all_answer_tables()?;
        let table = registry
            .by_kind(kind)
            .ok_or_else(|| BookServerError::not_found(format!("答案表未注册: {kind}")))?;

        table.latest(&self.db, key).await
    }

    /// 按注册顺序导出课程在每张答案表中的作答
    pub async fn export_course_answers_impl(&self, course_name: &str) -> Result<CourseAnswerExport> {
        let registry = all_answer_tables()?;
        let mut tables = Vec::with_capacity(registry.len());

        for (name, table) in registry.iter() {
            let rows = table.list_for_course(&self.db, course_name).await?;
            tables.push(AnswerTableExport {
                table: name.to_string(),
                kind: table.kind(),
                rows: rows.iter().map(AnswerRow::to_json).collect(),
            });
        }

        Ok(CourseAnswerExport {
            course_name: course_name.to_string(),
            tables,
        })
    }

    /// 统计课程在每张答案表中的作答数量
    pub async fn count_course_answers_impl(
        &self,
        course_name: &str,
    ) -> Result<Vec<AnswerTableCount>> {
        let registry = all_answer_tables()?;
        let mut counts = Vec::with_capacity(registry.len());

        for (name, table) in registry.iter() {
            counts.push(AnswerTableCount {
                table: name.to_string(),
                kind: table.kind(),
                count: table.count_for_course(&self.db, course_name).await?,
            });
        }

        Ok(counts)
    }
}
