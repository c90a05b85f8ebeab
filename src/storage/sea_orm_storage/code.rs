//! 代码运行历史存储操作

use super::{SeaOrmStorage, now};
use crate::entity::code::{ActiveModel, Column, Entity as Code};
use crate::errors::{BookServerError, Result};
use crate::models::code::{entities::CodeRun, requests::RecordCodeRunRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 记录一次代码运行
    pub async fn record_code_run_impl(&self, req: RecordCodeRunRequest) -> Result<CodeRun> {
        if req.sid.trim().is_empty() || req.acid.trim().is_empty() {
            return Err(BookServerError::validation("sid 和 acid 不能为空"));
        }

        // code 表没有外键，课程不存在时 course_id 留空
        let course_id = self
            .get_course_by_name_impl(&req.course_name)
            .await?
            .map(|course| course.id);

        let model = ActiveModel {
            timestamp: Set(Some(req.timestamp.unwrap_or_else(now))),
            sid: Set(Some(req.sid)),
            acid: Set(Some(req.acid)),
            course_name: Set(Some(req.course_name)),
            course_id: Set(course_id),
            code: Set(Some(req.code)),
            language: Set(req.language),
            emessage: Set(req.emessage),
            comment: Set(req.comment),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("记录代码运行失败: {e}")))?;

        Ok(result.into_code_run())
    }

    /// 组件的代码历史，最早的在前
    pub async fn code_history_impl(
        &self,
        sid: &str,
        acid: &str,
        course_name: &str,
    ) -> Result<Vec<CodeRun>> {
        let runs = Code::find()
            .filter(Column::Sid.eq(sid))
            .filter(Column::Acid.eq(acid))
            .filter(Column::CourseName.eq(course_name))
            .order_by_asc(Column::Timestamp)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询代码历史失败: {e}")))?;

        Ok(runs.into_iter().map(|m| m.into_code_run()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_course};
    use super::*;
    use chrono::NaiveDate;

    fn run(code: &str, minute: u32) -> RecordCodeRunRequest {
        RecordCodeRunRequest {
            sid: "alice".into(),
            acid: "ac_1".into(),
            course_name: "py4e".into(),
            code: code.into(),
            language: Some("python".into()),
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
                .and_then(|d| d.and_hms_opt(9, minute, 0)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_code_history_oldest_first() {
        let storage = memory_storage().await;
        seed_course(&storage, "py4e").await;

        storage.record_code_run_impl(run("print(2)", 5)).await.unwrap();
        storage.record_code_run_impl(run("print(1)", 1)).await.unwrap();
        storage
            .record_code_run_impl(RecordCodeRunRequest {
                acid: "ac_2".into(),
                ..run("x = 1", 3)
            })
            .await
            .unwrap();

        let history = storage
            .code_history_impl("alice", "ac_1", "py4e")
            .await
            .unwrap();
        let code: Vec<_> = history.iter().filter_map(|r| r.code.as_deref()).collect();
        assert_eq!(code, vec!["print(1)", "print(2)"]);
        assert!(history.iter().all(|r| r.course_id.is_some()));
    }

    #[tokio::test]
    async fn test_unknown_course_leaves_course_id_empty() {
        let storage = memory_storage().await;
        let recorded = storage.record_code_run_impl(run("pass", 0)).await.unwrap();
        assert_eq!(recorded.course_id, None);
        assert_eq!(recorded.course_name.as_deref(), Some("py4e"));
    }
}
