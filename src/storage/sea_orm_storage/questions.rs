//! 题目存储操作

use super::{SeaOrmStorage, now};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions, Model};
use crate::errors::{BookServerError, Result};
use crate::models::questions::{entities::Question, requests::UpsertQuestionRequest};
use crate::utils::legacy_bool;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn find_question_model(&self, name: &str, base_course: &str) -> Result<Option<Model>> {
        Questions::find()
            .filter(Column::Name.eq(name))
            .filter(Column::BaseCourse.eq(base_course))
            .one(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询题目失败: {e}")))
    }

    /// 按 (name, base_course) 新建或覆盖题目
    pub async fn upsert_question_impl(&self, req: UpsertQuestionRequest) -> Result<Question> {
        if req.name.trim().is_empty() || req.base_course.trim().is_empty() {
            return Err(BookServerError::validation("name 和 base_course 不能为空"));
        }

        let existing = self.find_question_model(&req.name, &req.base_course).await?;

        let mut model = match &existing {
            Some(m) => ActiveModel {
                id: Set(m.id),
                ..Default::default()
            },
            None => ActiveModel {
                name: Set(req.name),
                base_course: Set(req.base_course),
                ..Default::default()
            },
        };

        model.chapter = Set(req.chapter);
        model.subchapter = Set(req.subchapter);
        model.author = Set(req.author);
        model.difficulty = Set(req.difficulty);
        model.question = Set(req.question);
        model.timestamp = Set(Some(now()));
        model.question_type = Set(req.question_type);
        model.is_private = Set(legacy_bool::encode_column(req.is_private));
        model.htmlsrc = Set(req.htmlsrc);
        model.autograde = Set(req.autograde);

        let result = if existing.is_some() {
            model.update(&self.db).await
        } else {
            model.insert(&self.db).await
        }
        .map_err(|e| BookServerError::database_operation(format!("保存题目失败: {e}")))?;

        result.try_into_question()
    }

    /// 获取题目
    pub async fn get_question_impl(&self, name: &str, base_course: &str) -> Result<Option<Question>> {
        self.find_question_model(name, base_course)
            .await?
            .map(|m| m.try_into_question())
            .transpose()
    }

    /// 列出小节中的全部题目
    pub async fn list_questions_in_subchapter_impl(
        &self,
        base_course: &str,
        chapter: &str,
        subchapter: &str,
    ) -> Result<Vec<Question>> {
        let questions = Questions::find()
            .filter(Column::BaseCourse.eq(base_course))
            .filter(Column::Chapter.eq(chapter))
            .filter(Column::Subchapter.eq(subchapter))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询小节题目失败: {e}")))?;

        questions.into_iter().map(|m| m.try_into_question()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use super::*;

    fn question(name: &str, subchapter: &str) -> UpsertQuestionRequest {
        UpsertQuestionRequest {
            base_course: "thinkcspy".into(),
            name: name.into(),
            chapter: Some("Functions".into()),
            subchapter: Some(subchapter.into()),
            question_type: Some("mchoice".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing() {
        let storage = memory_storage().await;

        let first = storage
            .upsert_question_impl(question("q1", "Intro"))
            .await
            .unwrap();
        let second = storage
            .upsert_question_impl(UpsertQuestionRequest {
                is_private: Some(true),
                difficulty: Some(3),
                ..question("q1", "Intro")
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.is_private, Some(true));
        assert_eq!(second.difficulty, Some(3));

        let fetched = storage
            .get_question_impl("q1", "thinkcspy")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, second);
        assert!(storage.get_question_impl("q1", "py4e").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_questions_in_subchapter() {
        let storage = memory_storage().await;
        for (name, sub) in [("q2", "Intro"), ("q1", "Intro"), ("q3", "Returns")] {
            storage.upsert_question_impl(question(name, sub)).await.unwrap();
        }

        let intro = storage
            .list_questions_in_subchapter_impl("thinkcspy", "Functions", "Intro")
            .await
            .unwrap();
        let names: Vec<_> = intro.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["q1", "q2"]);
    }
}
