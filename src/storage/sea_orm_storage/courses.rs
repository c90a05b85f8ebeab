//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{BookServerError, Result};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use crate::utils::legacy_bool;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建课程
    ///
    /// 派生课程只能挂在基础课程下面，不允许形成链或环。
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let course_name = req.course_name.trim().to_string();
        if course_name.is_empty() {
            return Err(BookServerError::validation("course_name 不能为空"));
        }

        let base_course = match req.base_course.as_deref().map(str::trim) {
            None | Some("") => course_name.clone(),
            Some(base) if base == course_name => course_name.clone(),
            Some(base) => {
                let base_model = self.get_course_by_name_impl(base).await?.ok_or_else(|| {
                    BookServerError::not_found(format!("基础课程不存在: {base}"))
                })?;

                if !base_model.is_base_course() {
                    return Err(BookServerError::validation(format!(
                        "{base} 本身是派生课程，不能作为基础课程"
                    )));
                }
                base_model.course_name
            }
        };

        let model = ActiveModel {
            course_name: Set(Some(course_name.clone())),
            term_start_date: Set(req.term_start_date),
            base_course: Set(Some(base_course)),
            login_required: Set(legacy_bool::encode_column(req.login_required)),
            allow_pairs: Set(legacy_bool::encode_column(req.allow_pairs)),
            student_price: Set(req.student_price),
            downloads_enabled: Set(legacy_bool::encode_column(req.downloads_enabled)),
            courselevel: Set(req.courselevel),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("创建课程失败: {e}")))?;

        debug!("课程已创建: {}", course_name);
        result.try_into_course()
    }

    /// 通过课程名获取课程
    pub async fn get_course_by_name_impl(&self, course_name: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::CourseName.eq(course_name))
            .one(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询课程失败: {e}")))?;

        result.map(|m| m.try_into_course()).transpose()
    }

    /// 获取课程的基础课程，基础课程返回自身
    pub async fn get_base_course_impl(&self, course_name: &str) -> Result<Option<Course>> {
        let Some(course) = self.get_course_by_name_impl(course_name).await? else {
            return Ok(None);
        };

        if course.is_base_course() {
            return Ok(Some(course));
        }

        self.get_course_by_name_impl(course.base_course_name()).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use super::*;
    use sea_orm::IntoActiveModel;

    fn request(name: &str, base: Option<&str>) -> CreateCourseRequest {
        CreateCourseRequest {
            course_name: name.to_string(),
            base_course: base.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_base_course_points_to_itself() {
        let storage = memory_storage().await;
        let course = storage
            .create_course_impl(CreateCourseRequest {
                login_required: Some(true),
                ..request("thinkcspy", None)
            })
            .await
            .unwrap();

        assert_eq!(course.base_course.as_deref(), Some("thinkcspy"));
        assert!(course.is_base_course());
        assert_eq!(course.login_required, Some(true));
        assert_eq!(course.allow_pairs, None);
    }

    #[tokio::test]
    async fn test_derived_course_resolves_base() {
        let storage = memory_storage().await;
        storage
            .create_course_impl(request("thinkcspy", None))
            .await
            .unwrap();
        storage
            .create_course_impl(request("cs101_fall", Some("thinkcspy")))
            .await
            .unwrap();

        let base = storage
            .get_base_course_impl("cs101_fall")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(base.course_name, "thinkcspy");

        let itself = storage
            .get_base_course_impl("thinkcspy")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(itself.course_name, "thinkcspy");

        assert!(storage.get_base_course_impl("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_derived_course_rules() {
        let storage = memory_storage().await;

        let missing = storage
            .create_course_impl(request("cs101_fall", Some("thinkcspy")))
            .await;
        assert!(matches!(missing, Err(BookServerError::NotFound(_))));

        storage
            .create_course_impl(request("thinkcspy", None))
            .await
            .unwrap();
        storage
            .create_course_impl(request("cs101_fall", Some("thinkcspy")))
            .await
            .unwrap();

        // 派生课程不能再作为基础课程
        let chained = storage
            .create_course_impl(request("cs101_section2", Some("cs101_fall")))
            .await;
        assert!(matches!(chained, Err(BookServerError::Validation(_))));

        let duplicate = storage
            .create_course_impl(request("thinkcspy", None))
            .await;
        assert!(matches!(duplicate, Err(BookServerError::DatabaseOperation(_))));
    }

    #[tokio::test]
    async fn test_corrupt_flag_surfaces_on_read() {
        let storage = memory_storage().await;
        storage
            .create_course_impl(request("thinkcspy", None))
            .await
            .unwrap();

        let model = Courses::find()
            .filter(Column::CourseName.eq("thinkcspy"))
            .one(&storage.db)
            .await
            .unwrap()
            .unwrap();
        let mut active = model.into_active_model();
        active.allow_pairs = Set(Some("X".to_string()));
        active.update(&storage.db).await.unwrap();

        let result = storage.get_course_by_name_impl("thinkcspy").await;
        assert!(matches!(result, Err(BookServerError::CorruptEncoding(_))));
    }
}
