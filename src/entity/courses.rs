//! 课程实体
//!
//! `course_name` 是事实上的主键，`id` 只是沿用旧系统的自增列。
//! 基础课程的 `base_course` 等于自身，派生课程指向其基础课程。

use sea_orm::entity::prelude::*;

use crate::utils::legacy_bool;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(512))", unique, nullable)]
    pub course_name: Option<String>,
    pub term_start_date: Option<Date>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub base_course: Option<String>,
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub login_required: Option<String>,
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub allow_pairs: Option<String>,
    pub student_price: Option<i32>,
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub downloads_enabled: Option<String>,
    pub courselevel: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::BaseCourse",
        to = "Column::CourseName"
    )]
    BaseCourse,
    #[sea_orm(has_many = "super::useinfo::Entity")]
    Useinfo,
}

impl Related<super::useinfo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Useinfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn login_required(&self) -> crate::errors::Result<Option<bool>> {
        legacy_bool::decode_column(self.login_required.as_deref())
    }

    pub fn allow_pairs(&self) -> crate::errors::Result<Option<bool>> {
        legacy_bool::decode_column(self.allow_pairs.as_deref())
    }

    pub fn downloads_enabled(&self) -> crate::errors::Result<Option<bool>> {
        legacy_bool::decode_column(self.downloads_enabled.as_deref())
    }

    pub fn try_into_course(
        self,
    ) -> crate::errors::Result<crate::models::courses::entities::Course> {
        use crate::models::courses::entities::Course;

        Ok(Course {
            login_required: self.login_required()?,
            allow_pairs: self.allow_pairs()?,
            downloads_enabled: self.downloads_enabled()?,
            id: self.id,
            course_name: self.course_name.unwrap_or_default(),
            term_start_date: self.term_start_date,
            base_course: self.base_course,
            student_price: self.student_price,
            courselevel: self.courselevel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BookServerError;
    use sea_orm::{ActiveValue, IntoActiveModel, TryIntoModel};

    fn model(allow_pairs: Option<&str>) -> Model {
        Model {
            id: 1,
            course_name: Some("thinkcspy".into()),
            term_start_date: None,
            base_course: Some("thinkcspy".into()),
            login_required: Some("T".into()),
            allow_pairs: allow_pairs.map(str::to_string),
            student_price: None,
            downloads_enabled: None,
            courselevel: None,
        }
    }

    #[test]
    fn test_active_model_round_trip() {
        let active = model(Some("F")).into_active_model();
        assert_eq!(active.allow_pairs, ActiveValue::Unchanged(Some("F".into())));
        assert_eq!(active.try_into_model().unwrap(), model(Some("F")));
    }

    #[test]
    fn test_flag_accessors_decode() {
        let course = model(Some("F")).try_into_course().unwrap();
        assert_eq!(course.login_required, Some(true));
        assert_eq!(course.allow_pairs, Some(false));
        assert_eq!(course.downloads_enabled, None);
    }

    #[test]
    fn test_corrupt_flag_rejected() {
        let err = model(Some("X")).try_into_course().unwrap_err();
        assert!(matches!(err, BookServerError::CorruptEncoding(_)));
    }
}
