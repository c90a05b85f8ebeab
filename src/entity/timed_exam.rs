//! 限时测验结果
//!
//! 与答案表共享前缀列，但记录的是整场测验的统计，不注册为答案表。

use sea_orm::entity::prelude::*;

use crate::utils::legacy_bool;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timed_exam")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub timestamp: Option<DateTime>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable, indexed)]
    pub div_id: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable, indexed)]
    pub sid: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub course_name: Option<String>,
    pub correct: Option<i32>,
    pub incorrect: Option<i32>,
    pub skipped: Option<i32>,
    pub time_taken: Option<i32>,
    /// 本次提交是否为重置操作
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub reset: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseName",
        to = "super::courses::Column::CourseName"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn try_into_result(
        self,
    ) -> crate::errors::Result<crate::models::answers::entities::TimedExamResult> {
        use crate::models::answers::entities::TimedExamResult;

        Ok(TimedExamResult {
            reset: legacy_bool::decode_column(self.reset.as_deref())?,
            id: self.id,
            timestamp: self.timestamp,
            div_id: self.div_id,
            sid: self.sid,
            course_name: self.course_name,
            correct: self.correct,
            incorrect: self.incorrect,
            skipped: self.skipped,
            time_taken: self.time_taken,
        })
    }
}
