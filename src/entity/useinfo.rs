//! 学生行为日志实体
//!
//! 几乎每一次学生点击都会产生一行，只追加不修改。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "useinfo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub timestamp: Option<DateTime>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable, indexed)]
    pub sid: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable, indexed)]
    pub event: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub act: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable, indexed)]
    pub div_id: Option<String>,
    /// 引用的是 `courses.course_name` 而不是 `courses.id`
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable, indexed)]
    pub course_id: Option<String>,
    pub chapter: Option<String>,
    pub sub_chapter: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
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
    pub fn into_event(self) -> crate::models::events::entities::EventLogEntry {
        use crate::models::events::entities::EventLogEntry;

        EventLogEntry {
            id: self.id,
            timestamp: self.timestamp,
            sid: self.sid,
            event: self.event,
            act: self.act,
            div_id: self.div_id,
            course_name: self.course_id,
            chapter: self.chapter,
            sub_chapter: self.sub_chapter,
        }
    }
}
