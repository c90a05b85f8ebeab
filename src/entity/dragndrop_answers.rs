//! 拖放题作答

use sea_orm::entity::prelude::*;

use crate::declare_answer_table;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dragndrop_answers")]
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
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub correct: Option<String>,
    pub percent: Option<f64>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub answer: Option<String>,
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

declare_answer_table!(id, timestamp, div_id, sid, course_name, correct, percent, answer);
