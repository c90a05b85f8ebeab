//! 代码运行历史实体
//!
//! 学生每次运行或修改代码都会追加一行，用于 activecode 组件的历史滑块。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "code")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub timestamp: Option<DateTime>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable, indexed)]
    pub sid: Option<String>,
    /// 组件的唯一标识
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable, indexed)]
    pub acid: Option<String>,
    #[sea_orm(nullable, indexed)]
    pub course_name: Option<String>,
    pub course_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub code: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub language: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub emessage: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_code_run(self) -> crate::models::code::entities::CodeRun {
        use crate::models::code::entities::CodeRun;

        CodeRun {
            id: self.id,
            timestamp: self.timestamp,
            sid: self.sid,
            acid: self.acid,
            course_name: self.course_name,
            course_id: self.course_id,
            code: self.code,
            language: self.language,
            emessage: self.emessage,
            comment: self.comment,
        }
    }
}
