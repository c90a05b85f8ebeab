//! 题目实体
//!
//! 题目元数据由书籍构建工具写入，(name, base_course) 唯一。

use sea_orm::entity::prelude::*;

use crate::utils::legacy_bool;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(512))")]
    pub base_course: String,
    /// 即页面中题目的 div_id
    #[sea_orm(column_type = "String(StringLen::N(512))", indexed)]
    pub name: String,
    /// 对应章节的 label，而不是章节名称
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub chapter: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub subchapter: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub author: Option<String>,
    pub difficulty: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub question: Option<String>,
    pub timestamp: Option<DateTime>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub question_type: Option<String>,
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub is_private: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub htmlsrc: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub autograde: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn try_into_question(
        self,
    ) -> crate::errors::Result<crate::models::questions::entities::Question> {
        use crate::models::questions::entities::Question;

        Ok(Question {
            is_private: legacy_bool::decode_column(self.is_private.as_deref())?,
            id: self.id,
            base_course: self.base_course,
            name: self.name,
            chapter: self.chapter,
            subchapter: self.subchapter,
            author: self.author,
            difficulty: self.difficulty,
            question: self.question,
            timestamp: self.timestamp,
            question_type: self.question_type,
            htmlsrc: self.htmlsrc,
            autograde: self.autograde,
        })
    }
}
