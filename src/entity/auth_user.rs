//! 用户实体

use sea_orm::entity::prelude::*;

use crate::utils::legacy_bool;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(512))", unique)]
    pub username: String,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub first_name: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub last_name: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", unique, nullable)]
    pub email: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub password: Option<String>,
    pub created_on: Option<DateTime>,
    pub modified_on: Option<DateTime>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub registration_key: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub reset_password_key: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub registration_id: Option<String>,
    pub course_id: Option<i32>,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub course_name: Option<String>,
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub active: Option<String>,
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub donated: Option<String>,
    #[sea_orm(column_type = "Char(Some(1))", nullable)]
    pub accept_tcp: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn try_into_user(
        self,
    ) -> crate::errors::Result<crate::models::users::entities::User> {
        use crate::models::users::entities::User;

        Ok(User {
            active: legacy_bool::decode_column(self.active.as_deref())?,
            donated: legacy_bool::decode_column(self.donated.as_deref())?,
            accept_tcp: legacy_bool::decode_column(self.accept_tcp.as_deref())?,
            id: self.id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password,
            course_id: self.course_id,
            course_name: self.course_name,
            created_on: self.created_on,
            modified_on: self.modified_on,
        })
    }
}
