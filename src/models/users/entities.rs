use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing, default)] // 不序列化凭据
    pub password_hash: Option<String>,
    pub course_id: Option<i32>,
    pub course_name: Option<String>,
    pub active: Option<bool>,
    pub donated: Option<bool>,
    pub accept_tcp: Option<bool>,
    pub created_on: Option<NaiveDateTime>,
    pub modified_on: Option<NaiveDateTime>,
}

impl User {
    /// 显示名称，没有姓名时回退到用户名
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.username.clone(),
        }
    }
}
