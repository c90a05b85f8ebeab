use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub base_course: String,
    pub name: String,
    pub chapter: Option<String>,
    pub subchapter: Option<String>,
    pub author: Option<String>,
    pub difficulty: Option<i32>,
    pub question: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
    pub question_type: Option<String>,
    pub is_private: Option<bool>,
    pub htmlsrc: Option<String>,
    pub autograde: Option<String>,
}
