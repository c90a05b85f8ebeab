use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 一次代码运行记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeRun {
    pub id: i32,
    pub timestamp: Option<NaiveDateTime>,
    pub sid: Option<String>,
    pub acid: Option<String>,
    pub course_name: Option<String>,
    pub course_id: Option<i32>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub emessage: Option<String>,
    pub comment: Option<String>,
}
