use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 限时测验结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedExamResult {
    pub id: i32,
    pub timestamp: Option<NaiveDateTime>,
    pub div_id: Option<String>,
    pub sid: Option<String>,
    pub course_name: Option<String>,
    pub correct: Option<i32>,
    pub incorrect: Option<i32>,
    pub skipped: Option<i32>,
    pub time_taken: Option<i32>,
    pub reset: Option<bool>,
}
