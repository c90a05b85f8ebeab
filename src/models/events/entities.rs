use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 行为日志条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: i32,
    pub timestamp: Option<NaiveDateTime>,
    pub sid: Option<String>,
    pub event: Option<String>,
    pub act: Option<String>,
    pub div_id: Option<String>,
    pub course_name: Option<String>,
    pub chapter: Option<String>,
    pub sub_chapter: Option<String>,
}
