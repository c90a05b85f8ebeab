use chrono::NaiveDateTime;
use serde::Deserialize;

// 代码运行记录请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordCodeRunRequest {
    pub sid: String,
    pub acid: String,
    pub course_name: String,
    pub code: String,
    pub language: Option<String>,
    pub emessage: Option<String>,
    pub comment: Option<String>,
    /// 缺省为写入时间
    pub timestamp: Option<NaiveDateTime>,
}
