use chrono::NaiveDateTime;
use serde::Deserialize;

// 行为日志写入请求
//
// act 的内容由前端组件决定，这里按不透明字符串保存。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogEventRequest {
    pub sid: String,
    pub event: String,
    pub act: Option<String>,
    pub div_id: Option<String>,
    pub course_name: String,
    pub chapter: Option<String>,
    pub sub_chapter: Option<String>,
    /// 缺省为写入时间
    pub timestamp: Option<NaiveDateTime>,
}

// 行为日志查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    pub sid: String,
    pub course_name: String,
    pub event: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}
