use serde::Deserialize;

// 题目写入请求，按 (name, base_course) 新建或覆盖
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertQuestionRequest {
    pub base_course: String,
    pub name: String,
    pub chapter: Option<String>,
    pub subchapter: Option<String>,
    pub author: Option<String>,
    pub difficulty: Option<i32>,
    pub question: Option<String>,
    pub question_type: Option<String>,
    pub is_private: Option<bool>,
    pub htmlsrc: Option<String>,
    pub autograde: Option<String>,
}
