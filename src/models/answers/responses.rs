use serde::Serialize;

use crate::answers::{AnswerKind, AnswerRow};

// 作答写入结果
#[derive(Debug, Clone)]
pub struct RecordAnswerResponse {
    pub kind: AnswerKind,
    /// 是否覆盖了之前的作答
    pub resubmission: bool,
    pub row: AnswerRow,
}

// 单张答案表的导出内容
#[derive(Debug, Clone, Serialize)]
pub struct AnswerTableExport {
    pub table: String,
    pub kind: AnswerKind,
    pub rows: Vec<serde_json::Value>,
}

// 课程全部作答的导出
#[derive(Debug, Clone, Serialize)]
pub struct CourseAnswerExport {
    pub course_name: String,
    pub tables: Vec<AnswerTableExport>,
}

impl CourseAnswerExport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|table| table.rows.len()).sum()
    }
}

// 单张答案表的作答数量
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerTableCount {
    pub table: String,
    pub kind: AnswerKind,
    pub count: u64,
}
