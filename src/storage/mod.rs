use std::sync::Arc;

use crate::answers::{AnswerKey, AnswerKind, AnswerRow};
use crate::models::{
    answers::{
        entities::TimedExamResult,
        requests::{AnswerSubmission, TimedExamSubmission},
        responses::{AnswerTableCount, CourseAnswerExport, RecordAnswerResponse},
    },
    code::{entities::CodeRun, requests::RecordCodeRunRequest},
    courses::{entities::Course, requests::CreateCourseRequest},
    events::{
        entities::EventLogEntry,
        requests::{EventListQuery, LogEventRequest},
        responses::EventListResponse,
    },
    questions::{entities::Question, requests::UpsertQuestionRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserFlagsRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课程管理方法
    // 创建课程（基础课程或派生课程）
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过课程名获取课程
    async fn get_course_by_name(&self, course_name: &str) -> Result<Option<Course>>;
    // 获取课程所依托的基础课程
    async fn get_base_course(&self, course_name: &str) -> Result<Option<Course>>;

    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过用户名获取用户
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出课程中的用户
    async fn list_course_users(&self, course_name: &str) -> Result<Vec<User>>;
    // 更新用户标志
    async fn update_user_flags(
        &self,
        username: &str,
        update: UpdateUserFlagsRequest,
    ) -> Result<Option<User>>;

    /// 题目管理方法
    // 按 (name, base_course) 新建或覆盖题目
    async fn upsert_question(&self, question: UpsertQuestionRequest) -> Result<Question>;
    // 获取题目
    async fn get_question(&self, name: &str, base_course: &str) -> Result<Option<Question>>;
    // 列出小节中的题目
    async fn list_questions_in_subchapter(
        &self,
        base_course: &str,
        chapter: &str,
        subchapter: &str,
    ) -> Result<Vec<Question>>;

    /// 行为日志方法（只追加）
    // 记录一条行为日志
    async fn log_event(&self, event: LogEventRequest) -> Result<EventLogEntry>;
    // 分页列出学生在课程中的行为日志
    async fn list_events(&self, query: EventListQuery) -> Result<EventListResponse>;
    // 统计课程中的行为日志条数
    async fn count_events(&self, course_name: &str) -> Result<u64>;

    /// 代码运行历史方法（只追加）
    // 记录一次代码运行
    async fn record_code_run(&self, run: RecordCodeRunRequest) -> Result<CodeRun>;
    // 获取组件的代码历史，按时间升序
    async fn code_history(&self, sid: &str, acid: &str, course_name: &str)
    -> Result<Vec<CodeRun>>;

    /// 作答方法
    // 记录作答，重复提交时原地覆盖
    async fn record_answer(&self, submission: AnswerSubmission) -> Result<RecordAnswerResponse>;
    // 记录限时测验结果
    async fn record_timed_exam(&self, submission: TimedExamSubmission) -> Result<TimedExamResult>;
    // 获取最近一次作答
    async fn latest_answer(&self, kind: AnswerKind, key: &AnswerKey) -> Result<Option<AnswerRow>>;
    // 导出课程的全部作答
    async fn export_course_answers(&self, course_name: &str) -> Result<CourseAnswerExport>;
    // 统计课程在各答案表中的作答数量
    async fn count_course_answers(&self, course_name: &str) -> Result<Vec<AnswerTableCount>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
