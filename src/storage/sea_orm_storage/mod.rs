//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod answers;
mod code;
mod courses;
mod events;
mod questions;
mod users;

use crate::config::AppConfig;
use crate::errors::{BookServerError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 包装已有连接并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| BookServerError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| BookServerError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                BookServerError::database_connection(format!("SQLite 连接失败: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| BookServerError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(BookServerError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 当前时间（数据库中统一存储无时区的 UTC 时间）
pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_name(&self, course_name: &str) -> Result<Option<Course>> {
        self.get_course_by_name_impl(course_name).await
    }

    async fn get_base_course(&self, course_name: &str) -> Result<Option<Course>> {
        self.get_base_course_impl(course_name).await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_course_users(&self, course_name: &str) -> Result<Vec<User>> {
        self.list_course_users_impl(course_name).await
    }

    async fn update_user_flags(
        &self,
        username: &str,
        update: UpdateUserFlagsRequest,
    ) -> Result<Option<User>> {
        self.update_user_flags_impl(username, update).await
    }

    // 题目模块
    async fn upsert_question(&self, question: UpsertQuestionRequest) -> Result<Question> {
        self.upsert_question_impl(question).await
    }

    async fn get_question(&self, name: &str, base_course: &str) -> Result<Option<Question>> {
        self.get_question_impl(name, base_course).await
    }

    async fn list_questions_in_subchapter(
        &self,
        base_course: &str,
        chapter: &str,
        subchapter: &str,
    ) -> Result<Vec<Question>> {
        self.list_questions_in_subchapter_impl(base_course, chapter, subchapter)
            .await
    }

    // 行为日志模块
    async fn log_event(&self, event: LogEventRequest) -> Result<EventLogEntry> {
        self.log_event_impl(event).await
    }

    async fn list_events(&self, query: EventListQuery) -> Result<EventListResponse> {
        self.list_events_impl(query).await
    }

    async fn count_events(&self, course_name: &str) -> Result<u64> {
        self.count_events_impl(course_name).await
    }

    // 代码运行模块
    async fn record_code_run(&self, run: RecordCodeRunRequest) -> Result<CodeRun> {
        self.record_code_run_impl(run).await
    }

    async fn code_history(
        &self,
        sid: &str,
        acid: &str,
        course_name: &str,
    ) -> Result<Vec<CodeRun>> {
        self.code_history_impl(sid, acid, course_name).await
    }

    // 作答模块
    async fn record_answer(&self, submission: AnswerSubmission) -> Result<RecordAnswerResponse> {
        self.record_answer_impl(submission).await
    }

    async fn record_timed_exam(&self, submission: TimedExamSubmission) -> Result<TimedExamResult> {
        self.record_timed_exam_impl(submission).await
    }

    async fn latest_answer(&self, kind: AnswerKind, key: &AnswerKey) -> Result<Option<AnswerRow>> {
        self.latest_answer_impl(kind, key).await
    }

    async fn export_course_answers(&self, course_name: &str) -> Result<CourseAnswerExport> {
        self.export_course_answers_impl(course_name).await
    }

    async fn count_course_answers(&self, course_name: &str) -> Result<Vec<AnswerTableCount>> {
        self.count_course_answers_impl(course_name).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::courses::requests::CreateCourseRequest;
    use sea_orm::{ConnectOptions, Database};

    /// 单连接的内存 SQLite，已完成迁移
    pub(crate) async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .expect("in-memory sqlite should connect");
        SeaOrmStorage::from_connection(db)
            .await
            .expect("migrations should apply")
    }

    /// 创建一门基础课程
    pub(crate) async fn seed_course(storage: &SeaOrmStorage, name: &str) {
        storage
            .create_course_impl(CreateCourseRequest {
                course_name: name.to_string(),
                ..Default::default()
            })
            .await
            .expect("course should be created");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("bookserver.db").unwrap(),
            "sqlite://bookserver.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://localhost/runestone").unwrap(),
            "postgres://localhost/runestone"
        );
        assert!(matches!(
            SeaOrmStorage::build_database_url("redis://localhost"),
            Err(BookServerError::DatabaseConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_migrations_create_answer_tables() {
        let storage = test_support::memory_storage().await;
        test_support::seed_course(&storage, "py4e").await;

        let counts = storage.count_course_answers("py4e").await.unwrap();
        assert_eq!(counts.len(), AnswerKind::ALL.len());
        assert!(counts.iter().all(|c| c.count == 0));
    }

    #[tokio::test]
    async fn test_migrations_roll_back_cleanly() {
        use migration::SchemaManager;

        let storage = test_support::memory_storage().await;
        let db = storage.connection();
        let manager = SchemaManager::new(db);

        let mut tables = vec!["courses", "auth_user", "questions", "useinfo", "code", "timed_exam"];
        tables.extend(AnswerKind::ALL.iter().map(|kind| kind.table_name()));

        for table in &tables {
            assert!(manager.has_table(*table).await.unwrap(), "{table}");
        }

        Migrator::down(db, None).await.unwrap();
        for table in &tables {
            assert!(!manager.has_table(*table).await.unwrap(), "{table}");
        }

        // 回滚后可以重新迁移
        Migrator::up(db, None).await.unwrap();
        assert!(manager.has_table("mchoice_answers").await.unwrap());
    }
}
