//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离：标志字段在这里已经是 `Option<bool>`。

pub mod answers;
pub mod code;
pub mod common;
pub mod courses;
pub mod events;
pub mod questions;
pub mod users;

pub use common::{PaginatedResponse, PaginationInfo};
