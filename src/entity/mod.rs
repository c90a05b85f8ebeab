//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! 标志列在数据库中是 `CHAR(1)`，转换为业务实体时统一经过 `utils::legacy_bool` 解码。

pub mod auth_user;
pub mod code;
pub mod courses;
pub mod questions;
pub mod timed_exam;
pub mod useinfo;

// 答案表
pub mod clickablearea_answers;
pub mod codelens_answers;
pub mod dragndrop_answers;
pub mod fitb_answers;
pub mod lp_answers;
pub mod mchoice_answers;
pub mod parsons_answers;
pub mod shortanswer_answers;
pub mod unittest_answers;
