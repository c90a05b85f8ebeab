//! Runestone Bookserver - 电子教材后端的持久化核心
//!
//! 基于 SeaORM 的数据库结构与存储层，为各类交互题型保存作答、行为日志和代码历史。
//!
//! # 架构
//! - `answers`: 答案表定义与注册表
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 业务数据模型
//! - `runtime`: 运行时生命周期管理
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数（旧版布尔编码等）

pub mod answers;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod storage;
pub mod utils;
