//! perfeval - 绩效评估汇总与等级调整引擎
//!
//! 按评估周期汇总同事评价、PM 评价和定性评价，计算每个人的最终分数与等级，
//! 并在部门配额和 B+/B- 平衡规则下调整等级。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
