//! 业务数据模型
//!
//! 与 `entity` 模块中的数据库实体分离，Storage 层负责两者之间的转换。

pub mod evaluations;
pub mod organizations;
pub mod participations;
pub mod periods;
pub mod users;
