//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod department_evaluations;
pub mod department_grade_ratios;
pub mod evaluation_periods;
pub mod evaluation_weights;
pub mod final_evaluations;
pub mod grade_adjustment_locks;
pub mod organizations;
pub mod peer_evaluations;
pub mod pm_evaluations;
pub mod project_members;
pub mod projects;
pub mod qualitative_evaluations;
pub mod users;
