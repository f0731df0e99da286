//! 预导入模块，方便使用

pub use super::department_evaluations::{
    ActiveModel as DepartmentEvaluationActiveModel, Entity as DepartmentEvaluations,
    Model as DepartmentEvaluationModel,
};
pub use super::department_grade_ratios::{
    ActiveModel as DepartmentGradeRatioActiveModel, Entity as DepartmentGradeRatios,
    Model as DepartmentGradeRatioModel,
};
pub use super::evaluation_periods::{
    ActiveModel as EvaluationPeriodActiveModel, Entity as EvaluationPeriods,
    Model as EvaluationPeriodModel,
};
pub use super::evaluation_weights::{
    ActiveModel as EvaluationWeightActiveModel, Entity as EvaluationWeights,
    Model as EvaluationWeightModel,
};
pub use super::final_evaluations::{
    ActiveModel as FinalEvaluationActiveModel, Entity as FinalEvaluations,
    Model as FinalEvaluationModel,
};
pub use super::grade_adjustment_locks::{
    ActiveModel as GradeAdjustmentLockActiveModel, Entity as GradeAdjustmentLocks,
    Model as GradeAdjustmentLockModel,
};
pub use super::organizations::{
    ActiveModel as OrganizationActiveModel, Entity as Organizations, Model as OrganizationModel,
};
pub use super::peer_evaluations::{
    ActiveModel as PeerEvaluationActiveModel, Entity as PeerEvaluations,
    Model as PeerEvaluationModel,
};
pub use super::pm_evaluations::{
    ActiveModel as PmEvaluationActiveModel, Entity as PmEvaluations, Model as PmEvaluationModel,
};
pub use super::project_members::{
    ActiveModel as ProjectMemberActiveModel, Entity as ProjectMembers, Model as ProjectMemberModel,
};
pub use super::projects::{ActiveModel as ProjectActiveModel, Entity as Projects, Model as ProjectModel};
pub use super::qualitative_evaluations::{
    ActiveModel as QualitativeEvaluationActiveModel, Entity as QualitativeEvaluations,
    Model as QualitativeEvaluationModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
