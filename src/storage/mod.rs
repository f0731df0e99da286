use std::sync::Arc;

use crate::models::{
    evaluations::{
        entities::{EvaluationWeight, FinalEvaluation, ManagerScore, PeerScore, QualitativeScore},
        requests::{
            FinalEvaluationFields, ManagerScoreSubmission, PeerScoreSubmission,
            QualitativeScoreSubmission,
        },
    },
    organizations::entities::{DepartmentGradeRatio, Organization},
    participations::entities::{Participation, ProjectWeight},
    periods::{entities::EvaluationPeriod, requests::CreatePeriodRequest},
    users::entities::{User, UserRole},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 列出全部用户（按 ID 排序）
    async fn list_users(&self) -> Result<Vec<User>>;
    // 列出属于给定组织的用户
    async fn list_users_by_organizations(&self, organization_ids: &[i64]) -> Result<Vec<User>>;

    /// 组织与部门配额
    // 列出全部组织
    async fn list_organizations(&self) -> Result<Vec<Organization>>;
    // 部门在周期内的评级
    async fn get_department_grade(
        &self,
        department_id: i64,
        period_id: i64,
    ) -> Result<Option<String>>;
    // 评级对应的 S/A 比例
    async fn get_grade_ratio(&self, department_grade: &str) -> Result<Option<DepartmentGradeRatio>>;

    /// 项目参与
    // 列出用户的全部参与
    async fn list_participations(&self, user_id: i64) -> Result<Vec<Participation>>;
    // 新增一条参与
    async fn add_participation(
        &self,
        user_id: i64,
        project_id: i64,
        is_pm: bool,
        weight: i32,
    ) -> Result<Participation>;
    // 在一个事务内整体替换用户的参与
    async fn replace_participations(
        &self,
        user_id: i64,
        weights: &[ProjectWeight],
    ) -> Result<Vec<Participation>>;

    /// 原始评分
    async fn list_peer_scores(
        &self,
        evaluatee_id: i64,
        project_id: i64,
        period_id: i64,
    ) -> Result<Vec<PeerScore>>;
    async fn list_manager_scores(
        &self,
        evaluatee_id: i64,
        project_id: i64,
        period_id: i64,
    ) -> Result<Vec<ManagerScore>>;
    // 被评价人在周期内的全部 PM 评分（按 ID 排序）
    async fn list_manager_scores_for_evaluatee(
        &self,
        evaluatee_id: i64,
        period_id: i64,
    ) -> Result<Vec<ManagerScore>>;
    // 被评价人在周期内的第一条定性评价
    async fn get_qualitative_score(
        &self,
        evaluatee_id: i64,
        period_id: i64,
    ) -> Result<Option<QualitativeScore>>;
    async fn upsert_peer_score(
        &self,
        evaluator_id: i64,
        period_id: i64,
        submission: PeerScoreSubmission,
    ) -> Result<PeerScore>;
    async fn upsert_manager_score(
        &self,
        evaluator_id: i64,
        period_id: i64,
        submission: ManagerScoreSubmission,
    ) -> Result<ManagerScore>;
    async fn upsert_qualitative_score(
        &self,
        evaluator_id: i64,
        period_id: i64,
        submission: QualitativeScoreSubmission,
    ) -> Result<QualitativeScore>;

    /// 角色评价权重
    async fn list_evaluation_weights(&self, role: UserRole) -> Result<Vec<EvaluationWeight>>;

    /// 最终评价
    // 写入汇总结果，不修改 grade
    async fn upsert_final_evaluation(
        &self,
        evaluatee_id: i64,
        period: &EvaluationPeriod,
        fields: FinalEvaluationFields,
    ) -> Result<FinalEvaluation>;
    // user_ids 为 None 时列出周期内全部记录
    async fn list_final_evaluations(
        &self,
        period: &EvaluationPeriod,
        user_ids: Option<&[i64]>,
    ) -> Result<Vec<FinalEvaluation>>;
    // 在一个事务内批量更新等级
    async fn update_final_grades(
        &self,
        period: &EvaluationPeriod,
        grades: &[(i64, String)],
    ) -> Result<Vec<FinalEvaluation>>;
    // 持有 (部门, 周期) 锁的事务内读取成员评价，按 plan 的结果写入等级；
    // 同一部门同一周期的调用跨进程串行
    async fn adjust_final_grades(
        &self,
        department_id: i64,
        period: &EvaluationPeriod,
        member_ids: &[i64],
        plan: &(dyn for<'p> Fn(&'p [FinalEvaluation]) -> Result<Vec<(i64, String)>> + Send + Sync),
    ) -> Result<Vec<FinalEvaluation>>;

    /// 评估周期
    async fn list_periods(&self) -> Result<Vec<EvaluationPeriod>>;
    async fn get_period_by_name(&self, name: &str) -> Result<Option<EvaluationPeriod>>;
    async fn create_period(&self, period: CreatePeriodRequest) -> Result<EvaluationPeriod>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
