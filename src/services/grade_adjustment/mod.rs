pub mod apply;
pub mod rules;

use std::sync::Arc;

use crate::errors::{EvaluationError, Result};
use crate::models::evaluations::{entities::FinalEvaluation, requests::GradeAdjustment};
use crate::models::users::entities::{User, UserRole};
use crate::services::organizations::OrganizationService;
use crate::storage::Storage;

pub use rules::QuotaLimits;

pub struct GradeAdjustmentService {
    storage: Arc<dyn Storage>,
    organizations: OrganizationService,
}

impl GradeAdjustmentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            organizations: OrganizationService::new(storage.clone()),
            storage,
        }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub(crate) fn organizations(&self) -> &OrganizationService {
        &self.organizations
    }

    // 调整部门等级
    pub async fn adjust_grades(
        &self,
        department_id: i64,
        period_name: &str,
        adjustments: &[GradeAdjustment],
        requester_role: UserRole,
    ) -> Result<Vec<FinalEvaluation>> {
        apply::adjust_grades(self, department_id, period_name, adjustments, requester_role).await
    }

    /// 推断调整的目标部门
    ///
    /// 室长调整自己所在的部门；管理员以第一个被调整用户所在的部门为准。
    pub async fn target_department(
        &self,
        requester: &User,
        adjustments: &[GradeAdjustment],
    ) -> Result<i64> {
        let owner = if requester.role == UserRole::Admin {
            let Some(first) = adjustments.first() else {
                return Err(EvaluationError::validation("调整列表为空，无法确定部门"));
            };
            self.storage
                .get_user_by_id(first.user_id)
                .await?
                .ok_or_else(|| {
                    EvaluationError::user_not_found(format!("用户不存在: {}", first.user_id))
                })?
        } else {
            requester.clone()
        };

        owner.organization_id.ok_or_else(|| {
            EvaluationError::department_not_found(format!("用户 {} 不属于任何部门", owner.id))
        })
    }
}
