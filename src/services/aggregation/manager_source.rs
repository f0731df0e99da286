//! PM 评分来源
//!
//! 普通成员的 PM 分来自各项目 PM 的评价；PM 角色本身（组长、室长）没有
//! 项目 PM 为其打分，使用周期内针对其本人的第一条 PM 评价代替每个项目的分数。

use std::str::FromStr;

use async_trait::async_trait;

use crate::errors::{EvaluationError, Result};
use crate::storage::Storage;

#[async_trait]
pub trait ManagerScoreSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// 被评价人在某项目上的 PM 分，没有评分时返回 None
    async fn manager_score(
        &self,
        storage: &dyn Storage,
        evaluatee_id: i64,
        project_id: i64,
        period_id: i64,
    ) -> Result<Option<f64>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    ProjectManager,
    SelfReported,
}

impl SourceKind {
    pub const PROJECT_MANAGER: &'static str = "project_manager";
    pub const SELF_REPORTED: &'static str = "self_reported";

    pub fn build(self) -> Box<dyn ManagerScoreSource> {
        match self {
            SourceKind::ProjectManager => Box::new(ProjectManagerSource),
            SourceKind::SelfReported => Box::new(SelfReportedSource),
        }
    }
}

impl FromStr for SourceKind {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            Self::PROJECT_MANAGER => Ok(SourceKind::ProjectManager),
            Self::SELF_REPORTED => Ok(SourceKind::SelfReported),
            _ => Err(EvaluationError::validation(format!(
                "未知的 PM 评分来源: '{s}'. 支持: project_manager, self_reported"
            ))),
        }
    }
}

/// 该项目上的第一条 PM 评价
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectManagerSource;

#[async_trait]
impl ManagerScoreSource for ProjectManagerSource {
    fn name(&self) -> &'static str {
        SourceKind::PROJECT_MANAGER
    }

    async fn manager_score(
        &self,
        storage: &dyn Storage,
        evaluatee_id: i64,
        project_id: i64,
        period_id: i64,
    ) -> Result<Option<f64>> {
        let scores = storage
            .list_manager_scores(evaluatee_id, project_id, period_id)
            .await?;
        Ok(scores.first().map(|s| f64::from(s.score)))
    }
}

/// 周期内针对本人的第一条 PM 评价，与项目无关
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfReportedSource;

#[async_trait]
impl ManagerScoreSource for SelfReportedSource {
    fn name(&self) -> &'static str {
        SourceKind::SELF_REPORTED
    }

    async fn manager_score(
        &self,
        storage: &dyn Storage,
        evaluatee_id: i64,
        _project_id: i64,
        period_id: i64,
    ) -> Result<Option<f64>> {
        let scores = storage
            .list_manager_scores_for_evaluatee(evaluatee_id, period_id)
            .await?;
        Ok(scores.first().map(|s| f64::from(s.score)))
    }
}
