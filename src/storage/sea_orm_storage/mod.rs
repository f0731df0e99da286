//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod final_evaluations;
mod organizations;
mod participations;
mod periods;
mod scores;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{EvaluationError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        Self::open(&AppConfig::get().database).await
    }

    /// 按给定的数据库配置连接并运行迁移
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 使用已有连接创建实例并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| EvaluationError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 单连接的内存 SQLite 数据库，主要用于测试
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(opt).await.map_err(|e| {
            EvaluationError::database_connection(format!("内存数据库连接失败: {e}"))
        })?;

        Self::from_connection(db).await
    }

    /// 底层连接，供导入数据等管理操作使用
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EvaluationError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EvaluationError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| EvaluationError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    pub(crate) fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EvaluationError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn list_users_by_organizations(&self, organization_ids: &[i64]) -> Result<Vec<User>> {
        self.list_users_by_organizations_impl(organization_ids).await
    }

    // 组织模块
    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.list_organizations_impl().await
    }

    async fn get_department_grade(
        &self,
        department_id: i64,
        period_id: i64,
    ) -> Result<Option<String>> {
        self.get_department_grade_impl(department_id, period_id)
            .await
    }

    async fn get_grade_ratio(&self, department_grade: &str) -> Result<Option<DepartmentGradeRatio>> {
        self.get_grade_ratio_impl(department_grade).await
    }

    // 项目参与模块
    async fn list_participations(&self, user_id: i64) -> Result<Vec<Participation>> {
        self.list_participations_impl(user_id).await
    }

    async fn add_participation(
        &self,
        user_id: i64,
        project_id: i64,
        is_pm: bool,
        weight: i32,
    ) -> Result<Participation> {
        self.add_participation_impl(user_id, project_id, is_pm, weight)
            .await
    }

    async fn replace_participations(
        &self,
        user_id: i64,
        weights: &[ProjectWeight],
    ) -> Result<Vec<Participation>> {
        self.replace_participations_impl(user_id, weights).await
    }

    // 评分模块
    async fn list_peer_scores(
        &self,
        evaluatee_id: i64,
        project_id: i64,
        period_id: i64,
    ) -> Result<Vec<PeerScore>> {
        self.list_peer_scores_impl(evaluatee_id, project_id, period_id)
            .await
    }

    async fn list_manager_scores(
        &self,
        evaluatee_id: i64,
        project_id: i64,
        period_id: i64,
    ) -> Result<Vec<ManagerScore>> {
        self.list_manager_scores_impl(evaluatee_id, project_id, period_id)
            .await
    }

    async fn list_manager_scores_for_evaluatee(
        &self,
        evaluatee_id: i64,
        period_id: i64,
    ) -> Result<Vec<ManagerScore>> {
        self.list_manager_scores_for_evaluatee_impl(evaluatee_id, period_id)
            .await
    }

    async fn get_qualitative_score(
        &self,
        evaluatee_id: i64,
        period_id: i64,
    ) -> Result<Option<QualitativeScore>> {
        self.get_qualitative_score_impl(evaluatee_id, period_id)
            .await
    }

    async fn upsert_peer_score(
        &self,
        evaluator_id: i64,
        period_id: i64,
        submission: PeerScoreSubmission,
    ) -> Result<PeerScore> {
        self.upsert_peer_score_impl(evaluator_id, period_id, submission)
            .await
    }

    async fn upsert_manager_score(
        &self,
        evaluator_id: i64,
        period_id: i64,
        submission: ManagerScoreSubmission,
    ) -> Result<ManagerScore> {
        self.upsert_manager_score_impl(evaluator_id, period_id, submission)
            .await
    }

    async fn upsert_qualitative_score(
        &self,
        evaluator_id: i64,
        period_id: i64,
        submission: QualitativeScoreSubmission,
    ) -> Result<QualitativeScore> {
        self.upsert_qualitative_score_impl(evaluator_id, period_id, submission)
            .await
    }

    async fn list_evaluation_weights(&self, role: UserRole) -> Result<Vec<EvaluationWeight>> {
        self.list_evaluation_weights_impl(role).await
    }

    // 最终评价模块
    async fn upsert_final_evaluation(
        &self,
        evaluatee_id: i64,
        period: &EvaluationPeriod,
        fields: FinalEvaluationFields,
    ) -> Result<FinalEvaluation> {
        self.upsert_final_evaluation_impl(evaluatee_id, period, fields)
            .await
    }

    async fn list_final_evaluations(
        &self,
        period: &EvaluationPeriod,
        user_ids: Option<&[i64]>,
    ) -> Result<Vec<FinalEvaluation>> {
        self.list_final_evaluations_impl(period, user_ids).await
    }

    async fn update_final_grades(
        &self,
        period: &EvaluationPeriod,
        grades: &[(i64, String)],
    ) -> Result<Vec<FinalEvaluation>> {
        self.update_final_grades_impl(period, grades).await
    }

    async fn adjust_final_grades(
        &self,
        department_id: i64,
        period: &EvaluationPeriod,
        member_ids: &[i64],
        plan: &(dyn for<'p> Fn(&'p [FinalEvaluation]) -> Result<Vec<(i64, String)>> + Send + Sync),
    ) -> Result<Vec<FinalEvaluation>> {
        self.adjust_final_grades_impl(department_id, period, member_ids, plan)
            .await
    }

    // 评估周期模块
    async fn list_periods(&self) -> Result<Vec<EvaluationPeriod>> {
        self.list_periods_impl().await
    }

    async fn get_period_by_name(&self, name: &str) -> Result<Option<EvaluationPeriod>> {
        self.get_period_by_name_impl(name).await
    }

    async fn create_period(&self, period: CreatePeriodRequest) -> Result<EvaluationPeriod> {
        self.create_period_impl(period).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_is_inferred_from_its_shape() {
        assert_eq!(
            SeaOrmStorage::build_database_url("perfeval.db").unwrap(),
            "sqlite://perfeval.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u@h/db").is_ok());
        assert_eq!(
            SeaOrmStorage::build_database_url("redis://h").unwrap_err().code(),
            "E001"
        );
    }
}
