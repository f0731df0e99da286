use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_org_tables::{EvaluationPeriods, Organizations, Projects, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 同事评价表（7 项细分得分） ====================
        manager
            .create_table(
                Table::create()
                    .table(PeerEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PeerEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PeerEvaluations::EvaluatorId).big_integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::EvaluateeId).big_integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::ProjectId).big_integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::PeriodId).big_integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::Score1).integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::Score2).integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::Score3).integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::Score4).integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::Score5).integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::Score6).integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::Score7).integer().not_null())
                    .col(ColumnDef::new(PeerEvaluations::Comment).text().null())
                    .col(ColumnDef::new(PeerEvaluations::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(PeerEvaluations::Table, PeerEvaluations::EvaluateeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PeerEvaluations::Table, PeerEvaluations::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PeerEvaluations::Table, PeerEvaluations::PeriodId)
                            .to(EvaluationPeriods::Table, EvaluationPeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== PM 评价表 ====================
        manager
            .create_table(
                Table::create()
                    .table(PmEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PmEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PmEvaluations::EvaluatorId).big_integer().not_null())
                    .col(ColumnDef::new(PmEvaluations::EvaluateeId).big_integer().not_null())
                    .col(ColumnDef::new(PmEvaluations::ProjectId).big_integer().not_null())
                    .col(ColumnDef::new(PmEvaluations::PeriodId).big_integer().not_null())
                    .col(ColumnDef::new(PmEvaluations::Score).integer().not_null())
                    .col(ColumnDef::new(PmEvaluations::Comment).text().null())
                    .col(ColumnDef::new(PmEvaluations::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(PmEvaluations::Table, PmEvaluations::EvaluateeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PmEvaluations::Table, PmEvaluations::PeriodId)
                            .to(EvaluationPeriods::Table, EvaluationPeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 定性评价表 ====================
        manager
            .create_table(
                Table::create()
                    .table(QualitativeEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QualitativeEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QualitativeEvaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QualitativeEvaluations::EvaluateeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QualitativeEvaluations::PeriodId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QualitativeEvaluations::QualitativeScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QualitativeEvaluations::DepartmentContributionScore)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QualitativeEvaluations::Feedback).text().null())
                    .col(
                        ColumnDef::new(QualitativeEvaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                QualitativeEvaluations::Table,
                                QualitativeEvaluations::EvaluateeId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QualitativeEvaluations::Table, QualitativeEvaluations::PeriodId)
                            .to(EvaluationPeriods::Table, EvaluationPeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 最终评价表 ====================
        manager
            .create_table(
                Table::create()
                    .table(FinalEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinalEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FinalEvaluations::EvaluateeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinalEvaluations::PeriodId).big_integer().not_null())
                    .col(ColumnDef::new(FinalEvaluations::PeerScore).double().not_null())
                    .col(ColumnDef::new(FinalEvaluations::PmScore).double().not_null())
                    .col(
                        ColumnDef::new(FinalEvaluations::QualitativeScore)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinalEvaluations::FinalScore).double().not_null())
                    .col(ColumnDef::new(FinalEvaluations::Grade).string().null())
                    .col(ColumnDef::new(FinalEvaluations::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(FinalEvaluations::Table, FinalEvaluations::EvaluateeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FinalEvaluations::Table, FinalEvaluations::PeriodId)
                            .to(EvaluationPeriods::Table, EvaluationPeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 部门等级配额比例表 ====================
        manager
            .create_table(
                Table::create()
                    .table(DepartmentGradeRatios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DepartmentGradeRatios::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DepartmentGradeRatios::DepartmentGrade)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DepartmentGradeRatios::SRatio).double().not_null())
                    .col(ColumnDef::new(DepartmentGradeRatios::ARatio).double().not_null())
                    .to_owned(),
            )
            .await?;

        // ==================== 部门周期评级表 ====================
        manager
            .create_table(
                Table::create()
                    .table(DepartmentEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DepartmentEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DepartmentEvaluations::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DepartmentEvaluations::PeriodId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DepartmentEvaluations::Grade).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(DepartmentEvaluations::Table, DepartmentEvaluations::DepartmentId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DepartmentEvaluations::Table, DepartmentEvaluations::PeriodId)
                            .to(EvaluationPeriods::Table, EvaluationPeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 角色评价权重表 ====================
        manager
            .create_table(
                Table::create()
                    .table(EvaluationWeights::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationWeights::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EvaluationWeights::Role).string().not_null())
                    .col(ColumnDef::new(EvaluationWeights::Item).string().not_null())
                    .col(ColumnDef::new(EvaluationWeights::Weight).double().not_null())
                    .to_owned(),
            )
            .await?;

        // ==================== 唯一索引（upsert 键） ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_peer_evaluations_key")
                    .table(PeerEvaluations::Table)
                    .col(PeerEvaluations::EvaluatorId)
                    .col(PeerEvaluations::EvaluateeId)
                    .col(PeerEvaluations::ProjectId)
                    .col(PeerEvaluations::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_pm_evaluations_key")
                    .table(PmEvaluations::Table)
                    .col(PmEvaluations::EvaluatorId)
                    .col(PmEvaluations::EvaluateeId)
                    .col(PmEvaluations::ProjectId)
                    .col(PmEvaluations::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_qualitative_evaluations_evaluatee_period")
                    .table(QualitativeEvaluations::Table)
                    .col(QualitativeEvaluations::EvaluateeId)
                    .col(QualitativeEvaluations::PeriodId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_final_evaluations_evaluatee_period")
                    .table(FinalEvaluations::Table)
                    .col(FinalEvaluations::EvaluateeId)
                    .col(FinalEvaluations::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_department_evaluations_dept_period")
                    .table(DepartmentEvaluations::Table)
                    .col(DepartmentEvaluations::DepartmentId)
                    .col(DepartmentEvaluations::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_evaluation_weights_role_item")
                    .table(EvaluationWeights::Table)
                    .col(EvaluationWeights::Role)
                    .col(EvaluationWeights::Item)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EvaluationWeights::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DepartmentEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DepartmentGradeRatios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FinalEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QualitativeEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PmEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PeerEvaluations::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PeerEvaluations {
    #[sea_orm(iden = "peer_evaluations")]
    Table,
    Id,
    EvaluatorId,
    EvaluateeId,
    ProjectId,
    PeriodId,
    #[sea_orm(iden = "score_1")]
    Score1,
    #[sea_orm(iden = "score_2")]
    Score2,
    #[sea_orm(iden = "score_3")]
    Score3,
    #[sea_orm(iden = "score_4")]
    Score4,
    #[sea_orm(iden = "score_5")]
    Score5,
    #[sea_orm(iden = "score_6")]
    Score6,
    #[sea_orm(iden = "score_7")]
    Score7,
    Comment,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PmEvaluations {
    #[sea_orm(iden = "pm_evaluations")]
    Table,
    Id,
    EvaluatorId,
    EvaluateeId,
    ProjectId,
    PeriodId,
    Score,
    Comment,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QualitativeEvaluations {
    #[sea_orm(iden = "qualitative_evaluations")]
    Table,
    Id,
    EvaluatorId,
    EvaluateeId,
    PeriodId,
    QualitativeScore,
    DepartmentContributionScore,
    Feedback,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FinalEvaluations {
    #[sea_orm(iden = "final_evaluations")]
    Table,
    Id,
    EvaluateeId,
    PeriodId,
    PeerScore,
    PmScore,
    QualitativeScore,
    FinalScore,
    Grade,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DepartmentGradeRatios {
    #[sea_orm(iden = "department_grade_ratios")]
    Table,
    Id,
    DepartmentGrade,
    SRatio,
    ARatio,
}

#[derive(DeriveIden)]
enum DepartmentEvaluations {
    #[sea_orm(iden = "department_evaluations")]
    Table,
    Id,
    DepartmentId,
    PeriodId,
    Grade,
}

#[derive(DeriveIden)]
enum EvaluationWeights {
    #[sea_orm(iden = "evaluation_weights")]
    Table,
    Id,
    Role,
    Item,
    Weight,
}
