use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_org_tables::{EvaluationPeriods, Organizations};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 等级调整锁表 ====================
        // 每个 (部门, 周期) 一行，调整事务开始时先写这一行以取得写锁
        manager
            .create_table(
                Table::create()
                    .table(GradeAdjustmentLocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeAdjustmentLocks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradeAdjustmentLocks::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeAdjustmentLocks::PeriodId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeAdjustmentLocks::LockedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeAdjustmentLocks::Table, GradeAdjustmentLocks::DepartmentId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeAdjustmentLocks::Table, GradeAdjustmentLocks::PeriodId)
                            .to(EvaluationPeriods::Table, EvaluationPeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_grade_adjustment_locks_dept_period")
                    .table(GradeAdjustmentLocks::Table)
                    .col(GradeAdjustmentLocks::DepartmentId)
                    .col(GradeAdjustmentLocks::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GradeAdjustmentLocks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GradeAdjustmentLocks {
    #[sea_orm(iden = "grade_adjustment_locks")]
    Table,
    Id,
    DepartmentId,
    PeriodId,
    LockedAt,
}
