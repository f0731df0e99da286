pub mod aggregation;
pub mod grade_adjustment;
pub mod grading;
pub mod organizations;
pub mod participations;
pub mod periods;
pub mod scores;

pub use aggregation::AggregationService;
pub use grade_adjustment::GradeAdjustmentService;
pub use grading::GradingService;
pub use organizations::OrganizationService;
pub use participations::ParticipationService;
pub use periods::PeriodService;
pub use scores::ScoreService;
