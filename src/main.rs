use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use human_panic::setup_panic;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use perfeval::config::AppConfig;
use perfeval::errors::{EvaluationError, Result};
use perfeval::models::evaluations::requests::{
    GradeAdjustment, ManagerScoreSubmission, PeerScoreSubmission, QualitativeScoreSubmission,
};
use perfeval::models::participations::{
    entities::ProjectWeight,
    requests::{AddParticipationRequest, OverwriteWeightsRequest},
};
use perfeval::models::periods::requests::CreatePeriodRequest;
use perfeval::runtime::lifetime;
use perfeval::services::{
    AggregationService, GradeAdjustmentService, GradingService,
    ParticipationService, PeriodService, ScoreService,
};
use perfeval::storage::Storage;

#[derive(Parser, Debug)]
#[command(
    name = "perfeval",
    about = "Aggregate evaluation scores and manage grades per evaluation period",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the period whose date range contains today
    ActivePeriod(TodayArgs),
    /// List every period with its active flag
    Periods(TodayArgs),
    /// Create an evaluation period
    CreatePeriod {
        #[arg(long)]
        name: String,
        /// First day of the period (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        /// Last day of the period, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,
    },
    /// Compute and store final scores for a period
    Aggregate {
        #[arg(long)]
        period: String,
        /// Only aggregate these users (repeatable); all users when omitted
        #[arg(long = "user")]
        users: Vec<i64>,
    },
    /// Map final scores to grades using the configured bands
    AssignGrades {
        #[arg(long)]
        period: String,
        /// Regrade rows that already have a grade
        #[arg(long)]
        overwrite: bool,
    },
    /// Apply grade overrides for a department
    Adjust(AdjustArgs),
    /// Replace a user's project weights; they must sum to 100
    SetWeights {
        #[arg(long)]
        user: i64,
        /// PROJECT_ID=WEIGHT (repeatable)
        #[arg(long = "weight", value_parser = parse_project_weight, required = true)]
        weights: Vec<ProjectWeight>,
    },
    /// Add a user to a project with the remaining weight
    AddMember {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        project: i64,
        /// Mark the user as the project's PM
        #[arg(long)]
        pm: bool,
    },
    /// Show a user's current project weights
    Weights {
        #[arg(long)]
        user: i64,
    },
    /// Submit raw scores from a JSON file
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
struct TodayArgs {
    /// Reference date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct AdjustArgs {
    #[arg(long)]
    period: String,
    /// User id of the person submitting the adjustment
    #[arg(long)]
    requester: i64,
    /// Target department; inferred from the requester when omitted
    #[arg(long)]
    department: Option<i64>,
    /// JSON array of {"user_id": .., "grade": ".."}
    #[arg(long)]
    file: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScoreKind {
    Peer,
    Pm,
    /// Admin-recorded PM score for a PM-role user (single object)
    PmSelf,
    Qualitative,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(value_enum)]
    kind: ScoreKind,
    #[arg(long)]
    evaluator: i64,
    #[arg(long)]
    period: String,
    /// JSON array of submissions (a single object for pm-self and qualitative)
    #[arg(long)]
    file: PathBuf,
    /// Reference date used to check the period is open (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}' (expected YYYY-MM-DD): {e}"))
}

fn parse_project_weight(value: &str) -> std::result::Result<ProjectWeight, String> {
    let (project, weight) = value
        .split_once('=')
        .ok_or_else(|| format!("expected PROJECT_ID=WEIGHT, got '{value}'"))?;
    Ok(ProjectWeight {
        project_id: project
            .trim()
            .parse()
            .map_err(|e| format!("invalid project id '{project}': {e}"))?,
        weight: weight
            .trim()
            .parse()
            .map_err(|e| format!("invalid weight '{weight}': {e}"))?,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn today_or(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // 记录程序启动时间
    let start_time = chrono::Utc::now();

    setup_panic!();
    let cli = Cli::parse();

    // 初始化配置
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志（输出到 stderr，stdout 只输出命令结果）
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    debug!(
        "{} {} starting in {} mode",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let startup = match lifetime::startup::prepare_startup().await {
        Ok(startup) => startup,
        Err(e) => return report_error(&e),
    };

    debug!(
        "Startup completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start_time)
            .num_milliseconds()
    );

    tokio::select! {
        res = run(cli.command, startup.storage) => match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => report_error(&e),
        },
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Command cancelled before completion");
            ExitCode::from(130)
        }
    }
}

fn report_error(error: &EvaluationError) -> ExitCode {
    #[cfg(debug_assertions)]
    eprintln!("{}", error.format_colored());
    #[cfg(not(debug_assertions))]
    eprintln!("[{}] {}", error.code(), error.format_simple());

    if error.is_policy_violation() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

async fn run(command: Command, storage: std::sync::Arc<dyn Storage>) -> Result<()> {
    match command {
        Command::ActivePeriod(args) => {
            let period = PeriodService::new(storage)
                .active_period(today_or(args.today))
                .await?;
            print_json(&period)
        }
        Command::Periods(args) => {
            let periods = PeriodService::new(storage)
                .list_periods(today_or(args.today))
                .await?;
            print_json(&periods)
        }
        Command::CreatePeriod { name, start, end } => {
            let period = PeriodService::new(storage)
                .create_period(CreatePeriodRequest {
                    name,
                    start_date: start,
                    end_date: end,
                })
                .await?;
            print_json(&period)
        }
        Command::Aggregate { period, users } => {
            let user_ids = (!users.is_empty()).then_some(users);
            let report = AggregationService::new(storage)?
                .aggregate_period(&period, user_ids)
                .await?;
            print_json(&report)
        }
        Command::AssignGrades { period, overwrite } => {
            let report = GradingService::new(storage)?
                .assign_grades(&period, overwrite)
                .await?;
            print_json(&report)
        }
        Command::Adjust(args) => run_adjust(args, storage).await,
        Command::SetWeights { user, weights } => {
            let participations = ParticipationService::new(storage)
                .overwrite_weights(OverwriteWeightsRequest {
                    user_id: user,
                    weights,
                })
                .await?;
            print_json(&participations)
        }
        Command::AddMember { user, project, pm } => {
            let participation = ParticipationService::new(storage)
                .add_participation(AddParticipationRequest {
                    user_id: user,
                    project_id: project,
                    is_pm: pm,
                })
                .await?;
            print_json(&participation)
        }
        Command::Weights { user } => {
            let weights = ParticipationService::new(storage)
                .resolve_weights(user)
                .await?;
            print_json(&weights)
        }
        Command::Submit(args) => run_submit(args, storage).await,
    }
}

async fn run_adjust(args: AdjustArgs, storage: std::sync::Arc<dyn Storage>) -> Result<()> {
    let adjustments: Vec<GradeAdjustment> = read_json(&args.file)?;
    let requester = storage
        .get_user_by_id(args.requester)
        .await?
        .ok_or_else(|| EvaluationError::user_not_found(format!("用户不存在: {}", args.requester)))?;

    let service = GradeAdjustmentService::new(storage);
    let department_id = match args.department {
        Some(id) => id,
        None => service.target_department(&requester, &adjustments).await?,
    };

    let updated = service
        .adjust_grades(department_id, &args.period, &adjustments, requester.role)
        .await?;
    print_json(&updated)
}

async fn run_submit(args: SubmitArgs, storage: std::sync::Arc<dyn Storage>) -> Result<()> {
    let service = ScoreService::new(storage, today_or(args.today));
    match args.kind {
        ScoreKind::Peer => {
            let submissions: Vec<PeerScoreSubmission> = read_json(&args.file)?;
            let saved = service
                .submit_peer_scores(args.evaluator, &args.period, submissions)
                .await?;
            print_json(&saved)
        }
        ScoreKind::Pm => {
            let submissions: Vec<ManagerScoreSubmission> = read_json(&args.file)?;
            let saved = service
                .submit_manager_scores(args.evaluator, &args.period, submissions)
                .await?;
            print_json(&saved)
        }
        ScoreKind::PmSelf => {
            let submission: ManagerScoreSubmission = read_json(&args.file)?;
            let saved = service
                .submit_pm_self_score(args.evaluator, &args.period, submission)
                .await?;
            print_json(&saved)
        }
        ScoreKind::Qualitative => {
            let submission: QualitativeScoreSubmission = read_json(&args.file)?;
            let saved = service
                .submit_qualitative_score(args.evaluator, &args.period, submission)
                .await?;
            print_json(&saved)
        }
    }
}
