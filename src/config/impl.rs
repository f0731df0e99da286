use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

const ENV_PREFIX: &str = "PERFEVAL";

impl AppConfig {
    /// 默认值 + 配置文件 + 环境变量
    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("database.url", "perfeval.db")?
            .set_default("database.pool_size", 8)?
            .set_default("database.timeout", 30)?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            // PERFEVAL_EVALUATION__STRATEGY=role_weighted
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())
    }

    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut app_config: AppConfig = Self::builder()?.build()?.try_deserialize()?;

        // 0 表示按 CPU 核数并发汇总
        if app_config.evaluation.concurrency == 0 {
            app_config.evaluation.concurrency = num_cpus::get();
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// 启动时即可发现的配置错误
    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.pool_size == 0 {
            return Err(ConfigError::Message(
                "database.pool_size must be at least 1".to_string(),
            ));
        }
        if self.grading.bands.is_empty() {
            return Err(ConfigError::Message(
                "grading.bands must not be empty".to_string(),
            ));
        }
        if let Some(band) = self.grading.bands.iter().find(|b| !b.min_score.is_finite()) {
            return Err(ConfigError::Message(format!(
                "grading band '{}' has a non-finite min_score",
                band.grade
            )));
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppSettings, DatabaseConfig, EvaluationConfig, GradingConfig};

    fn sample() -> AppConfig {
        AppConfig {
            app: AppSettings {
                environment: "development".to_string(),
                log_level: "info".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                pool_size: 1,
                timeout: 5,
            },
            evaluation: EvaluationConfig::default(),
            grading: GradingConfig::default(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(sample().validate().is_ok());
        assert!(sample().is_development());
    }

    #[test]
    fn empty_bands_are_rejected() {
        let mut config = sample();
        config.grading.bands.clear();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.database.pool_size = 0;
        assert!(config.validate().is_err());
    }
}
