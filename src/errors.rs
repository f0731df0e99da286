//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 业务规则类错误（权重、配额、平衡）在任何写入之前同步检测，不做重试；
//! 存储层错误原样向上传递，由调用方决定如何呈现。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_evaluation_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum EvaluationError {
            $($variant(String),)*
        }

        impl EvaluationError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EvaluationError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EvaluationError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EvaluationError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EvaluationError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EvaluationError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_evaluation_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Serialization("E005", "Serialization Error"),
    DateParse("E006", "Date Parse Error"),
    Validation("E007", "Validation Error"),
    Conflict("E008", "Conflict"),
    InvalidWeightSum("E101", "Invalid Weight Sum"),
    BalanceViolation("E102", "Balance Violation"),
    QuotaExceeded("E103", "Quota Exceeded"),
    QuotaUnavailable("E104", "Quota Unavailable"),
    PeriodNotFound("E105", "Period Not Found"),
    DepartmentNotFound("E106", "Department Not Found"),
    UserNotFound("E107", "User Not Found"),
    OrganizationCycle("E108", "Organization Cycle"),
    WeightsUnavailable("E109", "Evaluation Weights Unavailable"),
    PeriodClosed("E110", "Period Closed"),
}

impl EvaluationError {
    /// 是否为业务规则拒绝（而非基础设施故障）
    pub fn is_policy_violation(&self) -> bool {
        self.code().starts_with("E1")
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EvaluationError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EvaluationError {
    fn from(err: sea_orm::DbErr) -> Self {
        EvaluationError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EvaluationError {
    fn from(err: std::io::Error) -> Self {
        EvaluationError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EvaluationError {
    fn from(err: serde_json::Error) -> Self {
        EvaluationError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EvaluationError {
    fn from(err: chrono::ParseError) -> Self {
        EvaluationError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
