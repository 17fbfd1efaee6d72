//! 错误类型与恢复边界。

use crate::config::Config;
use std::sync::Arc;

/// 执行层错误的源类型。
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("query failed: {source}")]
    Execution {
        query: String,
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
    #[error("context canceled before query ran")]
    Canceled { query: String },
    #[error("context deadline exceeded before query ran")]
    DeadlineExceeded { query: String },
    #[error("entity `{entity}` has no executor bound")]
    NoExecutor { entity: String },
    #[error("cannot hydrate column `{column}`: {message}")]
    Hydration { column: String, message: String },
    #[error("migration aborted: {0}")]
    Fatal(Box<Error>),
}

impl Error {
    pub(crate) fn execution(query: &str, source: BoxError) -> Self {
        Self::Execution {
            query: query.to_string(),
            source: Arc::from(source),
        }
    }

    /// 出错的 SQL 文本（如果有）。
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Execution { query, .. }
            | Self::Canceled { query }
            | Self::DeadlineExceeded { query } => Some(query),
            Self::NoExecutor { .. } | Self::Hydration { .. } => None,
            Self::Fatal(inner) => inner.query(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// 升级为致命错误；已经是致命错误时保持不变。
    pub fn into_fatal(self) -> Self {
        match self {
            Self::Fatal(_) => self,
            other => Self::Fatal(Box::new(other)),
        }
    }
}

/// 操作边界：记录结构化日志，迁移模式下升级为致命错误。
pub(crate) fn recover(config: &Config, err: Error) -> Error {
    let message = match &err {
        Error::Fatal(inner) => inner.to_string(),
        other => other.to_string(),
    };
    tracing::error!(
        query = err.query().unwrap_or_default(),
        "\n[ERROR]: {}\n[MESSAGE]: {}\n[QUERY]: {}\n----------",
        error_label(&err),
        message,
        err.query().unwrap_or_default(),
    );
    if config.migration {
        err.into_fatal()
    } else {
        err
    }
}

fn error_label(err: &Error) -> &'static str {
    match err {
        Error::Execution { .. } => "execution",
        Error::Canceled { .. } => "canceled",
        Error::DeadlineExceeded { .. } => "deadline exceeded",
        Error::NoExecutor { .. } => "no executor",
        Error::Hydration { .. } => "hydration",
        Error::Fatal(inner) => error_label(inner),
    }
}
