use thiserror::Error;

/// 检查过程中唯一可能出现的错误：命令模式不是合法的正则表达式
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl CheckError {
    pub fn invalid_pattern(pattern: &str, source: regex::Error) -> Self {
        CheckError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            CheckError::InvalidPattern { pattern, .. } => pattern,
        }
    }
}
