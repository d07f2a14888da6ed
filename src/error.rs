use thiserror::Error;

/// Crate specific errors, raised only while parsing an expression.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Empty expression or wrong number of whitespace separated fields.
    #[error("malformed cron expression: {0}")]
    MalformedExpression(String),
    /// Non-numeric or non-positive step after `/`.
    #[error("invalid step: {0}")]
    InvalidStep(String),
    /// Token is neither a known name nor an integer.
    #[error("invalid token: {0}")]
    InvalidToken(String),
    /// Value lies outside the legal bounds of its field.
    #[error("value out of range: {0}")]
    OutOfRange(String),
    /// Range start is greater than its end.
    #[error("invalid range: {0}")]
    InvalidRange(String),
}
