use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}
