// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed contract input: {0}")]
    MalformedInput(String),

    #[error("data source error: {0}")]
    DataSource(#[from] mongodb::error::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
