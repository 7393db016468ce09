use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaneForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: i32,
        col: i32,
        rows: i32,
        cols: i32,
    },

    #[error("Placement Error: {0}")]
    Placement(String),
}

pub type PfResult<T> = Result<T, PlaneForgeError>;
