use core::fmt;

#[derive(Debug)]
pub enum AppError {
    Csv(csv::Error),
    Duplicate(String),
    EndOfInput,
    Io(std::io::Error),
    Json(serde_json::Error),
    NotFound(String),
    ParseCommand(String),
    Regex(regex::Error),
    Validation(String),
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Regex(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Csv(e) => {
                write!(f, "CSV error: {}", e)
            }
            AppError::Duplicate(name) => {
                write!(f, "Contact '{}' already exists!", name)
            }
            AppError::EndOfInput => {
                write!(f, "Input stream closed")
            }
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::Json(e) => {
                write!(f, "Contact file is not valid JSON: {}", e)
            }
            AppError::NotFound(item) => {
                write!(f, "{} not found!", item)
            }
            AppError::ParseCommand(cmd) => {
                write!(f, "Unrecognized menu choice: '{}'", cmd)
            }
            AppError::Regex(e) => {
                write!(f, "Invalid validation pattern: {}", e)
            }
            AppError::Validation(msg) => {
                write!(f, "Validation failed: {}", msg)
            }
        }
    }
}
