use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkycastError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SkycastError {
    /// Message suitable for showing in the status line.
    pub fn user_message(&self) -> String {
        match self {
            SkycastError::CityNotFound(_) => {
                "City not found. Please check the spelling and try again.".to_string()
            }
            SkycastError::InvalidInput(msg) => msg.clone(),
            SkycastError::Http(_) | SkycastError::Json(_) | SkycastError::DataSourceUnavailable(_) => {
                "Unable to fetch forecast data. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkycastError>;
