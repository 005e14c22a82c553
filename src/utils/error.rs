use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Could not connect to Trello: {message}")]
    AuthenticationError { message: String },

    #[error("Repository unavailable: {message}")]
    RepositoryError { message: String },

    #[error("Board service returned {status} for {endpoint}")]
    BoardServiceError { status: u16, endpoint: String },

    #[error("Board '{board}' not found")]
    BoardNotFound { board: String },

    #[error("Card #{card_id} not found on the {board} board")]
    CardNotFound { board: String, card_id: u32 },

    #[error("List '{list}' not found on the {board} board")]
    ListNotFound { board: String, list: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Connectivity,
    Resolution,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SyncError {
    pub fn config(message: impl Into<String>) -> Self {
        SyncError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::ConfigError { .. }
            | SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SyncError::AuthenticationError { .. } => ErrorCategory::Authentication,
            SyncError::GitError(_)
            | SyncError::ApiError(_)
            | SyncError::RepositoryError { .. }
            | SyncError::BoardServiceError { .. } => ErrorCategory::Connectivity,
            SyncError::BoardNotFound { .. }
            | SyncError::CardNotFound { .. }
            | SyncError::ListNotFound { .. } => ErrorCategory::Resolution,
            SyncError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Resolution => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Authentication => ErrorSeverity::High,
            ErrorCategory::Connectivity => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 解析失敗只影響單一看板的派送
    pub fn is_resolution_failure(&self) -> bool {
        self.category() == ErrorCategory::Resolution
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SyncError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
            SyncError::InvalidConfigValueError { field, .. }
            | SyncError::ConfigValidationError { field, .. } => {
                format!("Check the value of '{}' in the configuration file", field)
            }
            SyncError::ConfigError { .. } => {
                "Make sure the configuration file exists and is valid TOML".to_string()
            }
            SyncError::AuthenticationError { .. } => {
                "Perhaps your auth token has expired? Generate a new Trello token".to_string()
            }
            SyncError::GitError(_) | SyncError::RepositoryError { .. } => {
                "Check the repository path and that the repository is readable".to_string()
            }
            SyncError::ApiError(_) | SyncError::BoardServiceError { .. } => {
                "Check network connectivity to the Trello API and retry".to_string()
            }
            SyncError::BoardNotFound { .. } => {
                "Board names are matched exactly, including case".to_string()
            }
            SyncError::CardNotFound { .. } => {
                "Use the short card number shown on the board".to_string()
            }
            SyncError::ListNotFound { .. } => {
                "Make sure every verb maps to a list that exists on the board".to_string()
            }
            SyncError::IoError(_) => {
                "Run again with --verbose for details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Authentication => format!("Authentication failed: {}", self),
            ErrorCategory::Connectivity => format!("Connection problem: {}", self),
            ErrorCategory::Resolution => format!("Could not apply comment: {}", self),
            ErrorCategory::System => format!("Unexpected error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
