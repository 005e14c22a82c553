use crate::adapters::trello::{TrelloSettings, DEFAULT_API_BASE};
use crate::core::sync::BoardFailurePolicy;
use crate::core::verbs::VerbRegistry;
use crate::utils::error::{Result, SyncError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// 最多往回看一年
pub const MAX_SINCE_HOURS: u64 = 24 * 365;
const BOARD_FAILURE_POLICIES: &[&str] = &["abort", "skip"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub repository: RepositoryConfig,
    pub trello: TrelloConfig,
    #[serde(default)]
    pub sync: SyncOptions,
    /// 若有設定則整組取代預設動詞表
    pub verbs: Option<BTreeMap<String, String>>,
    pub error_handling: Option<ErrorHandlingConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub path: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrelloConfig {
    pub app_key: String,
    pub auth_token: String,
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncOptions {
    pub since_hours: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_board_failure: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
}

impl SyncConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SyncError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SyncError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRELLO_AUTH_TOKEN})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SyncError::config(e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("repository.path", &self.repository.path)?;
        if let Some(timeout) = self.repository.timeout_seconds {
            validation::validate_positive_number("repository.timeout_seconds", timeout, 1)?;
        }

        validation::validate_required_string("trello.app_key", &self.trello.app_key)?;
        validation::validate_required_string("trello.auth_token", &self.trello.auth_token)?;
        validation::validate_url("trello.api_base", self.api_base())?;
        if let Some(timeout) = self.trello.timeout_seconds {
            validation::validate_positive_number("trello.timeout_seconds", timeout, 1)?;
        }

        validation::validate_range("sync.since_hours", self.since_hours(), 1, MAX_SINCE_HOURS)?;

        if let Some(verbs) = &self.verbs {
            for (verb, list) in verbs {
                validation::validate_non_empty_string("verbs", verb)?;
                validation::validate_non_empty_string(&format!("verbs.{}", verb), list)?;
            }
        }

        validation::validate_one_of(
            "error_handling.on_board_failure",
            self.on_board_failure(),
            BOARD_FAILURE_POLICIES,
        )?;
        self.logging_format()?;

        Ok(())
    }

    pub fn repo_path(&self) -> &str {
        &self.repository.path
    }

    pub fn repository_timeout(&self) -> Duration {
        Duration::from_secs(self.repository.timeout_seconds.unwrap_or(120))
    }

    pub fn api_base(&self) -> &str {
        self.trello.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn trello_settings(&self) -> TrelloSettings {
        let mut settings = TrelloSettings::new(&self.trello.app_key, &self.trello.auth_token)
            .with_api_base(self.api_base());
        if let Some(timeout) = self.trello.timeout_seconds {
            settings.timeout = Duration::from_secs(timeout);
        }
        settings
    }

    pub fn since_hours(&self) -> u64 {
        self.sync.since_hours.unwrap_or(1)
    }

    pub fn lookback(&self) -> Result<chrono::Duration> {
        let hours = self.since_hours();
        let invalid = || SyncError::InvalidConfigValueError {
            field: "sync.since_hours".to_string(),
            value: hours.to_string(),
            reason: format!("Value must be between 1 and {}", MAX_SINCE_HOURS),
        };
        if !(1..=MAX_SINCE_HOURS).contains(&hours) {
            return Err(invalid());
        }
        let hours = i64::try_from(hours).map_err(|_| invalid())?;
        chrono::Duration::try_hours(hours).ok_or_else(invalid)
    }

    pub fn verb_registry(&self) -> VerbRegistry {
        match &self.verbs {
            Some(verbs) => VerbRegistry::new(verbs.iter().map(|(verb, list)| (verb, list.clone()))),
            None => VerbRegistry::default(),
        }
    }

    pub fn on_board_failure(&self) -> &str {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_board_failure.as_deref())
            .unwrap_or("abort")
    }

    pub fn board_failure_policy(&self) -> Result<BoardFailurePolicy> {
        self.on_board_failure().parse()
    }

    pub fn log_format(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or("compact")
    }

    pub fn logging_format(&self) -> Result<LogFormat> {
        self.log_format().parse()
    }
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
