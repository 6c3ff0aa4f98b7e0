use crate::core::aggregator::PageSize;
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_status")]
    pub default_status: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,
}

fn default_status() -> String {
    "WFH".to_string()
}
fn default_page_size() -> usize {
    5
}
fn default_watch_interval() -> u64 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_status: default_status(),
            page_size: default_page_size(),
            watch_interval_secs: default_watch_interval(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> AppResult<()> {
        self.default_status()?;
        self.page_size()?;
        if self.watch_interval_secs == 0 {
            return Err(AppError::Config(
                "watch_interval_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn default_status(&self) -> AppResult<Status> {
        Status::from_input(&self.default_status).ok_or_else(|| {
            AppError::Config(format!("invalid default_status '{}'", self.default_status))
        })
    }

    pub fn page_size(&self) -> AppResult<PageSize> {
        PageSize::try_from(self.page_size)
            .map_err(|_| AppError::Config(format!("invalid page_size {}", self.page_size)))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        // DB path: user provided or default
        let db_path = custom_db
            .map(PathBuf::from)
            .unwrap_or_else(Self::database_file);

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
