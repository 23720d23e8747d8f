use crate::analyzer::categorizer::{CategoryTag, parse_category_list};
use crate::analyzer::comparisons::DEFAULT_COMPARISON_COUNT;
use anyhow::{Context, Result, anyhow, bail};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".LiftWrapped";
const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_API_PORT: u16 = 7891;
pub const MAX_COMPARISON_COUNT: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub db_path: PathBuf,
    pub report_dir: PathBuf,
    pub api_port: u16,
    pub comparison_count: usize,
    pub allowed_categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_root_dir().join("db").join("workouts.db"),
            report_dir: default_report_dir(),
            api_port: DEFAULT_API_PORT,
            comparison_count: DEFAULT_COMPARISON_COUNT,
            allowed_categories: Vec::new(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        Ok(default_root_dir().join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
        config.comparison_count = clamp_comparison_count(config.comparison_count);

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;
        set_mode_600(&config_path)?;

        Ok(())
    }

    /// Tags from `allowed_categories`; unknown entries are skipped with a warning.
    pub fn category_filter(&self) -> Vec<CategoryTag> {
        parse_category_list(&self.allowed_categories)
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let normalized = normalize_config_key(key);

        match normalized {
            "db_path" => {
                self.db_path = expand_home(value.trim());
            }
            "report_dir" => {
                self.report_dir = expand_home(value.trim());
                fs::create_dir_all(&self.report_dir).with_context(|| {
                    format!(
                        "Failed to create report directory: {}",
                        self.report_dir.display()
                    )
                })?;
            }
            "api_port" => {
                self.api_port = value
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| anyhow!("api_port must be a number"))?;
            }
            "comparison_count" => {
                let parsed = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| anyhow!("comparison_count must be a number"))?;
                self.comparison_count = clamp_comparison_count(parsed);
            }
            "allowed_categories" => {
                let parts = value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>();
                self.allowed_categories = parse_category_list(&parts)
                    .into_iter()
                    .map(|tag| tag.as_str().to_string())
                    .collect();
            }
            _ => {
                bail!(
                    "Unsupported config key: {key}. Supported keys: db_path|db.path, report_dir|report.dir, api_port|api.port, comparison_count|comparisons.count, allowed_categories|comparisons.categories"
                );
            }
        }

        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Option<String> {
        match normalize_config_key(key) {
            "db_path" => Some(self.db_path.display().to_string()),
            "report_dir" => Some(self.report_dir.display().to_string()),
            "api_port" => Some(self.api_port.to_string()),
            "comparison_count" => Some(self.comparison_count.to_string()),
            "allowed_categories" => Some(self.allowed_categories.join(",")),
            _ => None,
        }
    }
}

fn normalize_config_key(key: &str) -> &str {
    match key {
        "db_path" | "db.path" => "db_path",
        "report_dir" | "report.dir" => "report_dir",
        "api_port" | "api.port" => "api_port",
        "comparison_count" | "comparisons.count" => "comparison_count",
        "allowed_categories" | "comparisons.categories" | "categories" => "allowed_categories",
        _ => key,
    }
}

pub fn clamp_comparison_count(count: usize) -> usize {
    count.clamp(1, MAX_COMPARISON_COUNT)
}

pub fn expand_home(raw: &str) -> PathBuf {
    raw.strip_prefix("~/")
        .and_then(|stripped| home_dir().map(|home| home.join(stripped)))
        .unwrap_or_else(|| PathBuf::from(raw))
}

pub fn default_report_dir() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("LiftWrapped")
        .join("reports")
}

fn default_root_dir() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn set_mode_600(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to set file permissions: {}", path.display()))?;
    }

    Ok(())
}
