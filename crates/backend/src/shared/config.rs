use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub stores: StoresConfig,
    pub targets: TargetsConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoresConfig {
    /// Display order; empty falls back to the built-in order
    #[serde(default)]
    pub order: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TargetsConfig {
    pub annual: f64,
    pub monthly: f64,
    /// TOML file the edited targets are written to
    pub settings_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    pub data_sheet: String,
    pub staff_sheet_keywords: Vec<String>,
    pub store_sheet_names: Vec<String>,
    /// Workbooks loaded at startup
    #[serde(default)]
    pub files: Vec<ImportFileConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportFileConfig {
    pub path: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[logging]
dir = "target/logs"

[stores]
order = ["奈良", "天理", "生駒", "villa"]

[targets]
annual = 60000000
monthly = 6000000
settings_path = "target/settings/targets.toml"

[import]
data_sheet = "CSV計算"
staff_sheet_keywords = ["スタッフデータ", "スタッフ"]
store_sheet_names = ["表", "店舗リスト"]
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return load_config_from(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    default_config()
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn default_config() -> anyhow::Result<Config> {
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Resolves a configured path.
/// Relative paths are taken relative to the executable directory.
pub fn resolve_path(path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(candidate);
        }
    }

    // Fallback: relative to current directory
    PathBuf::from(path)
}
