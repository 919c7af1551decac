use contracts::shared::settings::TargetSettings;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::config::TargetsConfig;

/// Target figures, seeded from config and persisted as TOML.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    current: RwLock<TargetSettings>,
}

impl SettingsStore {
    /// Reads `path` when it exists, otherwise starts from `defaults`.
    pub fn open(path: PathBuf, defaults: TargetSettings) -> anyhow::Result<Self> {
        let current = if path.exists() {
            tracing::info!("Loading target settings from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            defaults
        };
        Ok(Self {
            path,
            current: RwLock::new(current),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> TargetSettings {
        *self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn validate(targets: &TargetSettings) -> anyhow::Result<()> {
        if !targets.annual.is_finite() || !targets.monthly.is_finite() {
            anyhow::bail!("targets must be finite numbers");
        }
        if targets.annual < 0.0 || targets.monthly < 0.0 {
            anyhow::bail!("targets must not be negative");
        }
        Ok(())
    }

    /// Validates, writes the file and then swaps the in-memory value.
    pub fn update(&self, targets: TargetSettings) -> anyhow::Result<TargetSettings> {
        Self::validate(&targets)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(&targets)?)?;

        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = targets;
        tracing::info!(
            "Target settings saved: annual={}, monthly={}",
            targets.annual,
            targets.monthly
        );
        Ok(targets)
    }
}

static SETTINGS: OnceCell<SettingsStore> = OnceCell::new();

pub fn initialize_settings(config: &TargetsConfig, path: PathBuf) -> anyhow::Result<()> {
    let defaults = TargetSettings {
        annual: config.annual,
        monthly: config.monthly,
    };
    let store = SettingsStore::open(path, defaults)?;
    SETTINGS
        .set(store)
        .map_err(|_| anyhow::anyhow!("Settings store already initialized"))
}

pub fn get_settings() -> Option<&'static SettingsStore> {
    SETTINGS.get()
}

/// Current targets, falling back to the built-in defaults before initialization.
pub fn current_targets() -> TargetSettings {
    get_settings().map(SettingsStore::get).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("targets.toml"), TargetSettings::default())
            .unwrap();
        assert_eq!(store.get(), TargetSettings::default());
    }

    #[test]
    fn test_update_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings").join("targets.toml");
        let store = SettingsStore::open(path.clone(), TargetSettings::default()).unwrap();

        let updated = TargetSettings {
            annual: 72_000_000.0,
            monthly: 6_500_000.0,
        };
        store.update(updated).unwrap();
        assert_eq!(store.get(), updated);

        let reopened = SettingsStore::open(path, TargetSettings::default()).unwrap();
        assert_eq!(reopened.get(), updated);
    }

    #[test]
    fn test_update_rejects_negative_targets() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("t.toml"), TargetSettings::default())
            .unwrap();
        let result = store.update(TargetSettings {
            annual: -1.0,
            monthly: 0.0,
        });
        assert!(result.is_err());
        assert_eq!(store.get(), TargetSettings::default());
        assert!(!store.path().exists());
    }
}
