//! Configuration management for seatwise.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seat::SEATS_PER_PLANE;
use crate::storage::ConflictPolicy;
use crate::store::StoreKind;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "seatwise";

/// Default CSV file name.
const CSV_FILE_NAME: &str = "passengers.csv";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "SEATWISE_";

/// Separates the section from the key in an environment override.
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (`SEATWISE_<SECTION>__<KEY>`)
/// 2. TOML config file at `~/.config/seatwise/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Registry configuration.
    pub registry: RegistryConfig,
    /// CSV import configuration.
    pub csv: CsvConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the passenger CSV file.
    /// Defaults to `~/.local/share/seatwise/passengers.csv`
    pub csv_path: Option<PathBuf>,
    /// Write the CSV back after every mutating command.
    pub autosave: bool,
}

/// Registry-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Storage backend.
    pub backend: StoreKind,
    /// Upper bound on the number of planes.
    pub max_planes: u32,
    /// Passenger slots per plane on the array backend.
    pub plane_capacity: usize,
    /// Generated IDs are always greater than this.
    pub id_floor: u64,
    /// Reject a reservation whose name is already registered.
    pub unique_names: bool,
}

/// How CSV loading resolves two lines claiming the same seat.
///
/// Both backends default to [`ConflictPolicy::Overflow`]. The CSV carries no
/// plane column, so any other policy folds a multi-plane registry onto
/// plane 1 when it is reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Policy when the array backend is active.
    pub array_conflict: ConflictPolicy,
    /// Policy when the list backend is active.
    pub list_conflict: ConflictPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            csv_path: None, // Will be resolved to default at runtime
            autosave: true,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: StoreKind::Array,
            max_planes: 100,
            plane_capacity: SEATS_PER_PLANE,
            id_floor: 99_999,
            unique_names: true,
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            array_conflict: ConflictPolicy::Overflow,
            list_conflict: ConflictPolicy::Overflow,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables, e.g. `SEATWISE_REGISTRY__MAX_PLANES=3`
    ///
    /// Section and key are joined by a double underscore so that keys such
    /// as `max_planes` keep their own underscores.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.registry.max_planes == 0 {
            return Err(Error::ConfigValidation {
                message: "max_planes must be at least 1".to_string(),
            });
        }

        if self.registry.plane_capacity == 0 || self.registry.plane_capacity > SEATS_PER_PLANE {
            return Err(Error::ConfigValidation {
                message: format!(
                    "plane_capacity ({}) must be between 1 and {SEATS_PER_PLANE}",
                    self.registry.plane_capacity
                ),
            });
        }

        Ok(())
    }

    /// Get the CSV path, resolving defaults if not set.
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.storage
            .csv_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(CSV_FILE_NAME))
    }

    /// Conflict policy for loading into the given backend.
    #[must_use]
    pub fn conflict_policy_for(&self, kind: StoreKind) -> ConflictPolicy {
        match kind {
            StoreKind::Array => self.csv.array_conflict,
            StoreKind::List => self.csv.list_conflict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.autosave);
        assert_eq!(config.registry.backend, StoreKind::Array);
        assert!(config.registry.unique_names);
    }

    #[test]
    fn test_default_registry_config() {
        let registry = RegistryConfig::default();

        assert_eq!(registry.max_planes, 100);
        assert_eq!(registry.plane_capacity, 180);
        assert_eq!(registry.id_floor, 99_999);
    }

    #[test]
    fn test_default_csv_config() {
        let csv = CsvConfig::default();

        assert_eq!(csv.array_conflict, ConflictPolicy::Overflow);
        assert_eq!(csv.list_conflict, ConflictPolicy::Overflow);
    }

    #[test]
    fn test_conflict_policy_for_backend() {
        let mut config = Config::default();
        assert_eq!(
            config.conflict_policy_for(StoreKind::Array),
            ConflictPolicy::Overflow
        );
        assert_eq!(
            config.conflict_policy_for(StoreKind::List),
            ConflictPolicy::Overflow
        );

        config.csv.array_conflict = ConflictPolicy::Skip;
        assert_eq!(
            config.conflict_policy_for(StoreKind::Array),
            ConflictPolicy::Skip
        );
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_planes() {
        let mut config = Config::default();
        config.registry.max_planes = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_planes"));
    }

    #[test]
    fn test_validate_plane_capacity_bounds() {
        let mut config = Config::default();
        config.registry.plane_capacity = 0;
        assert!(config.validate().is_err());

        config.registry.plane_capacity = 181;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("plane_capacity"));

        config.registry.plane_capacity = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_csv_path_default() {
        let config = Config::default();
        let path = config.csv_path();

        assert!(path.to_string_lossy().contains("seatwise"));
        assert!(path.to_string_lossy().ends_with("passengers.csv"));
    }

    #[test]
    fn test_csv_path_custom() {
        let mut config = Config::default();
        config.storage.csv_path = Some(PathBuf::from("/custom/flight.csv"));

        assert_eq!(config.csv_path(), PathBuf::from("/custom/flight.csv"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("seatwise"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    // Loading reads the process environment, so these tests run inside a
    // figment `Jail` to keep `SEATWISE_*` variables from leaking between them.

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("missing.toml");
            let config = Config::load_from(Some(path)).map_err(|e| e.to_string())?;

            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [registry]
                backend = "list"
                max_planes = 3

                [csv]
                list_conflict = "skip"
                "#,
            )?;
            let path = jail.directory().join("config.toml");
            let config = Config::load_from(Some(path)).map_err(|e| e.to_string())?;

            assert_eq!(config.registry.backend, StoreKind::List);
            assert_eq!(config.registry.max_planes, 3);
            assert_eq!(config.registry.plane_capacity, 180);
            assert_eq!(config.csv.list_conflict, ConflictPolicy::Skip);
            assert_eq!(config.csv.array_conflict, ConflictPolicy::Overflow);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[registry]\nplane_capacity = 500\n")?;
            let result = Config::load_from(Some(jail.directory().join("config.toml")));

            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_multi_word_keys() {
        Jail::expect_with(|jail| {
            jail.set_env("SEATWISE_REGISTRY__MAX_PLANES", "3");
            jail.set_env("SEATWISE_REGISTRY__UNIQUE_NAMES", "false");
            jail.set_env("SEATWISE_STORAGE__CSV_PATH", "/srv/flight/passengers.csv");
            jail.set_env("SEATWISE_CSV__ARRAY_CONFLICT", "skip");
            let path = jail.directory().join("missing.toml");
            let config = Config::load_from(Some(path)).map_err(|e| e.to_string())?;

            assert_eq!(config.registry.max_planes, 3);
            assert!(!config.registry.unique_names);
            assert_eq!(config.csv_path(), PathBuf::from("/srv/flight/passengers.csv"));
            assert_eq!(config.csv.array_conflict, ConflictPolicy::Skip);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[registry]\nbackend = \"list\"\nid_floor = 500\n",
            )?;
            jail.set_env("SEATWISE_REGISTRY__ID_FLOOR", "900");
            let config = Config::load_from(Some(jail.directory().join("config.toml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.registry.backend, StoreKind::List);
            assert_eq!(config.registry.id_floor, 900);
            Ok(())
        });
    }

    #[test]
    fn test_registry_config_deserialize() {
        let json = r#"{"backend": "list", "unique_names": false}"#;
        let registry: RegistryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(registry.backend, StoreKind::List);
        assert!(!registry.unique_names);
        assert_eq!(registry.max_planes, 100);
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"array_conflict\":\"overflow\""));
        assert!(json.contains("\"backend\":\"array\""));
    }
}
