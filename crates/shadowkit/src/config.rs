//! Layered `shadowkit.toml` configuration.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from shadowkit.toml)
//! - `~/.config/shadowkit/shadowkit.toml`
//! - `./shadowkit.toml`

use crate::TracingConfig;
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shadowkit_cache::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_FILE_NAME, DirectoryResources, PropertiesLoader,
    PropertiesLoaderConfig,
};
use shadowkit_core::{FeatureCatalog, FeatureRegistry};
use shadowkit_error::{ConfigError, ConfigSource, ShadowkitResult};
use std::path::PathBuf;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../shadowkit.toml");

/// The `[properties]` section: where the properties loader looks.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct PropertiesSection {
    /// Resource file name inside each namespace directory
    #[serde(default = "default_file_name")]
    #[setters(into)]
    file_name: String,

    /// Number of namespaces kept in memory
    #[serde(default = "default_cache_capacity")]
    cache_capacity: usize,

    /// Directories searched for resources, first hit wins
    #[serde(default)]
    resource_roots: Vec<PathBuf>,
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for PropertiesSection {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            cache_capacity: default_cache_capacity(),
            resource_roots: Vec::new(),
        }
    }
}

/// The `[features]` section: registries replacing the platform ones.
///
/// Each list keeps its order, which is the registry's enumeration order.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option)]
pub struct FeaturesSection {
    /// Features recognized for decoders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decoder: Option<FeatureRegistry>,

    /// Features recognized for encoders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encoder: Option<FeatureRegistry>,
}

/// Top-level shadowkit configuration.
///
/// # Example
///
/// ```no_run
/// use shadowkit::ShadowkitConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ShadowkitConfig::load()?;
/// let mut loader = config.properties_loader();
/// let catalog = config.feature_catalog();
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct ShadowkitConfig {
    /// Properties loader settings
    #[serde(default)]
    properties: PropertiesSection,

    /// Feature registry overrides
    #[serde(default)]
    features: FeaturesSection,

    /// Log output settings
    #[serde(default)]
    tracing: TracingConfig,
}

impl ShadowkitConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ShadowkitResult<Self> {
        debug!("Loading configuration from file");

        let path = path.as_ref();
        let config: Self = Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(|e| ConfigError::in_file(path, format!("Failed to read configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::in_file(path, format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Only the bundled defaults, ignoring user files.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file does not parse.
    pub fn bundled() -> ShadowkitResult<Self> {
        Self::from_builder(
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
            ConfigSource::File("bundled shadowkit.toml".to_string()),
        )
    }

    /// Load configuration with precedence: current dir > home dir > bundled.
    ///
    /// User config files are optional and skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file cannot be parsed, or the merged
    /// result is invalid.
    #[instrument]
    pub fn load() -> ShadowkitResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/shadowkit/shadowkit.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("shadowkit").required(false));

        Self::from_builder(builder, ConfigSource::Layered)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        origin: ConfigSource,
    ) -> ShadowkitResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ConfigError::new(origin.clone(), format!("Failed to build configuration: {}", e))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(origin, format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty properties file name or a zero
    /// cache capacity.
    pub fn validate(&self) -> ShadowkitResult<()> {
        if self.properties.file_name.trim().is_empty() {
            return Err(ConfigError::in_section("properties", "file_name must not be empty").into());
        }
        if self.properties.cache_capacity == 0 {
            return Err(ConfigError::in_section("properties", "cache_capacity must be positive").into());
        }
        Ok(())
    }

    /// Feature catalog: the platform registries, with any configured
    /// `[features]` list replacing the one for its role.
    pub fn feature_catalog(&self) -> FeatureCatalog {
        let decoder = self
            .features
            .decoder
            .clone()
            .unwrap_or_else(FeatureRegistry::decoder_defaults);
        let encoder = self
            .features
            .encoder
            .clone()
            .unwrap_or_else(FeatureRegistry::encoder_defaults);
        debug!(
            decoder_features = decoder.len(),
            encoder_features = encoder.len(),
            "Assembled feature catalog"
        );
        FeatureCatalog::new(decoder, encoder)
    }

    /// Loader settings from the `[properties]` section.
    pub fn properties_loader_config(&self) -> PropertiesLoaderConfig {
        PropertiesLoaderConfig::default()
            .with_file_name(self.properties.file_name.clone())
            .with_capacity(self.properties.cache_capacity)
    }

    /// A loader searching the configured resource roots.
    pub fn properties_loader(&self) -> PropertiesLoader<DirectoryResources> {
        PropertiesLoader::new(
            self.properties_loader_config(),
            DirectoryResources::new(self.properties.resource_roots.iter().cloned()),
        )
    }
}
