//! Bounded memoizing properties loader.

use crate::{ConfigProperties, DirectoryResources, ResourceLocator};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shadowkit_error::{PropertiesError, PropertiesErrorKind};
use std::collections::{HashMap, VecDeque};
use std::io::Read;
use std::sync::Arc;

/// File name looked up inside each namespace directory.
pub const DEFAULT_FILE_NAME: &str = "shadowkit.properties";

/// Number of namespaces kept when no capacity is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 3;

/// Configuration for [`PropertiesLoader`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct PropertiesLoaderConfig {
    /// File name of the properties resource in each namespace
    #[serde(default = "default_file_name")]
    #[builder(setter(into))]
    #[setters(into)]
    file_name: String,

    /// Maximum number of cached namespaces
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for PropertiesLoaderConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            capacity: default_capacity(),
        }
    }
}

/// Loads and memoizes the properties resource of each namespace.
///
/// Up to `capacity` namespaces stay cached. When a new namespace would exceed
/// that, the one inserted earliest is evicted; reading a cached namespace does
/// not refresh its position. Namespaces without a resource are not cached, so
/// a resource that appears later is picked up.
///
/// # Example
///
/// ```no_run
/// use shadowkit_cache::{DirectoryResources, PropertiesLoader, PropertiesLoaderConfig};
///
/// let resources = DirectoryResources::new(["config", "/etc/shadowkit"]);
/// let mut loader = PropertiesLoader::new(PropertiesLoaderConfig::default(), resources);
///
/// if let Some(properties) = loader.load("com.example.media")? {
///     println!("sdk = {:?}", properties.get("sdk"));
/// }
/// # Ok::<(), shadowkit_cache::PropertiesError>(())
/// ```
#[derive(Debug)]
pub struct PropertiesLoader<L = DirectoryResources> {
    config: PropertiesLoaderConfig,
    locator: L,
    entries: HashMap<String, Arc<ConfigProperties>>,
    insertion_order: VecDeque<String>,
}

impl<L: ResourceLocator> PropertiesLoader<L> {
    /// Create a loader reading resources through `locator`.
    pub fn new(config: PropertiesLoaderConfig, locator: L) -> Self {
        tracing::debug!(
            file_name = %config.file_name,
            capacity = config.capacity,
            "Creating new PropertiesLoader"
        );
        Self {
            config,
            locator,
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
        }
    }

    /// Properties for `namespace`, or `None` if it has no resource.
    ///
    /// # Errors
    ///
    /// Returns [`PropertiesErrorKind::Read`] if the resource exists but
    /// cannot be read, and [`PropertiesErrorKind::Malformed`] if its contents
    /// do not parse. Failures are not cached.
    #[tracing::instrument(skip(self), fields(cache_size = self.entries.len()))]
    pub fn load(
        &mut self,
        namespace: &str,
    ) -> Result<Option<Arc<ConfigProperties>>, PropertiesError> {
        if let Some(properties) = self.entries.get(namespace) {
            tracing::debug!("Cache hit");
            return Ok(Some(Arc::clone(properties)));
        }

        let resource = self.resource_name(namespace);
        let Some(properties) = self.read_resource(&resource)? else {
            tracing::debug!(resource = %resource, "No properties resource");
            return Ok(None);
        };

        let properties = Arc::new(properties);
        self.insert(namespace, Arc::clone(&properties));
        tracing::debug!(resource = %resource, keys = properties.len(), "Loaded properties");
        Ok(Some(properties))
    }

    /// Resource name for `namespace`: dots become slashes, then the file name
    /// is appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowkit_cache::{InMemoryResources, PropertiesLoader, PropertiesLoaderConfig};
    ///
    /// let loader = PropertiesLoader::new(PropertiesLoaderConfig::default(), InMemoryResources::new());
    /// assert_eq!(loader.resource_name("com.example"), "com/example/shadowkit.properties");
    /// assert_eq!(loader.resource_name(""), "shadowkit.properties");
    /// ```
    pub fn resource_name(&self, namespace: &str) -> String {
        if namespace.is_empty() {
            self.config.file_name.clone()
        } else {
            format!("{}/{}", namespace.replace('.', "/"), self.config.file_name)
        }
    }

    /// Whether `namespace` is currently cached.
    pub fn is_cached(&self, namespace: &str) -> bool {
        self.entries.contains_key(namespace)
    }

    /// Cached namespaces, oldest first.
    pub fn cached_namespaces(&self) -> impl Iterator<Item = &str> {
        self.insertion_order.iter().map(String::as_str)
    }

    /// Number of cached namespaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached namespace.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.insertion_order.clear();
        tracing::info!(cleared = count, "Cleared properties cache");
    }

    /// Loader configuration.
    pub fn config(&self) -> &PropertiesLoaderConfig {
        &self.config
    }

    /// Resource locator in use.
    pub fn locator(&self) -> &L {
        &self.locator
    }

    fn read_resource(&self, resource: &str) -> Result<Option<ConfigProperties>, PropertiesError> {
        let read_error = |err: std::io::Error| {
            PropertiesError::new(PropertiesErrorKind::Read {
                resource: resource.to_string(),
                reason: err.to_string(),
            })
        };

        let Some(mut reader) = self.locator.open(resource).map_err(read_error)? else {
            return Ok(None);
        };
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(read_error)?;
        ConfigProperties::from_latin1(resource, &bytes).map(Some)
    }

    fn insert(&mut self, namespace: &str, properties: Arc<ConfigProperties>) {
        self.entries.insert(namespace.to_string(), properties);
        self.insertion_order.push_back(namespace.to_string());

        while self.entries.len() > self.config.capacity {
            let Some(eldest) = self.insertion_order.pop_front() else {
                break;
            };
            tracing::debug!(namespace = %eldest, "Evicting eldest namespace");
            self.entries.remove(&eldest);
        }
    }
}
