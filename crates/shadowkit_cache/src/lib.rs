//! Bounded, memoizing loader for per-namespace properties resources.
//!
//! A namespace such as `com.example.media` maps to the resource
//! `com/example/media/shadowkit.properties`. The loader finds the resource
//! through a [`ResourceLocator`], parses it into [`ConfigProperties`] and keeps
//! the last few namespaces it loaded.
//!
//! # Example
//!
//! ```
//! use shadowkit_cache::{InMemoryResources, PropertiesLoader, PropertiesLoaderConfig};
//!
//! let resources = InMemoryResources::new()
//!     .with_resource("com/example/shadowkit.properties", "sdk=33\n");
//! let mut loader = PropertiesLoader::new(PropertiesLoaderConfig::default(), resources);
//!
//! let properties = loader.load("com.example").unwrap().unwrap();
//! assert_eq!(properties.get("sdk"), Some("33"));
//! assert!(loader.load("org.other").unwrap().is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod loader;
mod properties;
mod resources;

pub use loader::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_FILE_NAME, PropertiesLoader, PropertiesLoaderConfig,
    PropertiesLoaderConfigBuilder,
};
pub use properties::ConfigProperties;
pub use resources::{DirectoryResources, InMemoryResources, ResourceLocator};
pub use shadowkit_error::{PropertiesError, PropertiesErrorKind};
