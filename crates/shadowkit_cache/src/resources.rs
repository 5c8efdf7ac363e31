//! Where properties resources come from.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Opens named resources for reading.
///
/// `Ok(None)` means the resource does not exist. `Err` means it may exist but
/// could not be opened.
pub trait ResourceLocator: Debug {
    /// Open the resource called `name` (a `/`-separated relative path).
    fn open(&self, name: &str) -> io::Result<Option<Box<dyn Read>>>;
}

/// Looks resources up under an ordered list of directories.
///
/// The first root containing the resource wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryResources {
    roots: Vec<PathBuf>,
}

impl DirectoryResources {
    /// Search the given roots, in order.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Search roots in lookup order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn open_in(root: &Path, name: &str) -> io::Result<Option<File>> {
        let path = name
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(root.to_path_buf(), |path, segment| path.join(segment));
        match File::open(&path) {
            Ok(file) => Ok(Some(file)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl ResourceLocator for DirectoryResources {
    fn open(&self, name: &str) -> io::Result<Option<Box<dyn Read>>> {
        for root in &self.roots {
            if let Some(file) = Self::open_in(root, name)? {
                tracing::trace!(root = %root.display(), name, "Found resource");
                return Ok(Some(Box::new(BufReader::new(file))));
            }
        }
        Ok(None)
    }
}

/// Resources held in memory, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryResources {
    resources: HashMap<String, Vec<u8>>,
}

impl InMemoryResources {
    /// Create an empty set of resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, returning the updated set.
    pub fn with_resource(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(name, contents);
        self
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.resources.insert(name.into(), contents.into());
    }
}

impl ResourceLocator for InMemoryResources {
    fn open(&self, name: &str) -> io::Result<Option<Box<dyn Read>>> {
        Ok(self
            .resources
            .get(name)
            .map(|contents| Box::new(Cursor::new(contents.clone())) as Box<dyn Read>))
    }
}
