//! Resource lookup: turns a fixture name into its text.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("resource not found: {name}")]
    NotFound { name: String },
    #[error("resource {name} is not valid UTF-8: {detail}")]
    InvalidEncoding { name: String, detail: String },
    #[error("failed to read resource {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

pub trait ResourceResolver {
    fn resolve(&self, name: &str) -> Result<String, ResolveError>;
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        (**self).resolve(name)
    }
}

/// Resolves names as relative paths below a fixture root directory.
///
/// Absolute names and names that climb out of the root with `..` never
/// resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let confined = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !confined {
            return None;
        }
        let path = self.root.join(relative);
        path.is_file().then_some(path)
    }
}

impl ResourceResolver for DirectoryResolver {
    fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        let Some(path) = self.locate(name) else {
            return Err(ResolveError::NotFound {
                name: name.to_owned(),
            });
        };
        tracing::debug!(resource = name, path = %path.display(), "resolving fixture resource");
        let bytes = fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ResolveError::NotFound {
                name: name.to_owned(),
            },
            _ => ResolveError::Io {
                name: name.to_owned(),
                source,
            },
        })?;
        String::from_utf8(bytes).map_err(|err| ResolveError::InvalidEncoding {
            name: name.to_owned(),
            detail: err.utf8_error().to_string(),
        })
    }
}

/// In-memory resources, e.g. fixtures compiled in with `include_str!`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedResolver {
    resources: BTreeMap<String, String>,
}

impl EmbeddedResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(name, contents);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        self.resources.insert(name.into(), contents.into());
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

impl ResourceResolver for EmbeddedResolver {
    fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                name: name.to_owned(),
            })
    }
}
