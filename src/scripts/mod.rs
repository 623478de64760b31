//! Script lookup under the scripts directory.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The name is not a single plain file name (separators, `..`, absolute).
    #[error("Invalid script name: {0}")]
    InvalidName(String),
    #[error("Script not found: {0}")]
    NotFound(String),
}

/// Maps script names onto files inside one fixed directory.
#[derive(Debug, Clone)]
pub struct ScriptResolver {
    base: PathBuf,
}

impl ScriptResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `name` to an existing regular file under the base directory.
    pub async fn resolve(&self, name: &str) -> Result<PathBuf, ResolveError> {
        if !is_plain_name(name) {
            return Err(ResolveError::InvalidName(name.to_string()));
        }

        let path = self.base.join(name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(ResolveError::NotFound(name.to_string())),
        }
    }
}

/// Exactly one normal path component, no backslashes or NUL bytes.
fn is_plain_name(name: &str) -> bool {
    if name.is_empty() || name.contains('\\') || name.contains('\0') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains('/')
}
