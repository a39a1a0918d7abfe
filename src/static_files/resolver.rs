//! Request-target to file path mapping
//!
//! `/` maps to the default document, a single leading `/` is stripped and
//! the rest is joined onto the root directory. The relative part is
//! normalized first: a `..` that climbs above the root, or an absolute
//! component, is rejected. Symlinks leading out of the root are rejected
//! after the file is found.

use std::path::{Component, Path, PathBuf};

/// Why a request-target has no file to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// No regular file at the resolved path
    NotFound,
    /// The target points outside the root directory
    OutsideRoot,
}

/// Maps a request-target to a path relative to the root.
pub fn local_path(default_document: &str, target: &str) -> Result<PathBuf, ResolveError> {
    let target = if target == "/" { default_document } else { target };
    let target = target.strip_prefix('/').unwrap_or(target);

    normalize(Path::new(target))
}

/// Resolves a request-target to an existing regular file under `root`.
pub async fn resolve(
    root: &Path,
    default_document: &str,
    target: &str,
) -> Result<PathBuf, ResolveError> {
    let candidate = root.join(local_path(default_document, target)?);

    let metadata = tokio::fs::metadata(&candidate)
        .await
        .map_err(|_| ResolveError::NotFound)?;

    if !metadata.is_file() {
        return Err(ResolveError::NotFound);
    }

    ensure_within_root(root, &candidate).await?;
    Ok(candidate)
}

fn normalize(path: &Path) -> Result<PathBuf, ResolveError> {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(ResolveError::OutsideRoot);
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(ResolveError::OutsideRoot),
        }
    }

    Ok(normalized)
}

async fn ensure_within_root(root: &Path, candidate: &Path) -> Result<(), ResolveError> {
    let root = tokio::fs::canonicalize(root)
        .await
        .map_err(|_| ResolveError::NotFound)?;
    let file = tokio::fs::canonicalize(candidate)
        .await
        .map_err(|_| ResolveError::NotFound)?;

    if file.starts_with(&root) {
        Ok(())
    } else {
        Err(ResolveError::OutsideRoot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_default_document() {
        assert_eq!(local_path("index.html", "/"), Ok(PathBuf::from("index.html")));
    }

    #[test]
    fn dot_segments_inside_root_are_collapsed() {
        assert_eq!(
            local_path("index.html", "/a/./b/../c.txt"),
            Ok(PathBuf::from("a/c.txt"))
        );
    }

    #[test]
    fn climbing_above_root_is_rejected() {
        assert_eq!(
            local_path("index.html", "/../etc/passwd"),
            Err(ResolveError::OutsideRoot)
        );
        assert_eq!(
            local_path("index.html", "/a/../../secret"),
            Err(ResolveError::OutsideRoot)
        );
    }

    #[test]
    fn double_slash_absolute_path_is_rejected() {
        assert_eq!(
            local_path("index.html", "//etc/passwd"),
            Err(ResolveError::OutsideRoot)
        );
    }
}
