//! # Monorepo Layout
//!
//! Services live two directories below the monorepo root
//! (`<root>/apps/<service>`). Paths are resolved lexically, the same way a
//! `../..` relative path would be, so the directories do not need to exist.

use std::path::{Component, Path, PathBuf};

/// Directory layout seen from a service's working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    service_dir: PathBuf,
    monorepo_root: PathBuf,
}

impl Layout {
    /// Build the layout for a service running from `service_dir`
    pub fn from_service_dir(service_dir: impl Into<PathBuf>) -> Self {
        let service_dir = normalize(&service_dir.into());
        let monorepo_root = normalize(&service_dir.join("..").join(".."));
        Self {
            service_dir,
            monorepo_root,
        }
    }

    /// Build the layout from the process working directory
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::from_service_dir(std::env::current_dir()?))
    }

    pub fn service_dir(&self) -> &Path {
        &self.service_dir
    }

    pub fn monorepo_root(&self) -> &Path {
        &self.monorepo_root
    }
}

/// Lexically collapse `.` and `..` components.
///
/// `..` at the filesystem root stays at the root; leading `..` on a relative
/// path is preserved.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    out.push("..");
                }
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_two_levels_up() {
        let layout = Layout::from_service_dir("/srv/mono/apps/api");
        assert_eq!(layout.service_dir(), Path::new("/srv/mono/apps/api"));
        assert_eq!(layout.monorepo_root(), Path::new("/srv/mono"));
    }

    #[test]
    fn test_root_clamps_at_filesystem_root() {
        let layout = Layout::from_service_dir("/api");
        assert_eq!(layout.monorepo_root(), Path::new("/"));
    }

    #[test]
    fn test_normalize_relative() {
        assert_eq!(normalize(Path::new("apps/api/../..")), PathBuf::from("."));
        assert_eq!(normalize(Path::new("api/../../..")), PathBuf::from("../.."));
        assert_eq!(normalize(Path::new("./a/./b")), PathBuf::from("a/b"));
    }
}
