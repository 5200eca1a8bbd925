use std::path::{Component, Path, PathBuf};

use sha2::{Digest, Sha256};

/// Returns `path` expressed relative to `base`.
///
/// Both paths are expected to be absolute; `None` is returned when no
/// relative form exists (e.g. a relative `path` against an absolute `base`).
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    pathdiff::diff_paths(path, base)
}

/// Renders a path with forward slashes, the separator Xcode expects in
/// workspace and project files.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// Lowercase hex SHA-256 digest of the given bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_to_nested() {
        let rel = relative_to(
            Path::new("/root/ModuleA/ModuleA.xcodeproj"),
            Path::new("/root"),
        )
        .unwrap();
        assert_eq!(rel, PathBuf::from("ModuleA/ModuleA.xcodeproj"));
    }

    #[test]
    fn test_relative_to_sibling() {
        let rel = relative_to(Path::new("/a/b/Core.xcodeproj"), Path::new("/a/c")).unwrap();
        assert_eq!(to_slash(&rel), "../b/Core.xcodeproj");
    }

    #[test]
    fn test_to_slash_absolute() {
        assert_eq!(to_slash(Path::new("/tmp/App")), "/tmp/App");
    }

    #[test]
    fn test_sha256_hex_is_stable() {
        assert_eq!(sha256_hex(b"abc").len(), 64);
        assert_eq!(sha256_hex(b"abc"), sha256_hex(b"abc"));
        assert_ne!(sha256_hex(b"abc"), sha256_hex(b"abd"));
    }
}
