use std::env;
use std::path::{Path, PathBuf};

/// Directories searched after `PATH`, the same ones Ansible adds when it
/// looks up a module's required binary.
const EXTRA_BIN_DIRS: &[&str] = &["/sbin", "/usr/sbin", "/usr/local/sbin"];

pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve `name` to an executable file. Names containing a path separator
/// are checked as given, bare names are looked up on `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    if name.contains(std::path::MAIN_SEPARATOR) {
        let path = expand_home(name);
        return if is_executable(&path) { Some(path) } else { None };
    }

    let mut dirs: Vec<PathBuf> = env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).collect())
        .unwrap_or_default();
    dirs.extend(EXTRA_BIN_DIRS.iter().map(PathBuf::from));

    dirs.into_iter()
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~/.fuel/inventory.toml"), home.join(".fuel/inventory.toml"));
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("/etc/fuel"), PathBuf::from("/etc/fuel"));
        assert_eq!(expand_home("relative/~/x"), PathBuf::from("relative/~/x"));
    }

    #[test]
    fn test_find_executable_absolute() {
        assert_eq!(find_executable("/bin/sh"), Some(PathBuf::from("/bin/sh")));
        assert_eq!(find_executable("/nonexistent/fuel"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_executable_skips_non_executables() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("fuel");
        fs::write(&plain, "#!/bin/sh\necho '[]'\n").unwrap();
        fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();
        assert_eq!(find_executable(plain.to_str().unwrap()), None);

        let subdir = dir.path().join("bin");
        fs::create_dir(&subdir).unwrap();
        assert_eq!(find_executable(subdir.to_str().unwrap()), None);

        fs::set_permissions(&plain, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(find_executable(plain.to_str().unwrap()), Some(plain.clone()));
    }

    #[test]
    fn test_find_executable_on_path() {
        let sh = find_executable("sh").unwrap();
        assert!(sh.ends_with("sh"));
        assert_eq!(find_executable("definitely-not-a-fuel-binary"), None);
    }
}
