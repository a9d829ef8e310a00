//! Path resolution: where the launcher lives and where the bundled
//! application root is.
//!
//! The launcher never changes its own working directory. The application root
//! is validated here and then passed explicitly to everything that resolves a
//! relative path (interpreter check, child working directory).

use std::io;
use std::path::{Path, PathBuf};

use pylaunch_core::config::LayoutConfig;

use crate::error::LaunchError;

/// Absolute path of the running launcher executable.
pub fn resolve_own_executable() -> Result<PathBuf, LaunchError> {
    std::env::current_exe().map_err(|source| LaunchError::PathResolution { source })
}

/// Directory containing the launcher executable.
pub fn launcher_dir(exe: &Path) -> Result<&Path, LaunchError> {
    exe.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| LaunchError::PathResolution {
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("executable path has no parent directory: {}", exe.display()),
            ),
        })
}

/// `<launcher dir>/<app_dir>`, independent of the launcher's own file name.
pub fn derive_app_root(exe: &Path, app_dir: &str) -> Result<PathBuf, LaunchError> {
    Ok(launcher_dir(exe)?.join(app_dir))
}

/// Resolved, immutable launch layout. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    own_executable: PathBuf,
    app_root: PathBuf,
    interpreter: PathBuf,
    entry_script: PathBuf,
}

impl LauncherConfig {
    pub fn from_executable(exe: PathBuf, layout: &LayoutConfig) -> Result<Self, LaunchError> {
        let app_root = derive_app_root(&exe, &layout.app_dir)?;
        Ok(Self {
            own_executable: exe,
            app_root,
            interpreter: PathBuf::from(&layout.interpreter),
            entry_script: PathBuf::from(&layout.entry_script),
        })
    }

    pub fn own_executable(&self) -> &Path {
        &self.own_executable
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Interpreter path relative to the application root, as placed on the command line.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Entry script path relative to the application root.
    pub fn entry_script(&self) -> &Path {
        &self.entry_script
    }

    /// Interpreter resolved against the application root.
    pub fn interpreter_path(&self) -> PathBuf {
        self.app_root.join(&self.interpreter)
    }

    /// Check that the application root exists and is a directory. It becomes
    /// the child's working directory, so every relative path depends on it.
    pub fn ensure_app_root(&self) -> Result<(), LaunchError> {
        let meta = std::fs::metadata(&self.app_root).map_err(|source| {
            LaunchError::WorkingDirectory {
                path: self.app_root.clone(),
                source,
            }
        })?;
        if !meta.is_dir() {
            return Err(LaunchError::WorkingDirectory {
                path: self.app_root.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutConfig {
        LayoutConfig {
            app_dir: "program".to_string(),
            interpreter: "runtime/python".to_string(),
            entry_script: "main.py".to_string(),
        }
    }

    #[test]
    fn test_app_root_ignores_executable_name() {
        let base = std::env::temp_dir().join("install");
        let a = derive_app_root(&base.join("Launcher.exe"), "program").unwrap();
        let b = derive_app_root(&base.join("renamed-tool"), "program").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, base.join("program"));
    }

    #[test]
    fn test_bare_file_name_has_no_launcher_dir() {
        let err = derive_app_root(Path::new("launcher"), "program").unwrap_err();
        assert!(matches!(err, LaunchError::PathResolution { .. }));
    }

    #[test]
    fn test_config_paths() {
        let base = std::env::temp_dir().join("install");
        let cfg = LauncherConfig::from_executable(base.join("launcher"), &layout()).unwrap();
        assert_eq!(cfg.own_executable(), base.join("launcher"));
        assert_eq!(cfg.app_root(), base.join("program"));
        assert_eq!(cfg.interpreter(), Path::new("runtime/python"));
        assert_eq!(cfg.entry_script(), Path::new("main.py"));
        assert_eq!(cfg.interpreter_path(), base.join("program").join("runtime/python"));
    }

    #[test]
    fn test_ensure_app_root() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("launcher");
        let cfg = LauncherConfig::from_executable(exe, &layout()).unwrap();

        let err = cfg.ensure_app_root().unwrap_err();
        assert!(matches!(err, LaunchError::WorkingDirectory { .. }));

        std::fs::write(dir.path().join("program"), b"not a dir").unwrap();
        assert!(matches!(
            cfg.ensure_app_root(),
            Err(LaunchError::WorkingDirectory { .. })
        ));

        std::fs::remove_file(dir.path().join("program")).unwrap();
        std::fs::create_dir(dir.path().join("program")).unwrap();
        cfg.ensure_app_root().unwrap();
    }
}
