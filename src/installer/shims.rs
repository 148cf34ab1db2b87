use super::command_exec;
use crate::error::{JustInstallError, Result};
use crate::ui;
use crate::utils::paths;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates proxy executables in a directory on `PATH` through exeproxy.
#[derive(Debug, Clone)]
pub struct ShimCreator {
    pub shims_dir: PathBuf,
    /// exeproxy binary; shims are skipped when absent.
    pub proxy_tool: Option<PathBuf>,
}

impl ShimCreator {
    /// `%SystemDrive%\Shims` and exeproxy from its default location or `PATH`.
    pub fn from_system() -> Result<Self> {
        Ok(Self {
            shims_dir: paths::shims_dir()?,
            proxy_tool: paths::exeproxy_path(),
        })
    }

    /// Create one shim per template in `shims`, expanding each with `expand`.
    pub fn create<F>(&self, shims: &[String], expand: F) -> Result<()>
    where
        F: Fn(&str) -> Result<String>,
    {
        if shims.is_empty() {
            return Ok(());
        }

        let Some(proxy) = self.proxy_tool.as_ref() else {
            ui::verbose("exeproxy not found, skipping shims");
            return Ok(());
        };

        fs::create_dir_all(&self.shims_dir).map_err(|e| JustInstallError::IoError {
            path: self.shims_dir.clone(),
            source: e,
        })?;

        for template in shims {
            let target = expand(template)?;
            let shim = self.shim_path(&target)?;

            if shim.exists() {
                fs::remove_file(&shim).map_err(|e| JustInstallError::IoError {
                    path: shim.clone(),
                    source: e,
                })?;
            }

            ui::indent(&format!("Creating shim for {} in {}", target, self.shims_dir.display()), 1);
            command_exec::run(&[
                proxy.to_string_lossy().into_owned(),
                "exeproxy-copy".to_string(),
                shim.to_string_lossy().into_owned(),
                target,
            ])?;
        }

        Ok(())
    }

    /// `<shims_dir>/<file name of target>`. Registry paths use backslashes,
    /// which are separators here whatever the host.
    pub fn shim_path(&self, target: &str) -> Result<PathBuf> {
        let name = target
            .rsplit(['\\', '/'])
            .next()
            .filter(|n| !n.is_empty() && Path::new(n).file_name().is_some())
            .ok_or_else(|| {
                JustInstallError::PathError(format!("shim target '{}' has no file name", target))
            })?;
        Ok(self.shims_dir.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(dir: &Path, proxy: Option<PathBuf>) -> ShimCreator {
        ShimCreator {
            shims_dir: dir.join("Shims"),
            proxy_tool: proxy,
        }
    }

    #[test]
    fn shim_path_uses_target_file_name() {
        let c = creator(Path::new("/s"), None);
        assert_eq!(
            c.shim_path("C:\\Android\\platform-tools\\adb.exe").unwrap(),
            Path::new("/s/Shims/adb.exe")
        );
        assert_eq!(
            c.shim_path("/opt/tool/bin/tool").unwrap(),
            Path::new("/s/Shims/tool")
        );
        assert!(c.shim_path("C:\\Android\\").is_err());
    }

    #[test]
    fn missing_proxy_tool_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let c = creator(dir.path(), None);
        c.create(&["C:\\x\\a.exe".to_string()], |s| Ok(s.to_string()))
            .unwrap();
        assert!(!c.shims_dir.exists());
    }

    #[test]
    fn expansion_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let c = creator(dir.path(), Some(dir.path().join("exeproxy")));
        let err = c
            .create(&["{{.NOPE}}".to_string()], |s| {
                Err(JustInstallError::TemplateError {
                    template: s.to_string(),
                    reason: "undefined".to_string(),
                })
            })
            .unwrap_err();
        assert!(matches!(err, JustInstallError::TemplateError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn invokes_exeproxy_copy_and_replaces_stale_shims() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("calls.txt");
        let proxy = dir.path().join("exeproxy");
        fs::write(
            &proxy,
            format!("#!/bin/sh\nprintf '%s\\n' \"$*\" >> '{}'\n", log.display()),
        )
        .unwrap();
        fs::set_permissions(&proxy, fs::Permissions::from_mode(0o755)).unwrap();

        let c = creator(dir.path(), Some(proxy));
        fs::create_dir_all(&c.shims_dir).unwrap();
        let stale = c.shims_dir.join("adb.exe");
        fs::write(&stale, b"old").unwrap();

        c.create(&["{{.ROOT}}\\adb.exe".to_string()], |s| {
            Ok(s.replace("{{.ROOT}}", "C:\\Android"))
        })
        .unwrap();

        assert!(!stale.exists());
        let calls = fs::read_to_string(&log).unwrap();
        assert_eq!(
            calls.trim(),
            format!("exeproxy-copy {} C:\\Android\\adb.exe", stale.display())
        );
    }
}
