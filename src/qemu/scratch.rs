// file: src/qemu/scratch.rs
// version: 1.0.0
// guid: 7a0fed6f-3cb0-4f54-b11c-1592aabdfd37

//! Scratch directory contents for one harness run

use crate::error::WorkbenchError;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name the EFI application gets inside the boot filesystem
pub const EFI_NAME: &str = "run.efi";

/// UEFI shell script executed automatically on boot
pub const STARTUP_NAME: &str = "startup.nsh";

/// Render the UEFI shell startup script that launches `efi_name` from fs0
pub fn startup_script(efi_name: &str) -> String {
    [
        "@echo -off",
        "fs0:",
        "echo Starting UEFI Application...",
        efi_name,
    ]
    .join("\n")
}

/// Files staged in the scratch directory
#[derive(Debug, Clone)]
pub struct ScratchLayout {
    pub dir: PathBuf,
    pub code: PathBuf,
    pub vars: PathBuf,
    pub shell: Option<PathBuf>,
    pub efi: PathBuf,
    pub startup: PathBuf,
}

impl ScratchLayout {
    /// Copy firmware and the EFI binary into `dir` and write the startup script
    pub async fn prepare(
        dir: &Path,
        efi_file: &Path,
        code: &Path,
        vars: &Path,
        shell: Option<&Path>,
    ) -> Result<Self> {
        let layout = Self {
            dir: dir.to_path_buf(),
            code: dir.join("code.fd"),
            vars: dir.join("vars.fd"),
            shell: shell.map(|_| dir.join("shell.iso")),
            efi: dir.join(EFI_NAME),
            startup: dir.join(STARTUP_NAME),
        };

        copy_file(code, &layout.code).await?;
        copy_file(vars, &layout.vars).await?;
        make_writable(&layout.vars).await?;
        if let (Some(src), Some(dst)) = (shell, &layout.shell) {
            copy_file(src, dst).await?;
        }
        copy_file(efi_file, &layout.efi).await?;

        tokio::fs::write(&layout.startup, startup_script(EFI_NAME)).await?;
        debug!("Scratch directory prepared at {}", dir.display());

        Ok(layout)
    }
}

async fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    tokio::fs::copy(src, dst).await.map_err(|e| {
        WorkbenchError::QemuError(format!(
            "Failed to copy {} to {}: {}",
            src.display(),
            dst.display(),
            e
        ))
    })?;
    Ok(())
}

/// The variable store is written by the firmware, so the copy must not
/// inherit a read-only mode from /usr/share.
async fn make_writable(path: &Path) -> Result<()> {
    let mut perms = tokio::fs::metadata(path).await?.permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(perms.mode() | 0o600);
    }
    #[cfg(not(unix))]
    {
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
    }
    tokio::fs::set_permissions(path, perms).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_startup_script_lines() {
        let script = startup_script("run.efi");

        assert_eq!(
            script,
            "@echo -off\nfs0:\necho Starting UEFI Application...\nrun.efi"
        );
        assert!(!script.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_prepare_copies_everything() {
        let src = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let efi = src.path().join("Hello.efi");
        let code = src.path().join("CODE.fd");
        let vars = src.path().join("VARS.fd");
        let shell = src.path().join("Shell.iso");
        for (path, body) in [(&efi, "efi"), (&code, "code"), (&vars, "vars"), (&shell, "iso")] {
            tokio::fs::write(path, body).await.unwrap();
        }

        let layout = ScratchLayout::prepare(scratch.path(), &efi, &code, &vars, Some(&shell))
            .await
            .unwrap();

        assert_eq!(tokio::fs::read_to_string(&layout.efi).await.unwrap(), "efi");
        assert_eq!(tokio::fs::read_to_string(&layout.code).await.unwrap(), "code");
        assert_eq!(tokio::fs::read_to_string(&layout.vars).await.unwrap(), "vars");
        assert_eq!(
            tokio::fs::read_to_string(layout.shell.as_ref().unwrap()).await.unwrap(),
            "iso"
        );
        assert_eq!(
            tokio::fs::read_to_string(&layout.startup).await.unwrap(),
            startup_script(EFI_NAME)
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_vars_copy_is_writable() {
        use std::os::unix::fs::PermissionsExt;

        let src = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let efi = src.path().join("app.efi");
        let code = src.path().join("CODE.fd");
        let vars = src.path().join("VARS.fd");
        for path in [&efi, &code, &vars] {
            tokio::fs::write(path, b"x").await.unwrap();
        }
        std::fs::set_permissions(&vars, std::fs::Permissions::from_mode(0o444)).unwrap();

        let layout = ScratchLayout::prepare(scratch.path(), &efi, &code, &vars, None)
            .await
            .unwrap();

        let mode = std::fs::metadata(&layout.vars).unwrap().permissions().mode();
        assert_eq!(mode & 0o200, 0o200);
        assert!(layout.shell.is_none());
    }

    #[tokio::test]
    async fn test_prepare_missing_source_is_qemu_error() {
        let src = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let missing = src.path().join("missing.fd");

        let result =
            ScratchLayout::prepare(scratch.path(), &missing, &missing, &missing, None).await;

        assert!(matches!(result, Err(WorkbenchError::QemuError(_))));
    }
}
