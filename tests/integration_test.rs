// file: tests/integration_test.rs
// version: 2.0.0
// guid: z6a7b8c9-d0e1-2345-6789-012345zabcde

//! Integration tests for workbench

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;
use workbench::{
    beagle::{self, KernelVersion, UbootVersion},
    cli::commands::{run_qemu_command, toolbox_add_packages_command},
    config::{loader::ConfigLoader, Architecture, Config},
    qemu::RunOptions,
    runner::RecordingRunner,
    Result,
};

#[tokio::test]
async fn test_config_loading_integration() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();

    let config_content = r#"
qemu:
  default_arch: AARCH64
  disk_size_mb: 128
  profiles:
    AARCH64:
      code: ${FIRMWARE}/QEMU_EFI.fd
      vars: ${FIRMWARE}/QEMU_VARS.fd
beagle:
  kernel_url: https://example.invalid/linux.git
toolbox:
  shell: /bin/bash
"#;

    let config_path = temp_dir.path().join("config.yaml");
    tokio::fs::write(&config_path, config_content).await?;

    let mut loader = ConfigLoader::new();
    loader.set_env_var("FIRMWARE".to_string(), "/opt/fw".to_string());
    let config = loader.load(Some(config_path.as_path()))?;

    assert_eq!(config.qemu.default_arch, Architecture::Aarch64);
    assert_eq!(config.qemu.disk_size_mb, 128);
    let profile = config.qemu.profile(Architecture::Aarch64);
    assert_eq!(profile.code, PathBuf::from("/opt/fw/QEMU_EFI.fd"));
    assert_eq!(profile.vars, PathBuf::from("/opt/fw/QEMU_VARS.fd"));
    assert_eq!(profile.qemu, "qemu-system-aarch64");
    assert_eq!(config.beagle.kernel_url, "https://example.invalid/linux.git");
    assert_eq!(config.toolbox.shell, "/bin/bash");

    Ok(())
}

#[tokio::test]
async fn test_config_rejects_unknown_section() {
    let loader = ConfigLoader::new();
    assert!(loader.parse("network:\n  dhcp: true\n").is_err());
}

#[tokio::test]
async fn test_kernel_query_pipeline() -> Result<()> {
    let runner = RecordingRunner::new().reply(
        "git",
        "aaa\trefs/heads/v6.0.0\n\
         bbb\trefs/heads/v5.4.2\n\
         ccc\trefs/heads/main\n\
         ddd\trefs/heads/v5.10.0\n",
    );

    let matches = beagle::query_branches(
        &runner,
        "https://github.com/beagleboard/linux.git",
        None,
        KernelVersion::new(5, 10, 0),
    )
    .await?;

    assert_eq!(beagle::render(&matches, false)?, "v5.10.0\nv6.0.0");
    assert_eq!(
        runner.lines(),
        vec!["git ls-remote --heads https://github.com/beagleboard/linux.git"]
    );
    Ok(())
}

#[tokio::test]
async fn test_uboot_query_pipeline_json() -> Result<()> {
    let runner = RecordingRunner::new().reply(
        "git",
        "aaa\trefs/heads/v2022.10-beagleplay\n\
         bbb\trefs/heads/v2023.04-beagleplay\n",
    );

    let matches = beagle::query_branches(
        &runner,
        "https://github.com/beagleboard/u-boot.git",
        Some(&beagle::board_pattern("beagleplay")),
        UbootVersion::new(2023, 1),
    )
    .await?;

    let json: serde_json::Value = serde_json::from_str(&beagle::render(&matches, true)?)?;
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["branch"], "v2023.04-beagleplay");
    assert_eq!(json[0]["encoded"], 202_304);
    assert!(runner.lines()[0].ends_with("'*-beagleplay'"));
    Ok(())
}

#[tokio::test]
async fn test_run_qemu_through_command_layer() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let efi = temp_dir.path().join("Hello.efi");
    let code = temp_dir.path().join("CODE.fd");
    let vars = temp_dir.path().join("VARS.fd");
    for path in [&efi, &code, &vars] {
        std::fs::write(path, b"payload")?;
    }

    let config = Config::default();
    let mut options = RunOptions::new(&efi, &config.qemu);
    options.code = Some(code);
    options.vars = Some(vars);
    options.no_shell = true;
    options.extra_args = vec!["-nographic".to_string()];

    let runner = RecordingRunner::new();
    run_qemu_command(&runner, &config, options).await?;

    let programs: Vec<String> = runner.calls().into_iter().map(|c| c.program).collect();
    assert_eq!(programs, vec!["dd", "mformat", "mcopy", "qemu-system-x86_64"]);

    let qemu = runner.lines().pop().unwrap_or_default();
    assert!(qemu.contains("-machine q35"));
    assert!(qemu.contains("-net none -nographic"));
    assert!(!qemu.contains("scsi-cd"));
    Ok(())
}

#[tokio::test]
async fn test_run_qemu_missing_efi_runs_nothing() {
    let config = Config::default();
    let options = RunOptions::new("/nonexistent/app.efi", &config.qemu);
    let runner = RecordingRunner::new();

    assert!(run_qemu_command(&runner, &config, options).await.is_err());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_add_packages_to_all_containers() -> Result<()> {
    let runner = RecordingRunner::new().reply(
        "toolbox",
        "CONTAINER ID  CONTAINER NAME  CREATED  STATUS  IMAGE NAME\n\
         1a2b3c4d5e6f  dev             2 days   exited  fedora-toolbox:40\n\
         6f5e4d3c2b1a  docs            1 week   exited  fedora-toolbox:40\n",
    );

    toolbox_add_packages_command(&runner, Vec::new(), true, &["htop".to_string()]).await?;

    assert_eq!(
        runner.lines(),
        vec![
            "toolbox list -c",
            "toolbox run -c dev sudo dnf install -y htop",
            "toolbox run -c docs sudo dnf install -y htop",
        ]
    );
    Ok(())
}

fn workbench(config_dir: &TempDir) -> Command {
    let config = config_dir.path().join("config.yaml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = Command::cargo_bin("workbench").unwrap();
    cmd.env("WORKBENCH_CONFIG", config);
    cmd
}

#[test]
fn test_cli_help_lists_applets() {
    let dir = TempDir::new().unwrap();
    workbench(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run-qemu"))
        .stdout(predicate::str::contains("toolbox-add-packages"));
}

#[test]
fn test_cli_rejects_bad_version() {
    let dir = TempDir::new().unwrap();
    workbench(&dir)
        .args(["kernel-query", "--major", "six"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_cli_add_packages_needs_targets() {
    let dir = TempDir::new().unwrap();
    workbench(&dir)
        .args(["toolbox-add-packages", "htop"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_cli_install_links_dry_run() {
    let dir = TempDir::new().unwrap();
    let bin_dir = dir.path().join("bin");

    workbench(&dir)
        .args(["install-links", "--dry-run", "--bin-dir"])
        .arg(&bin_dir)
        .assert()
        .success();

    assert!(!bin_dir.exists());
}

#[cfg(unix)]
#[test]
fn test_cli_install_links_creates_symlinks() {
    let dir = TempDir::new().unwrap();
    let bin_dir = dir.path().join("bin");

    workbench(&dir)
        .args(["install-links", "--bin-dir"])
        .arg(&bin_dir)
        .assert()
        .success();

    for name in ["run-qemu", "kernel-query", "toolbox-update"] {
        let link = bin_dir.join(name);
        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
    }
    assert!(!bin_dir.join("install-links").exists());
}

#[test]
fn test_cli_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.yaml");
    std::fs::write(&config, "qemu:\n  disk_size_mb: 1\n").unwrap();

    Command::cargo_bin("workbench")
        .unwrap()
        .env("WORKBENCH_CONFIG", &config)
        .arg("check-prereqs")
        .assert()
        .failure()
        .code(1);
}
