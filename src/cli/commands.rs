// file: src/cli/commands.rs
// version: 2.0.0
// guid: 78d0edcf-9611-4543-bc04-c8808faeda83

//! Command implementations for the CLI

use super::applet::applet_names;
use crate::{
    beagle::{self, KernelVersion, UbootVersion},
    beagleplay::{self, TimingOptions},
    config::Config,
    error::WorkbenchError,
    links,
    qemu::{self, RunOptions},
    runner::CommandRunner,
    toolbox::{self, Targets},
    utils::SystemUtils,
    Result,
};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Boot an EFI application under qemu
pub async fn run_qemu_command<R>(runner: &R, config: &Config, options: RunOptions) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let profile = options.resolve_profile(&config.qemu);
    qemu::run_qemu(runner, &profile, &options).await
}

/// List beagle kernel branches at or above a version
pub async fn kernel_query_command<R>(
    runner: &R,
    config: &Config,
    minimum: KernelVersion,
    url: Option<String>,
    json: bool,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let url = url.unwrap_or_else(|| config.beagle.kernel_url.clone());
    let matches = beagle::query_branches(runner, &url, None, minimum).await?;
    print_output(&beagle::render(&matches, json)?);
    Ok(())
}

/// List beagle U-Boot branches of a board at or above a version
pub async fn uboot_query_command<R>(
    runner: &R,
    config: &Config,
    board: &str,
    minimum: UbootVersion,
    url: Option<String>,
    json: bool,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let url = url.unwrap_or_else(|| config.beagle.uboot_url.clone());
    let pattern = beagle::board_pattern(board);
    let matches = beagle::query_branches(runner, &url, Some(&pattern), minimum).await?;
    print_output(&beagle::render(&matches, json)?);
    Ok(())
}

fn print_output(text: &str) {
    if !text.is_empty() {
        println!("{}", text);
    }
}

/// Pulse the CC1352 reset line
pub async fn beagleplay_reset_command<R>(
    runner: &R,
    config: &Config,
    line: Option<String>,
    pulse_ms: Option<u64>,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let line = line.unwrap_or_else(|| config.beagleplay.reset_line.clone());
    let pulse_ms = pulse_ms.unwrap_or(config.beagleplay.pulse_ms);
    if pulse_ms == 0 {
        return Err(WorkbenchError::validation("--pulse-ms must be greater than zero"));
    }
    beagleplay::reset_cc1352(runner, &line, Duration::from_millis(pulse_ms)).await
}

/// Print mean sysfs read latency
pub async fn timings_command<R>(
    runner: &R,
    config: &Config,
    path: Option<PathBuf>,
    iterations: u32,
    rounds: Option<u32>,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let options = TimingOptions {
        path: path.unwrap_or_else(|| config.beagleplay.temp_path.clone()),
        iterations,
        rounds,
    };
    let mut stdout = std::io::stdout();
    beagleplay::run_timings(runner, &options, &mut stdout).await
}

/// Create and provision a toolbox container
pub async fn toolbox_first_run_command<R>(
    runner: &R,
    config: &Config,
    name: &str,
    development: bool,
    enter: bool,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let mut stdout = std::io::stdout();
    toolbox::first_run(runner, &mut stdout, name, development, enter, &config.toolbox).await
}

/// Upgrade the named containers, or all of them
pub async fn toolbox_update_command<R>(runner: &R, names: &[String]) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let containers = toolbox::resolve_targets(runner, &Targets::from_names(names)).await?;
    if containers.is_empty() {
        warn!("No toolbox containers found");
        return Ok(());
    }
    let mut stdout = std::io::stdout();
    toolbox::update_containers(runner, &mut stdout, &containers).await
}

/// Install packages into the selected containers
pub async fn toolbox_add_packages_command<R>(
    runner: &R,
    containers: Vec<String>,
    all: bool,
    packages: &[String],
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let containers = if all {
        toolbox::list_containers(runner).await?
    } else {
        containers
    };
    let mut stdout = std::io::stdout();
    toolbox::add_packages(runner, &mut stdout, &containers, packages).await
}

/// Link every applet name to this binary
pub fn install_links_command(config: &Config, bin_dir: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let bin_dir = match bin_dir.or_else(|| config.links.bin_dir.clone()) {
        Some(dir) => crate::config::expand_tilde(&dir),
        None => links::default_bin_dir()?,
    };
    let exe = std::env::current_exe()?;

    let names = applet_names();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let set = links::link_set(&exe, &names, &config.links.extra);

    let installed = links::install_links(&bin_dir, &set, dry_run)?;
    if !dry_run {
        info!("Installed {} links in {}", installed.len(), bin_dir.display());
    }
    Ok(())
}

/// Report which external tools are available
pub fn check_prereqs_command(config: &Config) -> Result<()> {
    let report = SystemUtils::check_prerequisites(config);

    for entry in &report {
        let status = match (&entry.location, entry.required) {
            (Some(path), _) => format!("{}", path.display()).green(),
            (None, true) => "missing".red().bold(),
            (None, false) => "missing (optional)".yellow(),
        };
        println!("{:<24} {:<28} {}", entry.name, entry.used_by, status);
    }

    let missing: Vec<&str> = report
        .iter()
        .filter(|p| p.required && !p.found())
        .map(|p| p.name.as_str())
        .collect();

    if missing.is_empty() {
        info!("All required tools are installed");
        Ok(())
    } else {
        Err(WorkbenchError::validation(format!(
            "Missing required tools: {}",
            missing.join(", ")
        )))
    }
}
