// file: src/main.rs
// version: 2.0.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! workbench - Main entry point

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tokio::signal;
use tracing::{error, warn};
use workbench::{
    beagle::{KernelVersion, UbootVersion},
    cli::{applet, args::Commands, commands::*, Cli},
    config::{Config, ConfigLoader},
    logging::{init_logger, with_async_operation_span},
    qemu::{DiskMode, RunOptions},
    runner::{CommandRunner, LocalRunner},
    WorkbenchError,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(applet::normalize_args(std::env::args_os()));

    if let Err(e) = init_logger(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match ConfigLoader::new()
        .load(cli.config.as_deref())
        .context("Failed to load configuration")
    {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let runner = if cli.dry_run {
        LocalRunner::dry_run()
    } else {
        LocalRunner::new()
    };

    // Dropping the command future on Ctrl+C kills the child and removes
    // any scratch directory it owns.
    let applet = cli.command.applet_name();
    let command_future =
        with_async_operation_span(applet, || dispatch(cli.command, &runner, &config, cli.dry_run));

    tokio::select! {
        result = command_future => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                exit_code_for(&e)
            }
        },
        _ = signal::ctrl_c() => {
            warn!("Interrupted");
            ExitCode::from(130)
        }
    }
}

/// External command failures propagate their status; everything else is 1
fn exit_code_for(e: &WorkbenchError) -> ExitCode {
    match e.exit_code().and_then(|code| u8::try_from(code).ok()) {
        Some(code) if code != 0 => ExitCode::from(code),
        _ => ExitCode::FAILURE,
    }
}

async fn dispatch(
    command: Commands,
    runner: &dyn CommandRunner,
    config: &Config,
    dry_run: bool,
) -> workbench::Result<()> {
    match command {
        Commands::RunQemu {
            efi_file,
            code,
            vars,
            qemu,
            arch,
            shell,
            no_shell,
            vvfat,
            disk_size_mb,
            keep_scratch,
            qemu_args,
        } => {
            let mut options = RunOptions::new(efi_file, &config.qemu);
            if let Some(arch) = arch {
                options.arch = arch.into();
            }
            if let Some(size) = disk_size_mb {
                options.disk_size_mb = size;
            }
            if vvfat {
                options.disk_mode = DiskMode::Directory;
            }
            options.qemu = qemu;
            options.code = code;
            options.vars = vars;
            options.shell = shell;
            options.no_shell = no_shell;
            options.keep_scratch = keep_scratch;
            options.extra_args = qemu_args;
            run_qemu_command(runner, config, options).await
        }
        Commands::KernelQuery {
            major,
            minor,
            patch,
            url,
            json,
        } => {
            let minimum = KernelVersion::new(major, minor, patch);
            kernel_query_command(runner, config, minimum, url, json).await
        }
        Commands::UbootQuery {
            board,
            year,
            month,
            url,
            json,
        } => {
            let minimum = UbootVersion::new(year, month);
            uboot_query_command(runner, config, &board, minimum, url, json).await
        }
        Commands::BeagleplayReset { line, pulse_ms } => {
            beagleplay_reset_command(runner, config, line, pulse_ms).await
        }
        Commands::BeagleconnectTimings {
            path,
            iterations,
            rounds,
        } => timings_command(runner, config, path, iterations, rounds).await,
        Commands::ToolboxFirstRun {
            name,
            development,
            no_enter,
        } => toolbox_first_run_command(runner, config, &name, development, !no_enter).await,
        Commands::ToolboxUpdate { containers } => {
            toolbox_update_command(runner, &containers).await
        }
        Commands::ToolboxAddPackages {
            containers,
            all,
            packages,
        } => toolbox_add_packages_command(runner, containers, all, &packages).await,
        Commands::InstallLinks { bin_dir } => install_links_command(config, bin_dir, dry_run),
        Commands::CheckPrereqs => check_prereqs_command(config),
    }
}
