// file: src/beagleplay/timings.rs
// version: 1.0.0
// guid: 0f9e7ee5-2c68-45f3-a5ce-92486f736588

//! Latency probe for reading a sysfs attribute through a child process

use crate::error::WorkbenchError;
use crate::runner::{CommandRunner, CommandSpec};
use crate::Result;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Runs discarded before measuring
pub const WARMUP_RUNS: u32 = 5;

#[derive(Debug, Clone)]
pub struct TimingOptions {
    pub path: PathBuf,
    /// Reads averaged per reported line
    pub iterations: u32,
    /// Number of reported lines; `None` runs until interrupted
    pub rounds: Option<u32>,
}

fn check_iterations(iterations: u32) -> Result<()> {
    if iterations == 0 {
        return Err(WorkbenchError::validation("iterations must be at least 1"));
    }
    Ok(())
}

/// Mean wall time of `iterations` runs of `command`
pub async fn measure<R>(runner: &R, command: &CommandSpec, iterations: u32) -> Result<Duration>
where
    R: CommandRunner + ?Sized,
{
    check_iterations(iterations)?;
    let start = Instant::now();
    for _ in 0..iterations {
        runner.output(command).await?;
    }
    Ok(start.elapsed() / iterations)
}

/// Warm up, then report the mean read time once per round
pub async fn run_timings<R, W>(runner: &R, options: &TimingOptions, out: &mut W) -> Result<()>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    check_iterations(options.iterations)?;
    let command = CommandSpec::new("cat").path_arg(&options.path);

    for _ in 0..WARMUP_RUNS {
        runner.output(&command).await?;
    }
    writeln!(out, "Warmup done")?;

    let mut round = 0;
    while options.rounds.map_or(true, |limit| round < limit) {
        let mean = measure(runner, &command, options.iterations).await?;
        writeln!(out, "Time: {}", mean.as_secs_f64())?;
        out.flush()?;
        round += 1;
    }

    Ok(())
}
