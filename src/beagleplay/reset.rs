// file: src/beagleplay/reset.rs
// version: 1.0.0
// guid: 603505ce-7cab-4c16-b4df-455537b763c1

//! Pulse the CC1352 reset line through the libgpiod command line tools

use crate::error::WorkbenchError;
use crate::runner::{CommandRunner, CommandSpec};
use crate::Result;
use std::time::Duration;
use tracing::{debug, info};

/// A GPIO line located by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpioLine {
    pub chip: String,
    pub offset: u32,
}

impl GpioLine {
    /// Parse `gpiofind` output: `<chip> <offset>`
    pub fn parse(stdout: &str) -> Result<Self> {
        let mut words = stdout.split_whitespace();
        match (words.next(), words.next().map(str::parse::<u32>)) {
            (Some(chip), Some(Ok(offset))) => Ok(Self {
                chip: chip.to_string(),
                offset,
            }),
            _ => Err(WorkbenchError::GpioError(format!(
                "Unexpected gpiofind output: {:?}",
                stdout.trim()
            ))),
        }
    }

    fn set(&self, value: u8) -> CommandSpec {
        CommandSpec::new("gpioset")
            .arg(self.chip.clone())
            .arg(format!("{}={}", self.offset, value))
    }

    /// Reading the line requests it as an input and releases it again
    fn release(&self) -> CommandSpec {
        CommandSpec::new("gpioget")
            .arg(self.chip.clone())
            .arg(self.offset.to_string())
    }
}

/// Locate a GPIO line by its name
pub async fn find_line<R>(runner: &R, name: &str) -> Result<GpioLine>
where
    R: CommandRunner + ?Sized,
{
    let stdout = runner
        .output(&CommandSpec::new("gpiofind").arg(name))
        .await
        .map_err(|e| WorkbenchError::GpioError(format!("GPIO line {} not found: {}", name, e)))?;

    let line = GpioLine::parse(&stdout)?;
    debug!("{} is {} offset {}", name, line.chip, line.offset);
    Ok(line)
}

/// Drive the reset line low then high, then hand it back as an input
pub async fn reset_cc1352<R>(runner: &R, line_name: &str, pulse: Duration) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let line = find_line(runner, line_name).await?;

    info!("Resetting CC1352 via {} line {}", line.chip, line.offset);
    runner.run(&line.set(0)).await?;
    tokio::time::sleep(pulse).await;
    runner.run(&line.set(1)).await?;
    tokio::time::sleep(pulse).await;
    runner.output(&line.release()).await?;

    info!("CC1352 reset complete");
    Ok(())
}
