// file: src/toolbox/provision.rs
// version: 1.0.0
// guid: 51b1dbc8-f182-4138-ade5-80e4785a461f

//! Create a toolbox container and provision it

use super::{begin_block, dnf, end_block, toolbox_run};
use crate::config::ToolboxConfig;
use crate::runner::{CommandRunner, CommandSpec};
use crate::Result;
use std::io::Write;
use tracing::info;

/// A titled group of commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub title: &'static str,
    pub commands: Vec<CommandSpec>,
}

/// Append one `key=value` line to the container's dnf.conf
pub fn dnf_option(container: &str, option: &str) -> CommandSpec {
    toolbox_run(
        container,
        [
            "sudo".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            format!("echo '{}' >> /etc/dnf/dnf.conf", option),
        ],
    )
}

/// The provisioning steps for a new container, in order
pub fn first_run_plan(name: &str, development: bool, config: &ToolboxConfig) -> Vec<Step> {
    let mut steps = vec![
        Step {
            title: "Create Container",
            commands: vec![CommandSpec::new("toolbox").args(["create", name])],
        },
        Step {
            title: "Dnf Configuration",
            commands: config
                .dnf_options
                .iter()
                .map(|option| dnf_option(name, option))
                .collect(),
        },
        Step {
            title: "System Upgrade",
            commands: vec![dnf(name, "upgrade", &[])],
        },
        Step {
            title: "Install Basic Packages",
            commands: vec![dnf(name, "install", &config.basic_packages)],
        },
    ];

    if development {
        steps.push(Step {
            title: "Install Development Packages",
            commands: vec![dnf(name, "install", &config.development_packages)],
        });
    }

    steps
}

/// Create, configure and upgrade a container, then optionally enter it
pub async fn first_run<R, W>(
    runner: &R,
    out: &mut W,
    name: &str,
    development: bool,
    enter: bool,
    config: &ToolboxConfig,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    for step in first_run_plan(name, development, config) {
        begin_block(out, step.title)?;
        for command in &step.commands {
            runner.run(command).await?;
        }
        end_block(out)?;
    }

    if enter {
        info!("Entering {} with {}", name, config.shell);
        let command = CommandSpec::new("toolbox")
            .args(["enter", name])
            .env("SHELL", config.shell.clone());
        runner.run(&command).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RecordingRunner;

    #[test]
    fn test_dnf_option_command() {
        assert_eq!(
            dnf_option("dev", "deltarpm=true").args,
            vec![
                "run",
                "-c",
                "dev",
                "sudo",
                "sh",
                "-c",
                "echo 'deltarpm=true' >> /etc/dnf/dnf.conf"
            ]
        );
    }

    #[test]
    fn test_plan_without_development() {
        let plan = first_run_plan("dev", false, &ToolboxConfig::default());

        let titles: Vec<&str> = plan.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Create Container",
                "Dnf Configuration",
                "System Upgrade",
                "Install Basic Packages"
            ]
        );
        assert_eq!(plan[1].commands.len(), 2);
        assert_eq!(
            plan[3].commands[0].to_string(),
            "toolbox run -c dev sudo dnf install -y fish exa direnv fd-find ripgrep"
        );
    }

    #[test]
    fn test_plan_with_development() {
        let plan = first_run_plan("dev", true, &ToolboxConfig::default());

        let last = plan.last().unwrap();
        assert_eq!(last.title, "Install Development Packages");
        assert_eq!(
            last.commands[0].to_string(),
            "toolbox run -c dev sudo dnf install -y neovim bat gcc g++"
        );
    }

    #[tokio::test]
    async fn test_first_run_enters_with_shell() {
        let runner = RecordingRunner::new();
        let mut out = Vec::new();

        first_run(&runner, &mut out, "dev", false, true, &ToolboxConfig::default())
            .await
            .unwrap();

        let calls = runner.calls();
        let enter = calls.last().unwrap();
        assert_eq!(enter.args, vec!["enter", "dev"]);
        assert_eq!(
            enter.envs,
            vec![("SHELL".to_string(), "/bin/fish".to_string())]
        );
        // create + 2 dnf options + upgrade + basic packages + enter
        assert_eq!(calls.len(), 6);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Create Container"));
        assert!(text.ends_with("\n\n"));
    }

    #[tokio::test]
    async fn test_first_run_stops_when_create_fails() {
        let runner = RecordingRunner::new().fail("toolbox", 1, "container dev already exists");
        let mut out = Vec::new();

        let result = first_run(&runner, &mut out, "dev", true, true, &ToolboxConfig::default()).await;

        assert!(result.is_err());
        assert_eq!(runner.calls().len(), 1);
    }
}
