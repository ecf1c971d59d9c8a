// file: src/cli/applet.rs
// version: 1.0.0
// guid: 1a2b5b5b-c279-45f9-b39f-9db920ac8ba8

//! Busybox-style dispatch on the invoked program name

use super::args::Cli;
use clap::CommandFactory;
use std::ffi::OsString;
use std::path::Path;

/// Subcommands that are not worth a dedicated symlink
const NOT_LINKED: &[&str] = &["install-links", "check-prereqs"];

/// Names installed as symlinks to the binary
pub fn applet_names() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .filter(|name| !NOT_LINKED.contains(&name.as_str()))
        .collect()
}

/// Insert the applet name as subcommand when invoked through a symlink
///
/// `run-qemu app.efi` becomes `run-qemu run-qemu app.efi`, which clap then
/// parses exactly like `workbench run-qemu app.efi`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();

    let invoked = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string);

    if let Some(name) = invoked {
        if Cli::command().find_subcommand(&name).is_some() {
            args.insert(1, OsString::from(name));
        }
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_symlink_name_becomes_subcommand() {
        assert_eq!(
            normalize_args(os(&["/home/me/.local/bin/run-qemu", "app.efi"])),
            os(&["/home/me/.local/bin/run-qemu", "run-qemu", "app.efi"])
        );
    }

    #[test]
    fn test_alias_symlink_is_recognized() {
        assert_eq!(
            normalize_args(os(&["toolbox-custom-create", "dev"])),
            os(&["toolbox-custom-create", "toolbox-custom-create", "dev"])
        );
    }

    #[test]
    fn test_main_binary_name_untouched() {
        let args = os(&["/usr/bin/workbench", "kernel-query"]);
        assert_eq!(normalize_args(args.clone()), args);
        assert!(normalize_args(Vec::new()).is_empty());
    }

    #[test]
    fn test_applet_names() {
        let names = applet_names();
        assert!(names.contains(&"run-qemu".to_string()));
        assert!(names.contains(&"toolbox-add-packages".to_string()));
        assert!(!names.contains(&"install-links".to_string()));
        assert_eq!(names.len(), 8);
    }
}
