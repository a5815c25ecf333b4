//! Shell completion command implementation

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap_complete::{generate, Shell};
use std::io;

pub struct Options {
    pub shell: String,
}

/// Generate a shell completion script on stdout
pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Completion generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let shell = match options.shell.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => {
            return Err(CliError::Message(format!(
                "Unsupported shell: {}. Supported shells: bash, zsh, fish",
                options.shell
            )));
        }
    };

    let mut cmd = get_cli_command();
    generate(shell, &mut cmd, "sdkregen", &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_command_structure() {
        let cmd = get_cli_command();
        assert_eq!(cmd.get_name(), "sdkregen");
        let subcommands: Vec<_> = cmd.get_subcommands().map(|c| c.get_name()).collect();
        assert!(subcommands.contains(&"regenerate"));
        assert!(subcommands.contains(&"list"));
        assert!(subcommands.contains(&"update-emitter"));
        assert!(subcommands.contains(&"completion"));
    }

    #[test]
    fn test_unsupported_shell_is_rejected() {
        let options = Options {
            shell: "powershell".to_string(),
        };
        assert_eq!(run(&options), 1);
    }
}
