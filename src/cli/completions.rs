//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::args::Cli;

/// Write the completion script for `shell` into `out`.
pub fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}

/// Print the completion script for the requested shell to stdout.
pub fn print(shell: Shell) {
    write_script(shell, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_covers_subcommands() {
        let mut script = Vec::new();
        write_script(Shell::Bash, &mut script);
        let script = String::from_utf8(script).unwrap();

        for subcommand in ["analyze", "validate", "prompt", "models", "config"] {
            assert!(script.contains(subcommand), "missing {subcommand}");
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
