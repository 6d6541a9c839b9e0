// src/commands/completion.rs

use crate::cli::Cli;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

/// Write the completion script for `shell`.
pub fn run(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    tracing::debug!(%shell, "generating completion script");
    clap_complete::generate(shell, &mut cmd, name, out);
    Ok(())
}
