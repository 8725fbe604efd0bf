use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

const USAGE: &str = "usage: cardionet [--config <path>] [evaluate|directory]";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Submit the demo patient and list recommended specialists.
    #[default]
    Evaluate,
    /// Bulk-load the specialist directory and print its first page.
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: PathBuf,
    pub command: Command,
}

pub fn args_from_env() -> Result<CliArgs> {
    parse_args(env::args().skip(1))
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut args = args.into_iter();
    let mut config_path = None;
    let mut command = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --config. {USAGE}"))?;
                config_path = Some(PathBuf::from(value));
            }
            "evaluate" | "directory" if command.is_some() => {
                return Err(anyhow!("more than one command given. {USAGE}"));
            }
            "evaluate" => command = Some(Command::Evaluate),
            "directory" => command = Some(Command::Directory),
            other => return Err(anyhow!("unknown argument: {other}. {USAGE}")),
        }
    }

    Ok(CliArgs {
        config_path: config_path.unwrap_or_else(|| PathBuf::from("./cardionet.jsonc")),
        command: command.unwrap_or_default(),
    })
}
