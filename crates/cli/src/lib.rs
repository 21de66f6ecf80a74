use anyhow::Result;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use csprojman_core::constants::{OUTPUT_FOLDER_COMMAND, STYLE_COP_COMMAND};

use crate::commands::{
    SetOutputFolderArgs, SetStyleCopArgs, handle_set_output_folder, handle_set_style_cop,
};
pub mod commands;
mod walker;

pub use walker::walk_projects;

#[derive(Parser, Debug)]
#[command(
    name = "csprojman",
    author,
    version,
    about = "Batch editor for MSBuild project files",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(name = "SetStyleCop")]
    SetStyleCop(SetStyleCopArgs),
    #[command(name = "SetOutputFolder")]
    SetOutputFolder(SetOutputFolderArgs),
}

/// Command names are matched ignoring ASCII case, so rewrite them to their canonical spelling.
fn canonicalize_command(args: &[String]) -> Vec<String> {
    let mut args = args.to_vec();
    if let Some(command) = args.get_mut(1)
        && let Some(canonical) = [STYLE_COP_COMMAND, OUTPUT_FOLDER_COMMAND]
            .into_iter()
            .find(|name| name.eq_ignore_ascii_case(command))
    {
        *command = canonical.to_string();
    }
    args
}

/// Run csprojman with the given process arguments.
///
/// Unknown commands and missing arguments do nothing. Problems met while
/// patching are printed as they happen and never turn into an error here.
pub async fn main(args: &[String]) -> Result<()> {
    let cli = match Cli::try_parse_from(canonicalize_command(args)) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => return Ok(()),
    };

    if let Some(command) = cli.command {
        match command {
            Commands::SetStyleCop(args) => handle_set_style_cop(&args).await?,
            Commands::SetOutputFolder(args) => handle_set_output_folder(&args).await?,
        };
    }
    Ok(())
}
