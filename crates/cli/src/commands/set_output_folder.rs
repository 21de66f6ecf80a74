use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use csprojman_core::Diagnostic;
use csprojman_core::constants::{
    INFRASTRUCTURE_CORE_PROJECT_PATTERN, INFRASTRUCTURE_PROJECT_PATTERN,
};
use csprojman_msbuild::OutputPathPatch;
use csprojman_utils::find_project_files;

use crate::walker::{check_solution_folder, report, walk_projects};

#[derive(Args, Debug)]
#[command(
    about = "Rewrite OutputPath in every infrastructure project except the core ones",
    disable_help_flag = true
)]
pub struct SetOutputFolderArgs {
    /// Folder searched recursively for *.infrastructure.*.csproj files
    #[arg(allow_hyphen_values = true)]
    pub solution_folder: PathBuf,

    /// Value written to every OutputPath element
    #[arg(allow_hyphen_values = true)]
    pub output_path: String,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// Rewrite the output path of infrastructure projects under the solution folder
pub async fn handle_set_output_folder(args: &SetOutputFolderArgs) -> Result<Vec<Diagnostic>> {
    if let Err(diagnostic) = check_solution_folder(&args.solution_folder).await {
        return Ok(vec![report(diagnostic)]);
    }

    let projects = find_project_files(
        &args.solution_folder,
        INFRASTRUCTURE_PROJECT_PATTERN,
        Some(INFRASTRUCTURE_CORE_PROJECT_PATTERN),
    )?;
    let patch = OutputPathPatch::new(args.output_path.clone());
    Ok(walk_projects(&projects, &patch).await)
}
