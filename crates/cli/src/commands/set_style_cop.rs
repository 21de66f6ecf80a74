use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use csprojman_core::Diagnostic;
use csprojman_core::constants::{PROJECT_FILE_PATTERN, STYLE_COP_TARGET_FILE_NAME};
use csprojman_msbuild::StyleCopPatch;
use csprojman_utils::find_project_files;

use crate::walker::{check_solution_folder, report, walk_projects};

#[derive(Args, Debug)]
#[command(
    about = "Add or update the StyleCop target in every project of a solution",
    disable_help_flag = true
)]
pub struct SetStyleCopArgs {
    /// Folder searched recursively for *.csproj files
    #[arg(allow_hyphen_values = true)]
    pub solution_folder: PathBuf,

    /// Path to StyleCop.Targets as it should appear in the Import element
    #[arg(allow_hyphen_values = true)]
    pub style_cop_target: String,

    /// `1` treats StyleCop warnings as errors, anything else does not
    #[arg(allow_hyphen_values = true)]
    pub treat_warnings_as_errors: Option<String>,

    /// Settings.StyleCop file copied next to every project
    #[arg(allow_hyphen_values = true)]
    pub settings_file: Option<String>,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

impl SetStyleCopArgs {
    pub fn treat_warnings_as_errors(&self) -> bool {
        self.treat_warnings_as_errors.as_deref() == Some("1")
    }
}

/// Inject the StyleCop import and flag into every project under the solution folder
pub async fn handle_set_style_cop(args: &SetStyleCopArgs) -> Result<Vec<Diagnostic>> {
    if let Err(diagnostic) = check_solution_folder(&args.solution_folder).await {
        return Ok(vec![report(diagnostic)]);
    }
    if !args.style_cop_target.ends_with(STYLE_COP_TARGET_FILE_NAME) {
        return Ok(vec![report(Diagnostic::InvalidStyleCopTarget {
            reference: args.style_cop_target.clone(),
        })]);
    }

    let projects = find_project_files(&args.solution_folder, PROJECT_FILE_PATTERN, None)?;
    let patch = StyleCopPatch::new(
        args.style_cop_target.clone(),
        args.treat_warnings_as_errors(),
        args.settings_file.clone(),
    );
    Ok(walk_projects(&projects, &patch).await)
}
