use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{CSHARP_TARGET_FILE_NAME, STYLE_COP_TARGET_FILE_NAME};

/// A recoverable problem reported to the user while patching projects.
///
/// None of these stop the run: the condition is printed and processing
/// continues with the next step or the next file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error(
        "Folder passed as argument doesn't exist or is not a valid Visual Studio solution folder."
    )]
    InvalidSolutionFolder { folder: PathBuf },

    #[error("Invalid StyleCop target, it must end in \"{}\".", STYLE_COP_TARGET_FILE_NAME)]
    InvalidStyleCopTarget { reference: String },

    #[error(
        "Unable to add StyleCop target to \"{}\" because Import element with target \"{}\" was not found.",
        .project.display(),
        CSHARP_TARGET_FILE_NAME
    )]
    MissingCSharpTargetsImport { project: PathBuf },

    #[error(
        "Unable to add StyleCopTreatErrorsAsWarnings to \"{}\" because element \"AssemblyName\" inside \"PropertyGroup\" element was not found.",
        .project.display()
    )]
    MissingAssemblyName { project: PathBuf },

    #[error("The specified StyleCop configuration file is invalid or doesn't exist.")]
    InvalidSettingsFile { settings_file: String },

    #[error("Unable to read project \"{}\": {}", .project.display(), .reason)]
    UnreadableProject { project: PathBuf, reason: String },

    #[error("Unable to save project \"{}\": {}", .project.display(), .reason)]
    UnwritableProject { project: PathBuf, reason: String },

    #[error(
        "Unable to copy StyleCop configuration file to \"{}\": {}",
        .destination.display(),
        .reason
    )]
    SettingsCopyFailed {
        destination: PathBuf,
        reason: String,
    },
}
