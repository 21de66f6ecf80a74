use std::path::{Path, PathBuf};

use csprojman_core::Diagnostic;
use csprojman_msbuild::{ProjectDocument, ProjectPatch};
use csprojman_utils::display_diagnostic;
use tokio::fs::metadata;

/// Print a diagnostic and hand it back for collection.
pub(crate) fn report(diagnostic: Diagnostic) -> Diagnostic {
    println!("{}", display_diagnostic(&diagnostic));
    diagnostic
}

pub(crate) async fn check_solution_folder(folder: &Path) -> Result<(), Diagnostic> {
    if metadata(folder).await.is_ok_and(|metadata| metadata.is_dir()) {
        Ok(())
    } else {
        Err(Diagnostic::InvalidSolutionFolder {
            folder: folder.to_path_buf(),
        })
    }
}

/// Load, patch and save each project in turn.
///
/// A project that cannot be read or written is reported and skipped; projects
/// saved before it keep their edits.
pub async fn walk_projects(projects: &[PathBuf], patch: &dyn ProjectPatch) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for project in projects {
        let mut document = match ProjectDocument::load(project).await {
            Ok(document) => document,
            Err(e) => {
                diagnostics.push(report(Diagnostic::UnreadableProject {
                    project: project.clone(),
                    reason: format!("{e:#}"),
                }));
                continue;
            }
        };

        diagnostics.extend(patch.apply(&mut document, project).into_iter().map(report));

        if let Err(e) = document.save(project).await {
            diagnostics.push(report(Diagnostic::UnwritableProject {
                project: project.clone(),
                reason: format!("{e:#}"),
            }));
            continue;
        }

        diagnostics.extend(patch.after_save(project).await.into_iter().map(report));
    }
    diagnostics
}
