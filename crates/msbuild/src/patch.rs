use std::path::Path;

use async_trait::async_trait;
use csprojman_core::Diagnostic;
use csprojman_utils::copy_settings_file;

use crate::document::ProjectDocument;
use crate::output_path::rewrite_output_paths;
use crate::style_cop::{set_style_cop_import, set_treat_errors_as_warnings};

/// One edit applied to every project file a command visits.
///
/// `apply` mutates the loaded document before it is saved; `after_save` runs
/// once the file is back on disk. Each returns the problems it ran into, and
/// neither stops the walk.
#[async_trait]
pub trait ProjectPatch: Send + Sync {
    fn apply(&self, document: &mut ProjectDocument, project: &Path) -> Vec<Diagnostic>;

    async fn after_save(&self, _project: &Path) -> Vec<Diagnostic> {
        Vec::new()
    }
}

#[derive(Debug, Clone)]
pub struct StyleCopPatch {
    reference: String,
    treat_warnings_as_errors: bool,
    settings_file: Option<String>,
}

impl StyleCopPatch {
    #[must_use]
    pub fn new(
        reference: String,
        treat_warnings_as_errors: bool,
        settings_file: Option<String>,
    ) -> Self {
        Self {
            reference,
            treat_warnings_as_errors,
            settings_file,
        }
    }
}

#[async_trait]
impl ProjectPatch for StyleCopPatch {
    fn apply(&self, document: &mut ProjectDocument, project: &Path) -> Vec<Diagnostic> {
        // the steps are independent, a failing one does not skip the other
        [
            set_style_cop_import(document, project, &self.reference),
            set_treat_errors_as_warnings(document, project, self.treat_warnings_as_errors),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    async fn after_save(&self, project: &Path) -> Vec<Diagnostic> {
        let Some(settings_file) = &self.settings_file else {
            return Vec::new();
        };
        copy_settings_file(project, settings_file)
            .await
            .err()
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct OutputPathPatch {
    output_path: String,
}

impl OutputPathPatch {
    #[must_use]
    pub fn new(output_path: String) -> Self {
        Self { output_path }
    }
}

#[async_trait]
impl ProjectPatch for OutputPathPatch {
    fn apply(&self, document: &mut ProjectDocument, _project: &Path) -> Vec<Diagnostic> {
        rewrite_output_paths(document, &self.output_path);
        Vec::new()
    }
}
