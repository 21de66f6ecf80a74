use std::path::Path;

use csprojman_core::Diagnostic;
use csprojman_core::constants::{
    ASSEMBLY_NAME_ELEMENT, CSHARP_TARGET_FILE_NAME, IMPORT_ELEMENT, PROJECT_ATTRIBUTE,
    STYLE_COP_TARGET_FILE_NAME, TREAT_ERRORS_AS_WARNINGS_ELEMENT,
};

use crate::document::ProjectDocument;
use crate::finder::{find_first_property_group_child, find_import_by_suffix};

/// Points the project's StyleCop `Import` at `reference`.
///
/// An existing StyleCop import is retargeted; otherwise a new one is added right
/// after the `Microsoft.CSharp.targets` import.
pub fn set_style_cop_import(
    document: &mut ProjectDocument,
    project: &Path,
    reference: &str,
) -> Result<(), Diagnostic> {
    if let Some(import) = find_import_by_suffix(document, STYLE_COP_TARGET_FILE_NAME) {
        document.set_attribute(import, PROJECT_ATTRIBUTE, reference);
        return Ok(());
    }

    let csharp_targets = find_import_by_suffix(document, CSHARP_TARGET_FILE_NAME)
        .ok_or_else(|| Diagnostic::MissingCSharpTargetsImport {
            project: project.to_path_buf(),
        })?;
    let name = qualified_name(document, IMPORT_ELEMENT);
    let import = document.create_element(&name);
    document.set_attribute(import, PROJECT_ATTRIBUTE, reference);
    document.insert_after(csharp_targets, import);
    Ok(())
}

/// Writes `StyleCopTreatErrorsAsWarnings`, creating it after `AssemblyName` when missing.
pub fn set_treat_errors_as_warnings(
    document: &mut ProjectDocument,
    project: &Path,
    value: bool,
) -> Result<(), Diagnostic> {
    let text = if value { "true" } else { "false" };

    if let Some(existing) =
        find_first_property_group_child(document, TREAT_ERRORS_AS_WARNINGS_ELEMENT)
    {
        document.set_text(existing.element, text);
        return Ok(());
    }

    let assembly_name = find_first_property_group_child(document, ASSEMBLY_NAME_ELEMENT)
        .ok_or_else(|| Diagnostic::MissingAssemblyName {
            project: project.to_path_buf(),
        })?;
    let name = qualified_name(document, TREAT_ERRORS_AS_WARNINGS_ELEMENT);
    let flag = document.create_element(&name);
    document.set_text(flag, text);
    document.insert_after(assembly_name.element, flag);
    Ok(())
}

// New elements share the root's prefix so they resolve to the root namespace.
fn qualified_name(document: &ProjectDocument, local_name: &str) -> String {
    match document
        .root()
        .and_then(|root| document.element(root).prefix())
    {
        Some(prefix) => format!("{prefix}:{local_name}"),
        None => local_name.to_string(),
    }
}
