use csprojman_core::constants::OUTPUT_PATH_ELEMENT;

use crate::document::ProjectDocument;
use crate::finder::find_all_property_group_children;

/// Overwrites every `OutputPath` property with `output_path`.
///
/// Returns how many elements were rewritten. Projects without `OutputPath`
/// are left as they are.
pub fn rewrite_output_paths(document: &mut ProjectDocument, output_path: &str) -> usize {
    let matches =
        find_all_property_group_children(document, OUTPUT_PATH_ELEMENT).collect::<Vec<_>>();
    for element in &matches {
        document.set_text(*element, output_path);
    }
    matches.len()
}
