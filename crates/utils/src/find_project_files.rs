use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern, glob_with};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Recursively find files under `root` whose file name matches `include` and not `exclude`.
///
/// Patterns apply to the file name only and ignore ASCII case. Files come back
/// in the order the directory walk yields them.
pub fn find_project_files(root: &Path, include: &str, exclude: Option<&str>) -> Result<Vec<PathBuf>> {
    let include_pattern =
        Pattern::new(include).with_context(|| format!("Invalid file pattern {include}"))?;
    let exclude_pattern = exclude
        .map(|exclude| {
            Pattern::new(exclude).with_context(|| format!("Invalid file pattern {exclude}"))
        })
        .transpose()?;

    let search = format!(
        "{}/**/{}",
        Pattern::escape(&root.to_string_lossy()),
        include
    );
    let mut files = Vec::new();
    for entry in glob_with(&search, MATCH_OPTIONS)? {
        // unreadable directories are skipped
        let Ok(path) = entry else {
            continue;
        };
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !path.is_file() || !include_pattern.matches_with(file_name, MATCH_OPTIONS) {
            continue;
        }
        if exclude_pattern
            .as_ref()
            .is_some_and(|exclude| exclude.matches_with(file_name, MATCH_OPTIONS))
        {
            continue;
        }
        files.push(path);
    }
    Ok(files)
}
