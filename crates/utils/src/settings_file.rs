use std::path::{Path, PathBuf};

use csprojman_core::Diagnostic;
use csprojman_core::constants::STYLE_COP_SETTINGS_FILE_NAME;
use tokio::fs::{canonicalize, copy, metadata};

/// Final segment of `path`, splitting on both `/` and `\`.
pub fn settings_file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Copy a `Settings.StyleCop` file into the directory of `project`.
///
/// The destination keeps the source's file name and is overwritten when it
/// already exists. Returns the destination path.
pub async fn copy_settings_file(project: &Path, settings_file: &str) -> Result<PathBuf, Diagnostic> {
    let file_name = settings_file_name(settings_file);
    let is_file = metadata(settings_file)
        .await
        .is_ok_and(|metadata| metadata.is_file());
    if !file_name.eq_ignore_ascii_case(STYLE_COP_SETTINGS_FILE_NAME) || !is_file {
        return Err(Diagnostic::InvalidSettingsFile {
            settings_file: settings_file.to_string(),
        });
    }

    let destination = project
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(file_name);
    // copying a file onto itself would truncate it
    if let (Ok(source), Ok(target)) = (canonicalize(settings_file).await, canonicalize(&destination).await)
        && source == target
    {
        return Ok(destination);
    }
    copy(settings_file, &destination)
        .await
        .map_err(|e| Diagnostic::SettingsCopyFailed {
            destination: destination.clone(),
            reason: e.to_string(),
        })?;
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    #[case(r"C:\cfg\Settings.StyleCop", "Settings.StyleCop")]
    #[case("/etc/cfg/settings.stylecop", "settings.stylecop")]
    #[case(r"mixed/dir\Settings.StyleCop", "Settings.StyleCop")]
    #[case("Settings.StyleCop", "Settings.StyleCop")]
    #[case(r"trailing\", "")]
    fn test_settings_file_name(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(settings_file_name(path), expected);
    }

    #[tokio::test]
    async fn test_copy_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings = temp_dir.path().join("cfg").join("Settings.StyleCop");
        fs::create_dir_all(settings.parent().unwrap()).unwrap();
        fs::write(&settings, "<StyleCopSettings />").unwrap();
        let project = temp_dir.path().join("App").join("App.csproj");
        fs::create_dir_all(project.parent().unwrap()).unwrap();
        fs::write(temp_dir.path().join("App").join("Settings.StyleCop"), "old").unwrap();

        let destination = copy_settings_file(&project, settings.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(destination, temp_dir.path().join("App").join("Settings.StyleCop"));
        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "<StyleCopSettings />"
        );

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_copy_keeps_source_casing() {
        let temp_dir = TempDir::new().unwrap();
        let settings = temp_dir.path().join("settings.stylecop");
        fs::write(&settings, "content").unwrap();
        let project = temp_dir.path().join("App").join("App.csproj");
        fs::create_dir_all(project.parent().unwrap()).unwrap();

        let destination = copy_settings_file(&project, settings.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(destination.file_name().unwrap(), "settings.stylecop");
        assert!(destination.exists());

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_wrong_file_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let settings = temp_dir.path().join("StyleCop.Settings");
        fs::write(&settings, "content").unwrap();
        let project = temp_dir.path().join("App").join("App.csproj");
        fs::create_dir_all(project.parent().unwrap()).unwrap();

        let result = copy_settings_file(&project, settings.to_str().unwrap()).await;
        assert!(matches!(result, Err(Diagnostic::InvalidSettingsFile { .. })));
        assert_eq!(fs::read_dir(project.parent().unwrap()).unwrap().count(), 0);

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let settings = temp_dir.path().join("Settings.StyleCop");
        let project = temp_dir.path().join("App.csproj");

        let result = copy_settings_file(&project, settings.to_str().unwrap()).await;
        assert_eq!(
            result,
            Err(Diagnostic::InvalidSettingsFile {
                settings_file: settings.to_str().unwrap().to_string()
            })
        );

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let settings = temp_dir.path().join("Settings.StyleCop");
        fs::create_dir_all(&settings).unwrap();
        let project = temp_dir.path().join("App").join("App.csproj");

        let result = copy_settings_file(&project, settings.to_str().unwrap()).await;
        assert!(matches!(result, Err(Diagnostic::InvalidSettingsFile { .. })));

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_copy_onto_itself_keeps_content() {
        let temp_dir = TempDir::new().unwrap();
        let settings = temp_dir.path().join("Settings.StyleCop");
        fs::write(&settings, "content").unwrap();
        let project = temp_dir.path().join("App.csproj");

        let destination = copy_settings_file(&project, settings.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(destination, settings);
        assert_eq!(fs::read_to_string(&settings).unwrap(), "content");

        temp_dir.close().unwrap();
    }
}
