mod display_diagnostic;
mod find_project_files;
mod settings_file;

pub use display_diagnostic::display_diagnostic;
pub use find_project_files::find_project_files;
pub use settings_file::{copy_settings_file, settings_file_name};
