mod set_output_folder;
mod set_style_cop;

pub use set_output_folder::SetOutputFolderArgs;
pub use set_output_folder::handle_set_output_folder;
pub use set_style_cop::SetStyleCopArgs;
pub use set_style_cop::handle_set_style_cop;
