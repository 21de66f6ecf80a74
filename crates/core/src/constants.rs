//! Names and patterns recognized by csprojman.

/// Command that injects the StyleCop target and flag into every project.
pub const STYLE_COP_COMMAND: &str = "SetStyleCop";
/// Command that rewrites `OutputPath` in infrastructure projects.
pub const OUTPUT_FOLDER_COMMAND: &str = "SetOutputFolder";

pub const STYLE_COP_TARGET_FILE_NAME: &str = "StyleCop.Targets";
pub const CSHARP_TARGET_FILE_NAME: &str = "Microsoft.CSharp.targets";
pub const STYLE_COP_SETTINGS_FILE_NAME: &str = "Settings.StyleCop";

pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

pub const PROJECT_ELEMENT: &str = "Project";
pub const IMPORT_ELEMENT: &str = "Import";
pub const PROPERTY_GROUP_ELEMENT: &str = "PropertyGroup";
/// Attribute of `Import` holding the referenced build file.
pub const PROJECT_ATTRIBUTE: &str = "Project";
pub const ASSEMBLY_NAME_ELEMENT: &str = "AssemblyName";
pub const OUTPUT_PATH_ELEMENT: &str = "OutputPath";
pub const TREAT_ERRORS_AS_WARNINGS_ELEMENT: &str = "StyleCopTreatErrorsAsWarnings";

pub const PROJECT_FILE_PATTERN: &str = "*.csproj";
pub const INFRASTRUCTURE_PROJECT_PATTERN: &str = "*.infrastructure.*.csproj";
pub const INFRASTRUCTURE_CORE_PROJECT_PATTERN: &str = "*.infrastructure.core*.csproj";
