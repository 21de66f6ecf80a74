use colored::Colorize;
use csprojman_core::Diagnostic;

pub fn display_diagnostic(diagnostic: &Diagnostic) -> String {
    diagnostic.to_string().yellow().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_diagnostic_contains_message() {
        let diagnostic = Diagnostic::MissingAssemblyName {
            project: PathBuf::from("App.csproj"),
        };
        let displayed = display_diagnostic(&diagnostic);
        assert!(displayed.contains(&diagnostic.to_string()));
    }
}
