use csprojman_core::constants::{
    IMPORT_ELEMENT, MSBUILD_NAMESPACE, PROJECT_ATTRIBUTE, PROJECT_ELEMENT, PROPERTY_GROUP_ELEMENT,
};

use crate::document::{ElementId, ProjectDocument};

/// A named element inside a `PropertyGroup`, together with the group that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyChild {
    pub group: ElementId,
    pub element: ElementId,
}

/// Single-pass iterator over the `PropertyGroup` children matched by
/// [`find_all_property_group_children`].
///
/// The matches are collected when the query runs; mutating the document while
/// iterating is not supported.
#[derive(Debug)]
pub struct PropertyChildren {
    inner: std::vec::IntoIter<PropertyChild>,
}

impl Iterator for PropertyChildren {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|child| child.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// First direct `Project/Import` whose `Project` attribute ends with `suffix`, ignoring ASCII case.
pub fn find_import_by_suffix(document: &ProjectDocument, suffix: &str) -> Option<ElementId> {
    let suffix = suffix.to_ascii_lowercase();
    project_children(document, IMPORT_ELEMENT)
        .into_iter()
        .find(|&import| {
            document
                .element(import)
                .attribute(PROJECT_ATTRIBUTE)
                .is_some_and(|project| project.to_ascii_lowercase().ends_with(&suffix))
        })
}

/// First element named `name` across all `Project/PropertyGroup` elements, in document order.
pub fn find_first_property_group_child(
    document: &ProjectDocument,
    name: &str,
) -> Option<PropertyChild> {
    property_group_children(document, name).into_iter().next()
}

/// Every element named `name` across all `Project/PropertyGroup` elements, in document order.
pub fn find_all_property_group_children(
    document: &ProjectDocument,
    name: &str,
) -> PropertyChildren {
    PropertyChildren {
        inner: property_group_children(document, name).into_iter(),
    }
}

fn property_group_children(document: &ProjectDocument, name: &str) -> Vec<PropertyChild> {
    project_children(document, PROPERTY_GROUP_ELEMENT)
        .into_iter()
        .flat_map(|group| {
            document
                .child_elements(group)
                .filter(move |&element| document.element(element).name() == name)
                .map(move |element| PropertyChild { group, element })
        })
        .collect()
}

/// The root `Project` element, when it lives in the MSBuild namespace.
fn project_root(document: &ProjectDocument) -> Option<ElementId> {
    let root = document.root()?;
    (document.element(root).local_name() == PROJECT_ELEMENT
        && document.namespace_uri(root).as_deref() == Some(MSBUILD_NAMESPACE))
    .then_some(root)
}

fn project_children(document: &ProjectDocument, local_name: &str) -> Vec<ElementId> {
    let Some(root) = project_root(document) else {
        return Vec::new();
    };
    document
        .child_elements(root)
        .filter(|&child| {
            document.element(child).local_name() == local_name
                && document.namespace_uri(child).as_deref() == Some(MSBUILD_NAMESPACE)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="14.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <Import Project="$(MSBuildExtensionsPath)\Microsoft.Common.props" />
  <Import Condition="'$(Foo)' != ''" />
  <PropertyGroup>
    <Configuration Condition=" '$(Configuration)' == '' ">Debug</Configuration>
    <AssemblyName>Sample.Core</AssemblyName>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)' == 'Debug' ">
    <OutputPath>bin\Debug\</OutputPath>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)' == 'Release' ">
    <OutputPath>bin\Release\</OutputPath>
    <AssemblyName>Sample.Release</AssemblyName>
  </PropertyGroup>
  <ItemGroup>
    <OutputPath>not a property</OutputPath>
  </ItemGroup>
  <Import Project="$(MSBuildToolsPath)\Microsoft.CSharp.targets" />
</Project>
"#;

    fn import_project(document: &ProjectDocument, import: ElementId) -> String {
        document
            .element(import)
            .attribute(PROJECT_ATTRIBUTE)
            .unwrap()
            .into_owned()
    }

    #[rstest]
    #[case("Microsoft.CSharp.targets")]
    #[case("microsoft.csharp.TARGETS")]
    #[case("\\Microsoft.CSharp.targets")]
    fn test_find_import_by_suffix_ignores_case(#[case] suffix: &str) {
        let document = ProjectDocument::parse(PROJECT).unwrap();
        let import = find_import_by_suffix(&document, suffix).unwrap();
        assert_eq!(
            import_project(&document, import),
            "$(MSBuildToolsPath)\\Microsoft.CSharp.targets"
        );
    }

    #[test]
    fn test_find_import_by_suffix_not_found() {
        let document = ProjectDocument::parse(PROJECT).unwrap();
        assert_eq!(find_import_by_suffix(&document, "StyleCop.Targets"), None);
    }

    #[test]
    fn test_find_import_returns_first_match() {
        let document = ProjectDocument::parse(
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <Import Project="one\StyleCop.Targets" />
  <Import Project="two\StyleCop.Targets" />
</Project>"#,
        )
        .unwrap();
        let import = find_import_by_suffix(&document, "StyleCop.Targets").unwrap();
        assert_eq!(import_project(&document, import), "one\\StyleCop.Targets");
    }

    #[test]
    fn test_find_import_ignores_nested_imports() {
        let document = ProjectDocument::parse(
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <ImportGroup>
    <Import Project="nested\StyleCop.Targets" />
  </ImportGroup>
</Project>"#,
        )
        .unwrap();
        assert_eq!(find_import_by_suffix(&document, "StyleCop.Targets"), None);
    }

    #[test]
    fn test_find_import_without_project_attributes() {
        let document = ProjectDocument::parse(
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003"><Import /></Project>"#,
        )
        .unwrap();
        assert_eq!(find_import_by_suffix(&document, "targets"), None);
    }

    #[rstest]
    #[case::sdk_style(r#"<Project Sdk="Microsoft.NET.Sdk"><Import Project="Microsoft.CSharp.targets" /></Project>"#)]
    #[case::other_namespace(r#"<Project xmlns="urn:other"><Import Project="Microsoft.CSharp.targets" /></Project>"#)]
    #[case::other_root(r#"<Root xmlns="http://schemas.microsoft.com/developer/msbuild/2003"><Import Project="Microsoft.CSharp.targets" /></Root>"#)]
    fn test_find_import_requires_msbuild_project(#[case] content: &str) {
        let document = ProjectDocument::parse(content).unwrap();
        assert_eq!(
            find_import_by_suffix(&document, "Microsoft.CSharp.targets"),
            None
        );
    }

    #[test]
    fn test_find_import_with_prefixed_namespace() {
        let document = ProjectDocument::parse(
            r#"<m:Project xmlns:m="http://schemas.microsoft.com/developer/msbuild/2003">
  <m:Import Project="Microsoft.CSharp.targets" />
  <Import Project="unqualified\Microsoft.CSharp.targets" />
</m:Project>"#,
        )
        .unwrap();
        let import = find_import_by_suffix(&document, "Microsoft.CSharp.targets").unwrap();
        assert_eq!(document.element(import).name(), "m:Import");
    }

    #[test]
    fn test_find_first_property_group_child() {
        let document = ProjectDocument::parse(PROJECT).unwrap();
        let child = find_first_property_group_child(&document, "AssemblyName").unwrap();
        assert_eq!(document.text(child.element), "Sample.Core");
        assert_eq!(document.element(child.group).name(), "PropertyGroup");
        assert_eq!(document.element(child.element).parent(), Some(child.group));
    }

    #[test]
    fn test_find_first_property_group_child_in_later_group() {
        let document = ProjectDocument::parse(PROJECT).unwrap();
        let child = find_first_property_group_child(&document, "OutputPath").unwrap();
        assert_eq!(document.text(child.element), "bin\\Debug\\");
    }

    #[rstest]
    #[case("StyleCopTreatErrorsAsWarnings")]
    #[case("assemblyname")]
    fn test_find_first_property_group_child_absent(#[case] name: &str) {
        let document = ProjectDocument::parse(PROJECT).unwrap();
        assert_eq!(find_first_property_group_child(&document, name), None);
    }

    #[test]
    fn test_find_all_property_group_children() {
        let document = ProjectDocument::parse(PROJECT).unwrap();
        let texts = find_all_property_group_children(&document, "OutputPath")
            .map(|element| document.text(element))
            .collect::<Vec<_>>();
        // the ItemGroup child is not a property
        assert_eq!(texts, vec!["bin\\Debug\\", "bin\\Release\\"]);
    }

    #[test]
    fn test_find_all_property_group_children_is_single_pass() {
        let document = ProjectDocument::parse(PROJECT).unwrap();
        let mut matches = find_all_property_group_children(&document, "AssemblyName");
        assert_eq!(matches.size_hint(), (2, Some(2)));
        assert!(matches.next().is_some());
        assert!(matches.next().is_some());
        assert_eq!(matches.next(), None);
        assert_eq!(matches.next(), None);
    }

    #[test]
    fn test_find_all_property_group_children_none() {
        let document = ProjectDocument::parse(PROJECT).unwrap();
        assert_eq!(
            find_all_property_group_children(&document, "Missing").count(),
            0
        );
    }
}
