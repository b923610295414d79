//! Namespace and `use` import extraction.

use indexmap::IndexMap;
use modelgraph_core::identifier;

use crate::patterns;

/// Alias → fully-qualified name bindings declared by one file.
///
/// An import without an `as` clause binds the last segment of the imported
/// name. When two imports bind the same alias the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    bindings: IndexMap<String, String>,
}

impl ImportTable {
    /// Extracts every class import from `source`.
    pub fn parse(source: &str) -> Self {
        let mut table = Self::default();
        for caps in patterns::USE.captures_iter(source) {
            let fqn = identifier::normalize(&caps[1]);
            let alias = caps
                .get(2)
                .map_or_else(|| identifier::simple_name(fqn), |alias| alias.as_str());
            table.insert(alias, fqn);
        }
        table
    }

    /// Binds `alias` to `fqn`, replacing any earlier binding.
    pub fn insert(&mut self, alias: &str, fqn: &str) {
        self.bindings
            .insert(alias.to_string(), identifier::normalize(fqn).to_string());
    }

    /// Looks up the fully-qualified name bound to `alias`.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.bindings.get(alias).map(String::as_str)
    }

    /// Bindings in declaration order of their first occurrence.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(alias, fqn)| (alias.as_str(), fqn.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Returns the file's declared namespace, or an empty string.
pub(crate) fn parse_namespace(source: &str) -> String {
    patterns::NAMESPACE
        .captures(source)
        .map(|caps| identifier::normalize(&caps[1]).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_without_alias_binds_last_segment() {
        let table = ImportTable::parse("<?php\nuse Illuminate\\Database\\Eloquent\\Model;\n");
        assert_eq!(table.resolve("Model"), Some("Illuminate\\Database\\Eloquent\\Model"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_import_with_alias() {
        let table =
            ImportTable::parse("use Illuminate\\Foundation\\Auth\\User as Authenticatable;");
        assert_eq!(
            table.resolve("Authenticatable"),
            Some("Illuminate\\Foundation\\Auth\\User")
        );
        assert_eq!(table.resolve("User"), None);
    }

    #[test]
    fn test_last_alias_wins() {
        let source = "use App\\One\\Thing;\nuse App\\Two\\Thing;\n";
        let table = ImportTable::parse(source);
        assert_eq!(table.resolve("Thing"), Some("App\\Two\\Thing"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_leading_separator_is_stripped() {
        let table = ImportTable::parse("use \\App\\Models\\Post;");
        assert_eq!(table.resolve("Post"), Some("App\\Models\\Post"));
    }

    #[test]
    fn test_function_and_const_imports_are_ignored() {
        let table = ImportTable::parse("use function App\\helper;\nuse const App\\LIMIT;\n");
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_namespace() {
        assert_eq!(parse_namespace("<?php\n\nnamespace App\\Models;\n"), "App\\Models");
        assert_eq!(parse_namespace("<?php\nnamespace Legacy {\n}"), "Legacy");
        assert_eq!(parse_namespace("<?php\nclass Foo {}"), "");
    }
}
