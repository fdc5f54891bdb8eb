use indexmap::{IndexMap, IndexSet};
use kwire_api::{MarkerTable, qualified_name};

/// Project-wide map from simple type name to every FQN it could denote.
///
/// Candidates keep discovery order, so the result depends on file order;
/// callers feed files sorted by path. Built once per pass and read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    symbols: IndexMap<String, IndexSet<String>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, simple: &str, fqn: &str) {
        self.symbols
            .entry(simple.to_string())
            .or_default()
            .insert(fqn.to_string());
    }

    /// Records a top-level declaration found in `package`.
    pub fn register_declaration(&mut self, package: &str, simple: &str) {
        self.insert(simple, &qualified_name(package, simple));
    }

    /// Adds the built-ins of `markers` next to whatever was discovered.
    /// A project type sharing a built-in's simple name makes it ambiguous
    /// rather than replacing it.
    pub fn seed(&mut self, markers: &MarkerTable) {
        for marker in markers.iter() {
            self.insert(&marker.simple_name, &marker.fqn);
        }
    }

    pub fn candidates(&self, simple: &str) -> Option<&IndexSet<String>> {
        self.symbols.get(simple)
    }

    pub fn contains(&self, simple: &str, fqn: &str) -> bool {
        self.symbols
            .get(simple)
            .map_or(false, |set| set.contains(fqn))
    }

    /// The single candidate for `simple`, if there is exactly one.
    pub fn unique(&self, simple: &str) -> Option<&str> {
        self.symbols
            .get(simple)
            .filter(|set| set.len() == 1)
            .and_then(|set| set.first())
            .map(String::as_str)
    }

    pub fn is_ambiguous(&self, simple: &str) -> bool {
        self.symbols.get(simple).map_or(false, |set| set.len() > 1)
    }

    /// Number of distinct simple names.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_does_not_shadow_project_symbols() {
        let mut index = SymbolIndex::new();
        index.register_declaration("com.x.model", "String");
        index.seed(&MarkerTable::new().with("String", "kotlin.String"));

        let candidates: Vec<_> = index.candidates("String").unwrap().iter().collect();
        assert_eq!(candidates, vec!["com.x.model.String", "kotlin.String"]);
        assert!(index.is_ambiguous("String"));
        assert_eq!(index.unique("String"), None);
    }

    #[test]
    fn test_unique_and_default_package() {
        let mut index = SymbolIndex::new();
        index.register_declaration("", "Scratch");
        index.register_declaration("com.x", "User");
        index.register_declaration("com.x", "User");

        assert_eq!(index.unique("Scratch"), Some("Scratch"));
        assert_eq!(index.unique("User"), Some("com.x.User"));
        assert!(index.contains("User", "com.x.User"));
        assert!(!index.contains("User", "com.y.User"));
        assert_eq!(index.len(), 2);
    }
}
