use indexmap::{IndexMap, IndexSet};

/// Package and import information of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContext {
    /// Declared package, empty for the default package.
    pub package: String,
    /// Explicit single-type imports, e.g. `com.example.model.User`.
    pub explicit_imports: IndexSet<String>,
    /// Wildcard import prefixes without the trailing `.*`, e.g. `com.example.model`.
    pub wildcard_imports: IndexSet<String>,
    /// `import com.x.User as U` is stored as `U -> com.x.User`.
    pub aliases: IndexMap<String, String>,
}

impl FileContext {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    /// Classifies one import directive.
    ///
    /// Aliased imports only populate the alias map; a trailing `.*` makes a
    /// wildcard; anything else is an explicit import.
    pub fn record_import(&mut self, path: &str, alias: Option<&str>) {
        let path = path.trim();
        if path.is_empty() {
            return;
        }
        if let Some(alias) = alias.map(str::trim).filter(|a| !a.is_empty()) {
            self.aliases.insert(alias.to_string(), path.to_string());
        } else if let Some(prefix) = path.strip_suffix(".*") {
            self.wildcard_imports.insert(prefix.to_string());
        } else {
            self.explicit_imports.insert(path.to_string());
        }
    }

    pub fn with_import(mut self, path: &str) -> Self {
        self.record_import(path, None);
        self
    }

    pub fn with_alias(mut self, path: &str, alias: &str) -> Self {
        self.record_import(path, Some(alias));
        self
    }

    /// First explicit import whose last segment is `simple`.
    pub fn explicit_import_for(&self, simple: &str) -> Option<&str> {
        self.explicit_imports
            .iter()
            .find(|imp| {
                imp.strip_suffix(simple)
                    .map_or(false, |head| head.ends_with(kwire_api::QUALIFIER_SEPARATOR))
            })
            .map(String::as_str)
    }
}
