use crate::context::FileContext;
use crate::index::SymbolIndex;
use crate::scan::split_top_level_commas;
use kwire_api::{QUALIFIER_SEPARATOR, qualified_name};

/// Which rule produced a resolution. Rules are tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    AlreadyQualified,
    Alias,
    ExplicitImport,
    WildcardImport,
    SamePackage,
    GlobalUnique,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub fqn: String,
    pub via: ResolvedVia,
}

impl Resolution {
    fn new(fqn: impl Into<String>, via: ResolvedVia) -> Self {
        Self {
            fqn: fqn.into(),
            via,
        }
    }
}

/// Rewrites type references of one file into fully-qualified form.
#[derive(Clone, Copy)]
pub struct TypeQualifier<'a> {
    context: &'a FileContext,
    index: &'a SymbolIndex,
}

impl<'a> TypeQualifier<'a> {
    pub fn new(context: &'a FileContext, index: &'a SymbolIndex) -> Self {
        Self { context, index }
    }

    pub fn package(&self) -> &'a str {
        &self.context.package
    }

    /// Qualifies a type reference as written in source.
    ///
    /// A trailing `?` is kept, generic arguments are qualified recursively,
    /// `in`/`out` variance and `*` projections pass through.
    pub fn qualify(&self, ty: &str) -> String {
        let ty = ty.trim();
        if let Some(core) = ty.strip_suffix('?') {
            return format!("{}?", self.qualify(core));
        }
        for variance in ["out ", "in "] {
            if let Some(rest) = ty.strip_prefix(variance) {
                return format!("{}{}", variance, self.qualify(rest));
            }
        }
        if ty == "*" || ty.is_empty() {
            return ty.to_string();
        }

        match (ty.find('<'), ty.rfind('>')) {
            (Some(lt), Some(gt)) if gt > lt => {
                let base = self.qualify_simple(ty[..lt].trim());
                let args = split_top_level_commas(&ty[lt + 1..gt])
                    .iter()
                    .map(|arg| self.qualify(arg))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}<{}>{}", base, args, &ty[gt + 1..])
            }
            (None, None) => self.qualify_simple(ty),
            // Unbalanced brackets: leave it for the generator to report.
            _ => ty.to_string(),
        }
    }

    /// Qualifies a bare, non-generic name.
    pub fn qualify_simple(&self, name: &str) -> String {
        self.resolve(name).fqn
    }

    pub fn resolve(&self, name: &str) -> Resolution {
        if name.contains(QUALIFIER_SEPARATOR) {
            return Resolution::new(name, ResolvedVia::AlreadyQualified);
        }

        if let Some(fqn) = self.context.aliases.get(name) {
            return Resolution::new(fqn.as_str(), ResolvedVia::Alias);
        }

        if let Some(fqn) = self.context.explicit_import_for(name) {
            return Resolution::new(fqn, ResolvedVia::ExplicitImport);
        }

        // A wildcard only counts when the index knows the resulting type.
        for prefix in &self.context.wildcard_imports {
            let candidate = qualified_name(prefix, name);
            if self.index.contains(name, &candidate) {
                return Resolution::new(candidate, ResolvedVia::WildcardImport);
            }
        }

        let same_package = qualified_name(&self.context.package, name);
        if self.index.contains(name, &same_package) {
            return Resolution::new(same_package, ResolvedVia::SamePackage);
        }

        if let Some(fqn) = self.index.unique(name) {
            return Resolution::new(fqn, ResolvedVia::GlobalUnique);
        }

        tracing::trace!(name, package = %self.context.package, "type left unqualified");
        Resolution::new(name, ResolvedVia::Unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwire_api::MarkerTable;

    fn seeded_index() -> SymbolIndex {
        let mut index = SymbolIndex::new();
        index.register_declaration("com.x.model", "User");
        index.register_declaration("com.x", "UserApi");
        index.register_declaration("com.x.dto", "Page");
        index.seed(
            &MarkerTable::new()
                .with_package("kotlin", &["String", "Int"])
                .with_package("kotlin.collections", &["List", "Map"])
                .with_stream("Flow", "kotlinx.coroutines.flow.Flow"),
        );
        index
    }

    #[test]
    fn test_precedence_chain() {
        let mut index = seeded_index();
        index.register_declaration("com.y", "Page");
        index.register_declaration("com.x", "Page");
        let ctx = FileContext::new("com.x")
            .with_alias("com.x.model.User", "U")
            .with_import("com.other.Thing")
            .with_import("com.y.*")
            .with_import("com.unrelated.*");
        let q = TypeQualifier::new(&ctx, &index);

        assert_eq!(q.resolve("a.b.C").via, ResolvedVia::AlreadyQualified);
        assert_eq!(q.resolve("U"), Resolution::new("com.x.model.User", ResolvedVia::Alias));
        assert_eq!(
            q.resolve("Thing"),
            Resolution::new("com.other.Thing", ResolvedVia::ExplicitImport)
        );
        // Wildcard beats same package.
        assert_eq!(q.resolve("Page"), Resolution::new("com.y.Page", ResolvedVia::WildcardImport));
        assert_eq!(
            q.resolve("UserApi"),
            Resolution::new("com.x.UserApi", ResolvedVia::SamePackage)
        );
        assert_eq!(
            q.resolve("User"),
            Resolution::new("com.x.model.User", ResolvedVia::GlobalUnique)
        );
        assert_eq!(q.resolve("Missing"), Resolution::new("Missing", ResolvedVia::Unresolved));
    }

    #[test]
    fn test_unconfirmed_wildcard_is_ignored() {
        let index = seeded_index();
        let ctx = FileContext::new("com.z").with_import("com.nothing.*");
        let q = TypeQualifier::new(&ctx, &index);
        assert_eq!(q.qualify("Page"), "com.x.dto.Page");
        assert_eq!(q.resolve("Page").via, ResolvedVia::GlobalUnique);
    }

    #[test]
    fn test_ambiguous_name_stays_simple() {
        let mut index = seeded_index();
        index.register_declaration("com.a", "Item");
        index.register_declaration("com.b", "Item");
        let ctx = FileContext::new("com.c");
        let q = TypeQualifier::new(&ctx, &index);
        assert_eq!(q.qualify("Item"), "Item");
        assert_eq!(q.qualify("List<Item>"), "kotlin.collections.List<Item>");
    }

    #[test]
    fn test_nested_generics_and_nullability() {
        let index = seeded_index();
        let ctx = FileContext::new("com.x.api").with_import("com.x.model.User");
        let q = TypeQualifier::new(&ctx, &index);

        assert_eq!(q.qualify("List<User?>"), "kotlin.collections.List<com.x.model.User?>");
        assert_eq!(
            q.qualify("Map<String, List<User>>?"),
            "kotlin.collections.Map<kotlin.String, kotlin.collections.List<com.x.model.User>>?"
        );
        assert_eq!(
            q.qualify("Flow<List<User>>"),
            "kotlinx.coroutines.flow.Flow<kotlin.collections.List<com.x.model.User>>"
        );
        assert_eq!(q.qualify("List<out User>"), "kotlin.collections.List<out com.x.model.User>");
        assert_eq!(q.qualify("Map<String, *>"), "kotlin.collections.Map<kotlin.String, *>");
    }

    #[test]
    fn test_qualification_is_idempotent() {
        let index = seeded_index();
        let ctx = FileContext::new("com.x.api").with_import("com.x.model.User");
        let q = TypeQualifier::new(&ctx, &index);
        for ty in ["List<User?>", "Map<String, List<User>>?", "User", "Flow<Int>"] {
            let once = q.qualify(ty);
            assert_eq!(q.qualify(&once), once, "qualifying {} twice changed it", ty);
        }
    }

    #[test]
    fn test_malformed_generic_is_left_alone() {
        let index = seeded_index();
        let ctx = FileContext::new("com.x");
        let q = TypeQualifier::new(&ctx, &index);
        assert_eq!(q.qualify("List<User"), "List<User");
    }
}
