pub mod anchors;
pub mod builtins;
pub mod context;
pub mod declarations;
pub mod patterns;
pub mod services;
pub mod types;

use kwire_api::{ClientAnchorInfo, MarkerTable, ServerAnchorInfo, ServiceInfo};
use kwire_core::{DeclarationKind, FileContext, Result, SourceDialect, TypeQualifier};

pub use builtins::kotlin_markers;

/// Kotlin source dialect recognizing `@RpcService` interfaces and
/// `@RpcClient` / `@RpcServer` anchors.
pub struct KotlinDialect {
    markers: MarkerTable,
}

impl KotlinDialect {
    pub fn new() -> Self {
        Self {
            markers: kotlin_markers(),
        }
    }

    /// Replaces the built-in seed table, e.g. to add project stream types.
    pub fn with_markers(mut self, markers: MarkerTable) -> Self {
        self.markers = markers;
        self
    }
}

impl Default for KotlinDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceDialect for KotlinDialect {
    fn default_extensions(&self) -> &[&str] {
        &["kt"]
    }

    fn extract_context(&self, source: &str) -> FileContext {
        context::extract_context(source)
    }

    fn top_level_types(&self, source: &str) -> Vec<String> {
        declarations::top_level_types(source)
    }

    fn marker_types(&self) -> &MarkerTable {
        &self.markers
    }

    fn annotation_for(&self, kind: DeclarationKind) -> &str {
        match kind {
            DeclarationKind::Service => patterns::RPC_SERVICE,
            DeclarationKind::ClientAnchor => patterns::RPC_CLIENT,
            DeclarationKind::ServerAnchor => patterns::RPC_SERVER,
        }
    }

    fn extract_services(
        &self,
        source: &str,
        qualifier: &TypeQualifier<'_>,
    ) -> Result<Vec<ServiceInfo>> {
        services::extract_services(source, qualifier, &self.markers)
    }

    fn extract_client_anchors(
        &self,
        source: &str,
        qualifier: &TypeQualifier<'_>,
    ) -> Vec<ClientAnchorInfo> {
        anchors::extract_client_anchors(source, qualifier)
    }

    fn extract_server_anchors(
        &self,
        source: &str,
        qualifier: &TypeQualifier<'_>,
    ) -> Vec<ServerAnchorInfo> {
        anchors::extract_server_anchors(source, qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commented_declarations_are_invisible() {
        let dialect = KotlinDialect::new();
        let raw = "package a\n// import b.C\n/* class Hidden */\nclass Shown\n";
        let text = dialect.preprocess(raw);
        assert!(dialect.extract_context(&text).explicit_imports.is_empty());
        assert_eq!(dialect.top_level_types(&text), vec!["Shown"]);
    }

    #[test]
    fn test_seed_table_has_stream_marker() {
        let dialect = KotlinDialect::default();
        assert!(dialect.marker_types().iter().any(|m| m.streaming && m.simple_name == "Flow"));
        assert_eq!(dialect.annotation_for(DeclarationKind::ServerAnchor), "@RpcServer");
    }
}
