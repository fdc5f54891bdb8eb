use crate::context::FileContext;
use crate::diagnostics::DeclarationKind;
use crate::error::Result;
use crate::qualify::TypeQualifier;
use kwire_api::{ClientAnchorInfo, MarkerTable, ServerAnchorInfo, ServiceInfo};

/// Pattern matchers for one source language.
///
/// All `source` arguments have already gone through [`SourceDialect::preprocess`].
pub trait SourceDialect: Send + Sync {
    /// File extensions picked up when none are configured.
    fn default_extensions(&self) -> &[&str];

    /// Normalizes raw file text before any matching. Offsets must survive.
    fn preprocess(&self, source: &str) -> String {
        crate::scan::strip_comments(source)
    }

    fn extract_context(&self, source: &str) -> FileContext;

    /// Simple names of the top-level type declarations in `source`.
    fn top_level_types(&self, source: &str) -> Vec<String>;

    /// Built-ins seeded into the symbol index; also drives streaming detection.
    fn marker_types(&self) -> &MarkerTable;

    /// Annotation text used to hint at unmatched declarations, e.g. `@RpcService`.
    fn annotation_for(&self, kind: DeclarationKind) -> &str;

    fn extract_services(
        &self,
        source: &str,
        qualifier: &TypeQualifier<'_>,
    ) -> Result<Vec<ServiceInfo>>;

    fn extract_client_anchors(
        &self,
        source: &str,
        qualifier: &TypeQualifier<'_>,
    ) -> Vec<ClientAnchorInfo>;

    fn extract_server_anchors(
        &self,
        source: &str,
        qualifier: &TypeQualifier<'_>,
    ) -> Vec<ServerAnchorInfo>;
}
