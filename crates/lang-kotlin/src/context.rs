use crate::patterns::{IMPORT, PACKAGE};
use kwire_core::FileContext;

/// Reads the package directive and every import line of a file.
///
/// Only the first package directive counts; files without one live in the
/// default package.
pub fn extract_context(source: &str) -> FileContext {
    let package = PACKAGE
        .captures(source)
        .and_then(|caps| caps.name("pkg"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let mut context = FileContext::new(package);
    for caps in IMPORT.captures_iter(source) {
        let Some(path) = caps.name("path") else {
            continue;
        };
        context.record_import(path.as_str(), caps.name("alias").map(|m| m.as_str()));
    }
    context
}
