pub mod anchor;
pub mod error;
pub mod marker;
pub mod service;

// Re-export commonly used types
pub use anchor::{Anchor, AnchorKind, ClientAnchorInfo, ServerAnchorInfo};
pub use error::{ApiError, ApiResult};
pub use marker::{MarkerTable, MarkerType};
pub use service::{MethodInfo, ParamInfo, ServiceInfo};

/// Separator between a package and the simple names qualified under it.
pub const QUALIFIER_SEPARATOR: char = '.';

/// Join a package and a simple name into a fully-qualified name.
///
/// Declarations in the default (empty) package are their own FQN.
pub fn qualified_name(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{}{}{}", package, QUALIFIER_SEPARATOR, simple)
    }
}
