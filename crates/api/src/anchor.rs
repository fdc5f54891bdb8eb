use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    Client,
    Server,
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorKind::Client => write!(f, "client"),
            AnchorKind::Server => write!(f, "server"),
        }
    }
}

/// Common view over client and server anchors.
///
/// An anchor is an abstract class bound to a service interface; generated
/// code is attached to it as `{abstractClassName}Impl` in the same package.
pub trait Anchor: Send + Sync {
    fn kind(&self) -> AnchorKind;
    fn package_name(&self) -> &str;
    fn abstract_class_name(&self) -> &str;
    fn interface_fqn(&self) -> &str;
    fn explicit_service_name(&self) -> Option<&str>;
    fn generate_factory(&self) -> bool;

    fn impl_class_name(&self) -> String {
        format!("{}Impl", self.abstract_class_name())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientAnchorInfo {
    pub package_name: String,
    pub abstract_class_name: String,
    pub interface_fqn: String,
    pub explicit_service_name: Option<String>,
    pub generate_factory: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerAnchorInfo {
    pub package_name: String,
    pub abstract_class_name: String,
    pub interface_fqn: String,
    pub explicit_service_name: Option<String>,
    pub generate_factory: bool,
}

macro_rules! impl_anchor {
    ($ty:ident, $kind:expr) => {
        impl Anchor for $ty {
            fn kind(&self) -> AnchorKind {
                $kind
            }

            fn package_name(&self) -> &str {
                &self.package_name
            }

            fn abstract_class_name(&self) -> &str {
                &self.abstract_class_name
            }

            fn interface_fqn(&self) -> &str {
                &self.interface_fqn
            }

            fn explicit_service_name(&self) -> Option<&str> {
                self.explicit_service_name.as_deref()
            }

            fn generate_factory(&self) -> bool {
                self.generate_factory
            }
        }
    };
}

impl_anchor!(ClientAnchorInfo, AnchorKind::Client);
impl_anchor!(ServerAnchorInfo, AnchorKind::Server);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_view() {
        let anchor = ServerAnchorInfo {
            package_name: "com.x.server".to_string(),
            abstract_class_name: "UserServer".to_string(),
            interface_fqn: "com.x.UserApi".to_string(),
            explicit_service_name: Some("Users".to_string()),
            generate_factory: false,
        };
        assert_eq!(anchor.kind(), AnchorKind::Server);
        assert_eq!(anchor.impl_class_name(), "UserServerImpl");
        assert_eq!(anchor.explicit_service_name(), Some("Users"));
        assert!(!anchor.generate_factory());
        assert_eq!(AnchorKind::Client.to_string(), "client");
    }
}
