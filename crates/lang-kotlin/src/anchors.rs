use crate::patterns::{ANCHOR_ARG, CLIENT_ANCHOR, SERVER_ANCHOR};
use crate::types::anchor_type_base;
use kwire_api::{ClientAnchorInfo, ServerAnchorInfo};
use kwire_core::TypeQualifier;
use tracing::debug;

/// Arguments recognized inside `@RpcClient(...)` / `@RpcServer(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorArgs {
    pub service: Option<String>,
    pub generate_factory: bool,
}

impl Default for AnchorArgs {
    fn default() -> Self {
        Self {
            service: None,
            generate_factory: true,
        }
    }
}

/// Parses `service = "..."` and `generateFactory = ...`.
///
/// A blank service is treated as absent. `generateFactory` stays true unless
/// it is literally `true` or `false`.
pub fn parse_anchor_args(args: Option<&str>) -> AnchorArgs {
    let mut parsed = AnchorArgs::default();
    let Some(args) = args else {
        return parsed;
    };
    for caps in ANCHOR_ARG.captures_iter(args) {
        let value = caps
            .name("text")
            .or_else(|| caps.name("raw"))
            .map_or("", |m| m.as_str());
        match caps.name("key").map(|m| m.as_str()) {
            Some("service") => {
                let value = value.trim();
                parsed.service = (!value.is_empty()).then(|| value.to_string());
            }
            Some("generateFactory") => {
                parsed.generate_factory = value.parse::<bool>().unwrap_or(true);
            }
            Some(other) => debug!("Ignoring anchor argument '{}'", other),
            None => {}
        }
    }
    parsed
}

pub fn extract_client_anchors(source: &str, qualifier: &TypeQualifier<'_>) -> Vec<ClientAnchorInfo> {
    CLIENT_ANCHOR
        .captures_iter(source)
        .filter_map(|caps| {
            let name = caps.name("name")?.as_str();
            let supertype = anchor_type_base(caps.name("super")?.as_str());
            let args = parse_anchor_args(caps.name("args").map(|m| m.as_str()));
            let interface_fqn = qualifier.qualify(supertype);
            debug!("Client anchor {} -> {}", name, interface_fqn);
            Some(ClientAnchorInfo {
                package_name: qualifier.package().to_string(),
                abstract_class_name: name.to_string(),
                interface_fqn,
                explicit_service_name: args.service,
                generate_factory: args.generate_factory,
            })
        })
        .collect()
}

/// Server anchors bind through their `impl` constructor parameter. A declared
/// supertype that names a different interface is reported but ignored.
pub fn extract_server_anchors(source: &str, qualifier: &TypeQualifier<'_>) -> Vec<ServerAnchorInfo> {
    SERVER_ANCHOR
        .captures_iter(source)
        .filter_map(|caps| {
            let name = caps.name("name")?.as_str();
            let impl_type = anchor_type_base(caps.name("impl")?.as_str());
            let args = parse_anchor_args(caps.name("args").map(|m| m.as_str()));
            let interface_fqn = qualifier.qualify(impl_type);

            if let Some(hint) = caps.name("super") {
                let hinted = qualifier.qualify(anchor_type_base(hint.as_str()));
                if hinted != interface_fqn {
                    debug!(
                        "Server anchor {} extends {} but binds {}",
                        name, hinted, interface_fqn
                    );
                }
            }
            debug!("Server anchor {} -> {}", name, interface_fqn);

            Some(ServerAnchorInfo {
                package_name: qualifier.package().to_string(),
                abstract_class_name: name.to_string(),
                interface_fqn,
                explicit_service_name: args.service,
                generate_factory: args.generate_factory,
            })
        })
        .collect()
}
