use crate::error::{KwireError, Result};
use indexmap::IndexMap;
use kwire_api::{Anchor, ServiceInfo};

/// Services keyed by `{packageName}.{interfaceName}`.
///
/// When two services share a key the later one wins.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    by_interface: IndexMap<String, ServiceInfo>,
}

impl ServiceCatalog {
    pub fn new(services: &[ServiceInfo]) -> Self {
        let by_interface = services
            .iter()
            .map(|s| (s.interface_fqn(), s.clone()))
            .collect();
        Self { by_interface }
    }

    pub fn get(&self, interface_fqn: &str) -> Option<&ServiceInfo> {
        self.by_interface.get(interface_fqn)
    }

    pub fn len(&self) -> usize {
        self.by_interface.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_interface.is_empty()
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &str> {
        self.by_interface.keys().map(String::as_str)
    }

    /// Pairs every anchor with its service.
    ///
    /// Fails on the first anchor whose interface has no service; nothing is
    /// skipped.
    pub fn bind<'a, A: Anchor>(&'a self, anchors: &'a [A]) -> Result<Vec<Binding<'a, A>>> {
        anchors
            .iter()
            .map(|anchor| match self.get(anchor.interface_fqn()) {
                Some(service) => Ok(Binding { service, anchor }),
                None => {
                    tracing::error!(
                        "No @RpcService found for interface {} used by {}",
                        anchor.interface_fqn(),
                        anchor.abstract_class_name()
                    );
                    Err(KwireError::UnknownInterface {
                        kind: anchor.kind(),
                        anchor: anchor.abstract_class_name().to_string(),
                        interface_fqn: anchor.interface_fqn().to_string(),
                    })
                }
            })
            .collect()
    }
}

/// An anchor and the service it binds to.
#[derive(Debug)]
pub struct Binding<'a, A> {
    pub service: &'a ServiceInfo,
    pub anchor: &'a A,
}

impl<A: Anchor> Binding<'_, A> {
    /// The route name generated code should use: the anchor's override if
    /// set, else the service's own.
    pub fn service_name(&self) -> &str {
        self.anchor
            .explicit_service_name()
            .unwrap_or(&self.service.service_name)
    }
}
