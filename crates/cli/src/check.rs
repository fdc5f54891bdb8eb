use kwire_core::{GeneratorConfig, Result};
use tracing::{debug, info};

pub fn run(config: &GeneratorConfig) -> Result<()> {
    let analysis = crate::analyzer().run(config)?;
    let catalog = analysis.catalog();
    debug!("Catalog: {:?}", catalog.interfaces().collect::<Vec<_>>());
    let clients = catalog.bind(&analysis.client_anchors)?;
    let servers = catalog.bind(&analysis.server_anchors)?;

    for svc in &analysis.services {
        info!(
            "service {} ({}): {} methods, {} streaming",
            svc.interface_fqn(),
            svc.service_name,
            svc.methods.len(),
            svc.streaming_methods().count()
        );
    }
    for b in &clients {
        info!("client {} -> {}", b.anchor.abstract_class_name, b.service_name());
    }
    for b in &servers {
        info!("server {} -> {}", b.anchor.abstract_class_name, b.service_name());
    }

    println!(
        "{} services, {} client anchors, {} server anchors, {} warnings",
        analysis.services.len(),
        clients.len(),
        servers.len(),
        analysis.warnings.len()
    );
    Ok(())
}
