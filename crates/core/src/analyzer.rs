use crate::catalog::ServiceCatalog;
use crate::config::{GeneratorConfig, PackageFilter};
use crate::context::FileContext;
use crate::diagnostics::{DeclarationKind, FileCheck, SourceRole, Warning};
use crate::dialect::SourceDialect;
use crate::error::Result;
use crate::index::SymbolIndex;
use crate::qualify::TypeQualifier;
use crate::source::{SourceFile, SourceSet};
use indexmap::IndexSet;
use kwire_api::{Anchor, ClientAnchorInfo, ServerAnchorInfo, ServiceInfo};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The file sets of one pass. `None` means that side is not generated.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub api: SourceSet,
    pub client: Option<SourceSet>,
    pub server: Option<SourceSet>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub services: Vec<ServiceInfo>,
    pub client_anchors: Vec<ClientAnchorInfo>,
    pub server_anchors: Vec<ServerAnchorInfo>,
    #[serde(skip)]
    pub warnings: Vec<Warning>,
}

impl Analysis {
    pub fn catalog(&self) -> ServiceCatalog {
        ServiceCatalog::new(&self.services)
    }
}

/// A file after preprocessing, with its context extracted.
struct Unit<'s> {
    file: &'s SourceFile,
    text: String,
    context: FileContext,
    declared: Vec<String>,
}

pub struct Analyzer {
    dialect: Arc<dyn SourceDialect>,
    filter: PackageFilter,
}

impl Analyzer {
    pub fn new(dialect: Arc<dyn SourceDialect>) -> Self {
        Self {
            dialect,
            filter: PackageFilter::default(),
        }
    }

    /// Filter used by [`Analyzer::analyze`] and the single-set calls.
    /// [`Analyzer::run`] takes its filter from the config instead.
    pub fn with_package_filter(mut self, filter: PackageFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Reads the configured roots. Missing roots become warnings.
    pub fn load_input(&self, config: &GeneratorConfig) -> (AnalysisInput, Vec<Warning>) {
        let extensions: Vec<String> = if config.source_extensions.is_empty() {
            self.dialect
                .default_extensions()
                .iter()
                .map(|e| e.to_string())
                .collect()
        } else {
            config.source_extensions.clone()
        };

        let mut warnings = Vec::new();
        let mut load = |role: SourceRole, root: &Path| {
            if !root.exists() {
                warn!("Source path does not exist: {}", root.display());
                warnings.push(Warning::MissingRoot {
                    role,
                    path: root.to_path_buf(),
                });
                return SourceSet::empty();
            }
            let set = SourceSet::load(root, &extensions);
            info!("Processing {} {} source files", set.len(), role);
            for file in set.iter() {
                debug!("  - {}", file.path.display());
            }
            set
        };

        let api = load(SourceRole::Api, &config.api_source_path);
        let client = config
            .generate_client
            .then(|| load(SourceRole::Client, &config.client_source_path));
        let server = config
            .generate_server
            .then(|| load(SourceRole::Server, &config.server_source_path));

        (
            AnalysisInput {
                api,
                client,
                server,
            },
            warnings,
        )
    }

    /// Loads the configured roots and analyzes them, filtering by the
    /// config's include/exclude packages.
    pub fn run(&self, config: &GeneratorConfig) -> Result<Analysis> {
        config.validate()?;
        let (input, mut warnings) = self.load_input(config);
        let mut analysis = self.analyze_with(&input, &config.package_filter())?;
        warnings.append(&mut analysis.warnings);
        analysis.warnings = warnings;
        Ok(analysis)
    }

    /// Runs one full pass.
    ///
    /// The symbol index covers every file of every set and is complete
    /// before the first type is qualified.
    pub fn analyze(&self, input: &AnalysisInput) -> Result<Analysis> {
        self.analyze_with(input, &self.filter)
    }

    fn analyze_with(&self, input: &AnalysisInput, filter: &PackageFilter) -> Result<Analysis> {
        let api = self.prepare(&input.api);
        let client = input.client.as_ref().map(|set| self.prepare(set));
        let server = input.server.as_ref().map(|set| self.prepare(set));

        let mut groups: Vec<&[Unit<'_>]> = vec![api.as_slice()];
        groups.extend(client.as_deref());
        groups.extend(server.as_deref());
        let index = self.build_index(&groups);

        let mut warnings = Vec::new();

        let services = self.extract_services(&api, &index, filter)?;
        if services.is_empty() {
            warnings.push(self.no_declarations(DeclarationKind::Service, &api));
        }
        let mut seen = IndexSet::new();
        for svc in &services {
            let fqn = svc.interface_fqn();
            if !seen.insert(fqn.clone()) {
                warnings.push(Warning::DuplicateService { fqn });
            }
        }

        let client_anchors = match &client {
            Some(units) => {
                let anchors = self.extract_client(units, &index, filter);
                if anchors.is_empty() {
                    warnings.push(self.no_declarations(DeclarationKind::ClientAnchor, units));
                }
                anchors
            }
            None => Vec::new(),
        };

        let server_anchors = match &server {
            Some(units) => {
                let anchors = self.extract_server(units, &index, filter);
                if anchors.is_empty() {
                    warnings.push(self.no_declarations(DeclarationKind::ServerAnchor, units));
                }
                anchors
            }
            None => Vec::new(),
        };

        for w in &warnings {
            warn!("{}", w);
        }
        info!(
            "Found {} RPC services: {:?}",
            services.len(),
            services
                .iter()
                .map(|s| format!("{} ({})", s.interface_name, s.service_name))
                .collect::<Vec<_>>()
        );
        info!(
            "Found {} client anchors and {} server anchors",
            client_anchors.len(),
            server_anchors.len()
        );

        Ok(Analysis {
            services,
            client_anchors,
            server_anchors,
            warnings,
        })
    }

    /// Parses services of a single set, indexing only that set.
    pub fn parse_services(&self, set: &SourceSet) -> Result<Vec<ServiceInfo>> {
        let units = self.prepare(set);
        let index = self.build_index(&[units.as_slice()]);
        self.extract_services(&units, &index, &self.filter)
    }

    pub fn parse_client_anchors(&self, set: &SourceSet) -> Vec<ClientAnchorInfo> {
        let units = self.prepare(set);
        let index = self.build_index(&[units.as_slice()]);
        self.extract_client(&units, &index, &self.filter)
    }

    pub fn parse_server_anchors(&self, set: &SourceSet) -> Vec<ServerAnchorInfo> {
        let units = self.prepare(set);
        let index = self.build_index(&[units.as_slice()]);
        self.extract_server(&units, &index, &self.filter)
    }

    fn prepare<'s>(&self, set: &'s SourceSet) -> Vec<Unit<'s>> {
        set.files()
            .par_iter()
            .map(|file| {
                let text = self.dialect.preprocess(&file.text);
                let context = self.dialect.extract_context(&text);
                let declared = self.dialect.top_level_types(&text);
                Unit {
                    file,
                    text,
                    context,
                    declared,
                }
            })
            .collect()
    }

    fn build_index(&self, groups: &[&[Unit<'_>]]) -> SymbolIndex {
        let mut index = SymbolIndex::new();
        for unit in groups.iter().flat_map(|g| g.iter()) {
            for simple in &unit.declared {
                index.register_declaration(&unit.context.package, simple);
            }
        }
        index.seed(self.dialect.marker_types());
        debug!("Symbol index holds {} simple names", index.len());
        index
    }

    fn extract_services(
        &self,
        units: &[Unit<'_>],
        index: &SymbolIndex,
        filter: &PackageFilter,
    ) -> Result<Vec<ServiceInfo>> {
        let per_file: Vec<Result<Vec<ServiceInfo>>> = units
            .par_iter()
            .map(|unit| {
                let qualifier = TypeQualifier::new(&unit.context, index);
                self.dialect.extract_services(&unit.text, &qualifier)
            })
            .collect();

        // Report the first failure in file order.
        let mut services = Vec::new();
        for (unit, result) in units.iter().zip(per_file) {
            let found = result.inspect_err(|e| {
                tracing::error!("Failed to parse {}: {}", unit.file.path.display(), e)
            })?;
            services.extend(
                found
                    .into_iter()
                    .filter(|s| filter.allows(&s.package_name)),
            );
        }
        Ok(services)
    }

    fn extract_client(
        &self,
        units: &[Unit<'_>],
        index: &SymbolIndex,
        filter: &PackageFilter,
    ) -> Vec<ClientAnchorInfo> {
        let found: Vec<Vec<ClientAnchorInfo>> = units
            .par_iter()
            .map(|unit| {
                let qualifier = TypeQualifier::new(&unit.context, index);
                self.dialect.extract_client_anchors(&unit.text, &qualifier)
            })
            .collect();
        keep_allowed(found, filter)
    }

    fn extract_server(
        &self,
        units: &[Unit<'_>],
        index: &SymbolIndex,
        filter: &PackageFilter,
    ) -> Vec<ServerAnchorInfo> {
        let found: Vec<Vec<ServerAnchorInfo>> = units
            .par_iter()
            .map(|unit| {
                let qualifier = TypeQualifier::new(&unit.context, index);
                self.dialect.extract_server_anchors(&unit.text, &qualifier)
            })
            .collect();
        keep_allowed(found, filter)
    }

    fn no_declarations(&self, kind: DeclarationKind, units: &[Unit<'_>]) -> Warning {
        let annotation = self.dialect.annotation_for(kind);
        Warning::NoDeclarations {
            kind,
            files: units
                .iter()
                .map(|u| FileCheck {
                    path: u.file.path.clone(),
                    mentions_annotation: u.file.text.contains(annotation),
                })
                .collect(),
        }
    }
}

fn keep_allowed<A: Anchor>(found: Vec<Vec<A>>, filter: &PackageFilter) -> Vec<A> {
    found
        .into_iter()
        .flatten()
        .filter(|a| filter.allows(a.package_name()))
        .collect()
}
