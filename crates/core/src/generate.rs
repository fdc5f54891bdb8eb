use crate::analyzer::Analysis;
use crate::catalog::Binding;
use crate::error::{BoxError, KwireError, Result};
use kwire_api::{Anchor, ClientAnchorInfo, ServerAnchorInfo, ServiceInfo};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Flags that are opaque to parsing and only matter to generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub obfuscation_enabled: bool,
    pub generate_debug_info: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            obfuscation_enabled: true,
            generate_debug_info: false,
        }
    }
}

/// Turns a `(service, anchor)` pair into source text.
pub trait StubGenerator<A: Anchor>: Send + Sync {
    fn generate(
        &self,
        service: &ServiceInfo,
        anchor: &A,
        options: &GenerationOptions,
    ) -> std::result::Result<String, BoxError>;

    /// Extension of emitted files, without the dot.
    fn file_extension(&self) -> &str {
        "kt"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStub {
    pub path: PathBuf,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
}

/// Places generator output under `output_dir/{package dirs}/{Class}Impl.{ext}`.
pub struct StubWriter {
    output_dir: PathBuf,
    options: GenerationOptions,
}

impl StubWriter {
    pub fn new(output_dir: impl Into<PathBuf>, options: GenerationOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for<A: Anchor>(&self, anchor: &A, extension: &str) -> PathBuf {
        let mut path = self.output_dir.clone();
        path.extend(anchor.package_name().split('.').filter(|s| !s.is_empty()));
        path.push(format!("{}.{}", anchor.impl_class_name(), extension));
        path
    }

    /// Renders every binding in memory. Nothing touches the disk.
    pub fn render<A: Anchor>(
        &self,
        bindings: &[Binding<'_, A>],
        generator: &dyn StubGenerator<A>,
    ) -> Result<Vec<RenderedStub>> {
        bindings
            .iter()
            .map(|b| {
                let source = generator
                    .generate(b.service, b.anchor, &self.options)
                    .map_err(|e| KwireError::Generator {
                        anchor: b.anchor.abstract_class_name().to_string(),
                        message: e.to_string(),
                    })?;
                Ok(RenderedStub {
                    path: self.path_for(b.anchor, generator.file_extension()),
                    source,
                })
            })
            .collect()
    }

    /// Replaces the output directory with `stubs`.
    pub fn write_all(&self, stubs: Vec<RenderedStub>) -> Result<GenerationReport> {
        if self.output_dir.exists() {
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;

        let mut report = GenerationReport::default();
        for stub in stubs {
            if let Some(parent) = stub.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&stub.path, stub.source)?;
            report.written.push(stub.path);
        }
        Ok(report)
    }

    /// Binds, renders and writes every anchor of `analysis`.
    ///
    /// Binding and rendering finish for both sides before the output
    /// directory is touched, so a fatal error leaves it as it was.
    pub fn generate(
        &self,
        analysis: &Analysis,
        client: &dyn StubGenerator<ClientAnchorInfo>,
        server: &dyn StubGenerator<ServerAnchorInfo>,
    ) -> Result<GenerationReport> {
        let catalog = analysis.catalog();
        let client_bindings = catalog.bind(&analysis.client_anchors)?;
        let server_bindings = catalog.bind(&analysis.server_anchors)?;

        let mut stubs = self.render(&client_bindings, client)?;
        stubs.extend(self.render(&server_bindings, server)?);

        info!(
            "Generating {} RPC stubs in: {}",
            stubs.len(),
            self.output_dir.display()
        );
        self.write_all(stubs)
    }
}
