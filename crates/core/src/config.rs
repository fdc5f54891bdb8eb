use crate::error::{KwireError, Result};
use crate::generate::GenerationOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings of one generation pass, as handed over by the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Where `@RpcService` interfaces live.
    pub api_source_path: PathBuf,
    /// Where `@RpcClient` anchors live.
    pub client_source_path: PathBuf,
    /// Where `@RpcServer` anchors live.
    pub server_source_path: PathBuf,
    pub output_dir: PathBuf,
    pub obfuscation_enabled: bool,
    pub generate_client: bool,
    pub generate_server: bool,
    pub generate_debug_info: bool,
    pub include_packages: Vec<String>,
    pub exclude_packages: Vec<String>,
    /// Accepted source file extensions; empty means the dialect's defaults.
    pub source_extensions: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_source_path: PathBuf::new(),
            client_source_path: PathBuf::new(),
            server_source_path: PathBuf::new(),
            output_dir: PathBuf::from("build/generated/rpc"),
            obfuscation_enabled: true,
            generate_client: true,
            generate_server: true,
            generate_debug_info: false,
            include_packages: Vec::new(),
            exclude_packages: Vec::new(),
            source_extensions: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(KwireError::Config("outputDir must not be empty".to_string()));
        }
        if let Some(p) = self
            .include_packages
            .iter()
            .chain(&self.exclude_packages)
            .find(|p| p.trim().is_empty())
        {
            return Err(KwireError::Config(format!(
                "package filters must not be blank (got {:?})",
                p
            )));
        }
        Ok(())
    }

    pub fn package_filter(&self) -> PackageFilter {
        PackageFilter::new(self.include_packages.clone(), self.exclude_packages.clone())
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            obfuscation_enabled: self.obfuscation_enabled,
            generate_debug_info: self.generate_debug_info,
        }
    }
}

/// Include/exclude package prefixes. Exclusion wins; an empty include list
/// includes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl PackageFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    pub fn allows(&self, package: &str) -> bool {
        if self.exclude.iter().any(|p| covers(p, package)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| covers(p, package))
    }

    pub fn is_noop(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

/// `com.x` covers `com.x` and `com.x.y`, not `com.xy`.
fn covers(prefix: &str, package: &str) -> bool {
    let prefix = prefix.trim().trim_end_matches(".*");
    package == prefix
        || package
            .strip_prefix(prefix)
            .map_or(false, |rest| rest.starts_with('.'))
}
