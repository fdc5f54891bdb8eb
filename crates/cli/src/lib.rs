mod check;
mod dump;
mod generate;

use clap::{Args, Parser, Subcommand};
use kwire_core::{Analyzer, GeneratorConfig, Result};
use kwire_kotlin::KotlinDialect;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "kwire",
    version,
    about = "Parses annotated Kotlin RPC declarations and binds them to their anchors",
    long_about = "Kwire scans the service, client and server source roots of a project, \
                  resolves every referenced type to its fully-qualified name and checks \
                  that each @RpcClient / @RpcServer anchor points at a known @RpcService."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse all roots and verify that every anchor has a service
    Check {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Print the parsed model as JSON
    Dump {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Write one descriptor per bound anchor into the output directory
    #[command(
        long_about = "Binds every anchor to its service and writes a JSON descriptor for each \
                      pair under <OUT>/<package dirs>/<AnchorClass>Impl.json. The output \
                      directory is replaced as a whole."
    )]
    Generate {
        #[command(flatten)]
        sources: SourceArgs,
        /// Output directory (overrides `outputDir` of the config file)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// JSON generator config (camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Root of the @RpcService interfaces
    #[arg(long, value_name = "DIR")]
    pub api: Option<PathBuf>,
    /// Root of the @RpcClient anchors
    #[arg(long, value_name = "DIR")]
    pub client: Option<PathBuf>,
    /// Root of the @RpcServer anchors
    #[arg(long, value_name = "DIR")]
    pub server: Option<PathBuf>,
}

impl SourceArgs {
    /// Merges the config file with command-line roots.
    ///
    /// A side with no root at all is not generated.
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(api) = &self.api {
            config.api_source_path = api.clone();
        }
        if let Some(client) = &self.client {
            config.client_source_path = client.clone();
        }
        if let Some(server) = &self.server {
            config.server_source_path = server.clone();
        }
        if config.client_source_path.as_os_str().is_empty() {
            config.generate_client = false;
        }
        if config.server_source_path.as_os_str().is_empty() {
            config.generate_server = false;
        }
        Ok(config)
    }
}

pub fn analyzer() -> Analyzer {
    Analyzer::new(Arc::new(KotlinDialect::new()))
}

pub fn run() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = kwire_core::logging::init_logging("cli", true);

    match cli.command {
        Commands::Check { sources } => check::run(&sources.resolve()?)?,
        Commands::Dump { sources } => dump::run(&sources.resolve()?)?,
        Commands::Generate { sources, out } => {
            let mut config = sources.resolve()?;
            if let Some(out) = out {
                config.output_dir = out;
            }
            generate::run(&config)?
        }
    }
    Ok(())
}
