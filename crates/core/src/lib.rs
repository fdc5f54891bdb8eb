pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod dialect;
pub mod error;
pub mod generate;
pub mod index;
pub mod logging;
pub mod qualify;
pub mod scan;
pub mod source;

pub use analyzer::{Analysis, AnalysisInput, Analyzer};
pub use catalog::{Binding, ServiceCatalog};
pub use config::{GeneratorConfig, PackageFilter};
pub use context::FileContext;
pub use diagnostics::{DeclarationKind, FileCheck, SourceRole, Warning};
pub use dialect::SourceDialect;
pub use error::{BoxError, KwireError, Result};
pub use generate::{GenerationOptions, GenerationReport, RenderedStub, StubGenerator, StubWriter};
pub use index::SymbolIndex;
pub use qualify::{Resolution, ResolvedVia, TypeQualifier};
pub use source::{SourceFile, SourceSet};
