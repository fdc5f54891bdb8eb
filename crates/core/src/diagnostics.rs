use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRole {
    Api,
    Client,
    Server,
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRole::Api => write!(f, "api"),
            SourceRole::Client => write!(f, "client"),
            SourceRole::Server => write!(f, "server"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Service,
    ClientAnchor,
    ServerAnchor,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Service => write!(f, "RPC services"),
            DeclarationKind::ClientAnchor => write!(f, "client anchors"),
            DeclarationKind::ServerAnchor => write!(f, "server anchors"),
        }
    }
}

/// A checked file and whether its text mentions the annotation at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    pub path: PathBuf,
    pub mentions_annotation: bool,
}

/// Recoverable conditions reported next to the analysis results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    MissingRoot {
        role: SourceRole,
        path: PathBuf,
    },
    NoDeclarations {
        kind: DeclarationKind,
        files: Vec<FileCheck>,
    },
    DuplicateService {
        fqn: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingRoot { role, path } => {
                write!(f, "{} source path does not exist: {}", role, path.display())
            }
            Warning::NoDeclarations { kind, files } => {
                write!(f, "No {} found in {} source files", kind, files.len())?;
                let hinted = files.iter().filter(|c| c.mentions_annotation).count();
                if hinted > 0 {
                    write!(f, " ({} mention the annotation but did not match)", hinted)?;
                }
                Ok(())
            }
            Warning::DuplicateService { fqn } => {
                write!(f, "Interface {} is declared as a service more than once", fqn)
            }
        }
    }
}
