use kwire_api::AnchorKind;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum KwireError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Bad parameter entry: '{fragment}'")]
    MalformedParameter { fragment: String },
    #[error("No @RpcService found for interface {interface_fqn} used by {kind} anchor {anchor}")]
    UnknownInterface {
        kind: AnchorKind,
        anchor: String,
        interface_fqn: String,
    },
    #[error("Generator failed for {anchor}: {message}")]
    Generator { anchor: String, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, KwireError>;
