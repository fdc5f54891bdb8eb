#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
