use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("year {0} is not part of the dataset")]
    UnknownYear(u16),

    #[error("failed to load dataset bundle: {0}")]
    DataLoad(String),

    #[error("renderer failure: {0}")]
    Render(String),
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataLoad(err.to_string())
    }
}
