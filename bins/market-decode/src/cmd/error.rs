use flatstore::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum MarketDecodeError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{failed} of {total} documents failed to decode")]
    Partial { failed: usize, total: usize },

    #[error("decode task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}
