use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine. Configuration problems fail loudly instead of letting
/// NaN or Inf propagate into the next generation.
#[derive(Debug, Error)]
pub enum Error {
    /// A constant in `Config` is out of range, e.g. a non-positive smoothing radius or timestep.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Gate geometry is outside the domain, or the gap width is non-positive.
    #[error("invalid gate: {0}")]
    InvalidGate(String),

    /// A particle accumulated zero, negative, or non-finite density; its acceleration would
    /// blow up.
    #[error("non-positive density {density} at particle {index}")]
    NonPositiveDensity { index: usize, density: f64 },

    /// Integration produced a NaN or infinite position or velocity.
    #[error("non-finite state at particle {index}")]
    NonFinite { index: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),

    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),
}
