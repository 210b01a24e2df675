use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Malformed user input (bad trait/tier/gene selection, empty name).
    /// Recovered locally; the UI re-prompts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A non-bijective run config reached the simulation, or a session was
    /// misused (started while a run is already in progress). Indicates a
    /// defect in the caller, not user error.
    #[error("invalid run config: {0}")]
    InvalidConfig(String),

    /// Transient I/O failure reading or writing the leaderboard file.
    /// The display retries on its next poll; the writer keeps the pending
    /// record and can resubmit.
    #[error("leaderboard store unavailable: {0}")]
    StoreUnavailable(#[from] std::io::Error),

    /// The durable leaderboard record could not be decoded.
    #[error("leaderboard record corrupt: {0}")]
    CorruptStore(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
