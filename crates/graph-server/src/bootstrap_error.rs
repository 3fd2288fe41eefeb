//! Process bootstrap failures, with the exit codes `main` reports them under.
use std::fmt;

use crate::config::ConfigError;

/// Everything that can keep the server from reaching its accept loop.
///
/// - Exit code **2** — the service could not even start: bad config, no
///   database connection, the listen address is taken.
/// - Exit code **1** — the server started but the accept loop itself failed.
#[derive(Debug)]
pub enum BootstrapError {
    Config(ConfigError),
    Connect(String),
    Bind { addr: String, detail: String },
    Serve(String),
}

impl BootstrapError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Connect(_) | Self::Bind { .. } => 2,
            Self::Serve(_) => 1,
        }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Connect(detail) => write!(f, "failed to connect to postgres: {detail}"),
            Self::Bind { addr, detail } => write!(f, "failed to bind {addr}: {detail}"),
            Self::Serve(detail) => write!(f, "server loop failed: {detail}"),
        }
    }
}

impl std::error::Error for BootstrapError {}

impl From<ConfigError> for BootstrapError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_errors_exit_2() {
        let e = BootstrapError::Config(ConfigError::NotFound(PathBuf::from("x")));
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn serve_errors_exit_1() {
        let e = BootstrapError::Serve("accept loop panicked".to_owned());
        assert_eq!(e.exit_code(), 1);
    }
}
