use flightdesk_core::session::SearchError;
use flightdesk_core::CoreError;
use flightdesk_shared::UnknownStatus;

/// Problems with a line typed into the interactive session. None of them
/// change the session state.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command {0:?}; type `help` for the list")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("Invalid row number {0:?}")]
    InvalidRow(String),
    #[error(transparent)]
    Status(#[from] UnknownStatus),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Search(#[from] SearchError),
}
