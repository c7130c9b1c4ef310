use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("enter your access code")]
    EmptyCode,
    #[error("access code not recognized; check it with your coordinator")]
    InvalidCode,
    #[error("sign in first")]
    NotAuthenticated,
    #[error("only a {0} can do this")]
    WrongRole(&'static str),
    #[error("{action} is not available on the {screen} screen")]
    UnexpectedScreen {
        action: &'static str,
        screen: &'static str,
    },
    #[error("unknown grade: {0}")]
    UnknownGrade(String),
    #[error("trimester must be between 1 and 3, got {0}")]
    UnknownTrimester(i64),
    #[error("project {0} is not part of the selected syllabus")]
    UnknownProject(String),
    #[error("step {index} is out of range; the project has {total} steps")]
    StepOutOfRange { index: usize, total: usize },
    #[error("session store failed: {0}")]
    Store(String),
}

impl SessionError {
    /// Error code reported over IPC.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::EmptyCode => "bad_params",
            SessionError::InvalidCode => "invalid_code",
            SessionError::NotAuthenticated => "not_authenticated",
            SessionError::WrongRole(_) => "forbidden",
            SessionError::UnexpectedScreen { .. } => "bad_state",
            SessionError::UnknownGrade(_)
            | SessionError::UnknownTrimester(_)
            | SessionError::UnknownProject(_)
            | SessionError::StepOutOfRange { .. } => "not_found",
            SessionError::Store(_) => "store_failed",
        }
    }
}
