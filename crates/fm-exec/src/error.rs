use thiserror::Error;

pub type ExecResult<T> = Result<T, ExecError>;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("runner program is empty")]
    MissingProgram,
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("non-zero exit code: {code}")]
    NonZeroExit { code: i32 },
    #[error("killed by signal")]
    KilledBySignal,
    #[error("timed out after {0:?}")]
    TimedOut(std::time::Duration),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExecError {
    fn from(e: std::io::Error) -> Self {
        ExecError::Io(e.to_string())
    }
}

impl ExecError {
    /// Map a finished process status to an error, if it is one.
    pub fn from_status(status: std::process::ExitStatus) -> Option<Self> {
        if status.success() {
            None
        } else if let Some(code) = status.code() {
            Some(ExecError::NonZeroExit { code })
        } else {
            Some(ExecError::KilledBySignal)
        }
    }
}
