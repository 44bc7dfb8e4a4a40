use std::fmt;

use crate::Fingerprint;

/// Terminal outcome of a single-source run worth telling a human about.
///
/// Silent successes never produce a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResultRecord {
    /// The run succeeded but produced a fingerprint nobody has seen before.
    Novel {
        command: String,
        fingerprint: Fingerprint,
    },
    /// The run failed on its own.
    Failed {
        command: String,
        stderr: Vec<String>,
    },
}

impl ResultRecord {
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, ResultRecord::Failed { .. })
    }

    pub fn command(&self) -> &str {
        match self {
            ResultRecord::Novel { command, .. } | ResultRecord::Failed { command, .. } => command,
        }
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultRecord::Novel {
                command,
                fingerprint,
            } => write!(f, "{command} #{fingerprint}"),
            ResultRecord::Failed { command, stderr } => {
                write!(f, "{command} #failed:")?;
                for line in stderr {
                    write!(f, "\n\t{line}")?;
                }
                Ok(())
            }
        }
    }
}
