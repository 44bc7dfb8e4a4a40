use serde::{Deserialize, Serialize};

use crate::{Flag, Source};

/// One parsed job line: what to run and how.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<Flag>,
}

impl Job {
    pub fn new(sources: Vec<Source>, flags: Vec<Flag>) -> Self {
        Self { sources, flags }
    }

    /// A job without sources yields no work (blank or commented-out line).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Flags rendered the way they are passed to the runner, joined by spaces.
    pub fn flags_display(&self) -> String {
        self.flags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
