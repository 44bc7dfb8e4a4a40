use crate::{Fingerprint, Source};

/// `(source, fingerprint)` pair parsed from one runner stdout line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FingerprintRecord {
    pub source: Source,
    pub fingerprint: Fingerprint,
}

/// What one runner invocation produced.
///
/// Only inspected right after the runner exits; never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunOutput {
    pub succeeded: bool,
    pub records: Vec<FingerprintRecord>,
    pub stderr: Vec<String>,
}

impl RunOutput {
    pub fn success(records: Vec<FingerprintRecord>) -> Self {
        Self {
            succeeded: true,
            records,
            stderr: Vec::new(),
        }
    }

    pub fn failure(stderr: Vec<String>) -> Self {
        Self {
            succeeded: false,
            records: Vec::new(),
            stderr,
        }
    }

    /// Build from the raw streams of a finished runner process.
    ///
    /// Stdout lines need at least a name and a fingerprint field; anything after the second
    /// field is ignored and shorter lines are skipped.
    pub fn from_streams(succeeded: bool, stdout: &str, stderr: &str) -> Self {
        let records = stdout
            .lines()
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                let source = fields.next()?;
                let fingerprint = fields.next()?;
                Some(FingerprintRecord {
                    source: Source::from(source),
                    fingerprint: fingerprint.to_string(),
                })
            })
            .collect();

        Self {
            succeeded,
            records,
            stderr: stderr.lines().map(str::to_string).collect(),
        }
    }
}
