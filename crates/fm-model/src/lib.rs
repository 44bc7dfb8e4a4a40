//! Plain data shared by every fm crate.
//!
//! Nothing here performs IO; the types describe what gets run (`Source`, `Flag`, `Job`)
//! and what a single runner invocation produced (`RunOutput`, `ResultRecord`).

mod source;
pub use source::Source;

mod flag;
pub use flag::Flag;

mod job;
pub use job::Job;

mod output;
pub use output::{FingerprintRecord, RunOutput};

mod record;
pub use record::ResultRecord;

/// Content fingerprint reported by the runner for one source.
pub type Fingerprint = String;
