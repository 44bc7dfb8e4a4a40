//! Job line parsing: `gms b=cpu ct=8888 # comment` → sources + flags.
use fm_model::{Flag, Job, Source};

use crate::catalog::Catalog;

/// Parse one job from its tokens.
///
/// Left to right: a `#...` token ends the line, a catalog group name expands to its sources,
/// `key=value` becomes a flag, anything else is taken as a source name. Never fails; an
/// unknown shorthand simply becomes a one-off source.
pub fn parse<I, S>(tokens: I, catalog: &Catalog) -> Job
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut job = Job::default();
    for token in tokens {
        let token = token.as_ref();

        if token.starts_with('#') {
            break;
        }

        if let Some(group) = catalog.get(token) {
            job.sources.extend_from_slice(group);
            continue;
        }

        if let Some((key, value)) = split_flag(token) {
            job.flags.push(Flag::from_pair(key, value));
            continue;
        }

        job.sources.push(Source::from(token));
    }
    job
}

/// Parse a whole text line (one line of a job script).
pub fn parse_line(line: &str, catalog: &Catalog) -> Job {
    parse(line.split_whitespace(), catalog)
}

// Exactly one '='; `a=b=c` is a source name.
fn split_flag(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=')?;
    if value.contains('=') {
        return None;
    }
    Some((key, value))
}
