//! Test doubles shared by the isolation, pool and bot tests.
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use fm_exec::{ExecResult, Runner};
use fm_model::{FingerprintRecord, Flag, ResultRecord, RunOutput, Source};

use crate::aggregate::Reporter;

/// Runner that fails any invocation containing a poison source and otherwise reports
/// `hash_<name>` (or an override) for every source. Records every invocation.
#[derive(Default)]
pub struct StubRunner {
    poison: Vec<Source>,
    overrides: HashMap<Source, String>,
    calls: Mutex<Vec<Vec<Source>>>,
}

impl StubRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poison(mut self, name: &str) -> Self {
        self.poison.push(Source::from(name));
        self
    }

    pub fn fingerprint(mut self, name: &str, hash: &str) -> Self {
        self.overrides.insert(Source::from(name), hash.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Vec<Source>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn hash_of(source: &Source) -> String {
        format!("hash_{source}")
    }
}

#[async_trait]
impl Runner for StubRunner {
    fn name(&self) -> &str {
        "stub"
    }

    fn command_line(&self, sources: &[Source], flags: &[Flag]) -> String {
        let mut parts = vec!["stub".to_string()];
        parts.extend(flags.iter().map(ToString::to_string));
        parts.push("-s".to_string());
        parts.extend(sources.iter().map(ToString::to_string));
        parts.join(" ")
    }

    async fn run(&self, sources: &[Source], _flags: &[Flag]) -> ExecResult<RunOutput> {
        self.calls.lock().unwrap().push(sources.to_vec());

        if let Some(bad) = sources.iter().find(|s| self.poison.contains(s)) {
            return Ok(RunOutput::failure(vec![format!("{bad} crashed")]));
        }

        let records = sources
            .iter()
            .map(|s| FingerprintRecord {
                source: s.clone(),
                fingerprint: self
                    .overrides
                    .get(s)
                    .cloned()
                    .unwrap_or_else(|| Self::hash_of(s)),
            })
            .collect();
        Ok(RunOutput::success(records))
    }
}

/// Reporter that keeps every record in memory.
#[derive(Default)]
pub struct MemoryReporter {
    records: Mutex<Vec<ResultRecord>>,
}

impl MemoryReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<ResultRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<ResultRecord> {
        self.records().into_iter().filter(|r| r.is_failure()).collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, record: &ResultRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}
