//! Subprocess runner: `<program> -i <resources> <flags...> -s <sources...>`.
use std::{path::PathBuf, process::Stdio, time::Duration};

use async_trait::async_trait;
use fm_model::{Flag, RunOutput, Source};
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::{
    error::{ExecError, ExecResult},
    runner::Runner,
    util::{kill_graceful, read_all},
};

/// Process configuration baked into the runner instance.
#[derive(Clone, Debug)]
pub struct ProcConfig {
    pub program: PathBuf,
    /// Passed to the program as `-i <resources>`.
    pub resources: PathBuf,
    /// Per-invocation deadline. `None` waits for the child however long it takes.
    pub timeout: Option<Duration>,
}

impl Default for ProcConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::new(),
            resources: PathBuf::from("resources"),
            timeout: None,
        }
    }
}

pub struct ProcRunner {
    name: String,
    cfg: ProcConfig,
}

impl ProcRunner {
    pub fn new(cfg: ProcConfig) -> ExecResult<Self> {
        if cfg.program.as_os_str().is_empty() {
            return Err(ExecError::MissingProgram);
        }
        let name = cfg.program.display().to_string();
        Ok(Self { name, cfg })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Full argument vector for one invocation.
    pub fn args(&self, sources: &[Source], flags: &[Flag]) -> Vec<String> {
        let mut args = Vec::with_capacity(3 + flags.len() * 2 + sources.len());
        args.push("-i".to_string());
        args.push(self.cfg.resources.display().to_string());
        for flag in flags {
            flag.push_tokens(&mut args);
        }
        args.push("-s".to_string());
        args.extend(sources.iter().map(|s| s.as_str().to_string()));
        args
    }

    /// Run `<program> -i <resources> <flag>` and return its non-empty stdout lines.
    ///
    /// Used to ask the runner for its built-in gm and test names.
    pub async fn query(&self, flag: &str) -> ExecResult<Vec<String>> {
        let resources = self.cfg.resources.display().to_string();
        trace!(target: "fm.exec.proc", program = %self.name, flag, "query");

        let output = Command::new(&self.cfg.program)
            .args(["-i", resources.as_str(), flag])
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| ExecError::Spawn(format!("{}: {e}", self.name)))?;

        if let Some(err) = ExecError::from_status(output.status) {
            return Err(err);
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl Runner for ProcRunner {
    fn name(&self) -> &str {
        &self.name
    }

    fn command_line(&self, sources: &[Source], flags: &[Flag]) -> String {
        let mut parts = vec![self.cfg.program.display().to_string()];
        parts.extend(self.args(sources, flags));
        parts.join(" ")
    }

    async fn run(&self, sources: &[Source], flags: &[Flag]) -> ExecResult<RunOutput> {
        let args = self.args(sources, flags);
        trace!(target: "fm.exec.proc", program = %self.name, ?args, "spawn");

        let mut child = Command::new(&self.cfg.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecError::Spawn(format!("{}: {e}", self.name)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExecError::Io("stdout not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ExecError::Io("stderr not captured".into()))?;

        // Both pipes drain concurrently so a chatty child never blocks on a full pipe.
        let read_stdout = tokio::spawn(read_all(stdout));
        let read_stderr = tokio::spawn(read_all(stderr));

        let status = match self.cfg.timeout {
            None => Ok(child.wait().await?),
            Some(limit) => tokio::select! {
                status = child.wait() => Ok(status?),
                _ = tokio::time::sleep(limit) => {
                    warn!(target: "fm.exec.proc", program = %self.name, ?limit, "deadline hit; killing child");
                    kill_graceful(&mut child).await?;
                    Err(ExecError::TimedOut(limit))
                }
            },
        };

        let stdout = join_pipe(read_stdout).await?;
        let stderr = join_pipe(read_stderr).await?;

        let verdict = match status {
            Ok(status) => ExecError::from_status(status),
            Err(timed_out) => Some(timed_out),
        };

        let mut out = RunOutput::from_streams(verdict.is_none(), &stdout, &stderr);
        match verdict {
            None => debug!(target: "fm.exec.proc", sources = sources.len(), records = out.records.len(), "exit success"),
            Some(err) => {
                debug!(target: "fm.exec.proc", sources = sources.len(), %err, "run failed");
                out.stderr.push(format!("[{err}]"));
            }
        }
        Ok(out)
    }
}

async fn join_pipe(handle: tokio::task::JoinHandle<std::io::Result<String>>) -> ExecResult<String> {
    handle
        .await
        .map_err(|e| ExecError::Io(format!("pipe reader: {e}")))?
        .map_err(ExecError::from)
}
