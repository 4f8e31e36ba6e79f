//! Process adapter for the cirkit synthesis shell.
//!
//! One persistent shell is spawned per suite run in batch-log mode
//! (`-b -l -`): the shell reads commands from stdin and appends one JSON log
//! entry per executed command to stdout. Every entry carries the engine's
//! own `time_total` measurement; `ps` entries additionally carry the
//! structural statistics fields.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Duration;

use serde_json::Value;

use crate::repr::ReprType;
use crate::{BenchError, BenchResult};

use super::traits::{NetworkStats, OpReport, SynthesisEngine};

/// Configuration for the cirkit shell adapter.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Path to the shell binary
    pub shell_path: PathBuf,
    /// Extra arguments appended to the spawn command line
    pub extra_args: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig { shell_path: PathBuf::from("cirkit"), extra_args: Vec::new() }
    }
}

impl ShellConfig {
    pub fn new(shell_path: impl Into<PathBuf>) -> Self {
        ShellConfig { shell_path: shell_path.into(), ..Default::default() }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

/// A live cirkit shell session.
pub struct ShellEngine {
    config: ShellConfig,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ShellEngine {
    /// Spawn the shell and attach to its command stream.
    pub fn spawn(config: ShellConfig) -> BenchResult<Self> {
        let mut cmd = Command::new(&config.shell_path);
        cmd.arg("-b").arg("-l").arg("-");
        for arg in &config.extra_args {
            cmd.arg(arg);
        }
        cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::null());

        let mut child = cmd.spawn().map_err(|e| {
            BenchError::Engine(format!("failed to spawn {}: {e}", config.shell_path.display()))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BenchError::Engine("shell stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| BenchError::Engine("shell stdout unavailable".into()))?;

        Ok(ShellEngine { config, child, stdin, stdout })
    }

    /// Send one command and return its log entry.
    fn execute(&mut self, command: &str) -> BenchResult<Value> {
        writeln!(self.stdin, "{command}")
            .map_err(|e| BenchError::Engine(format!("failed to send '{command}': {e}")))?;
        self.stdin
            .flush()
            .map_err(|e| BenchError::Engine(format!("failed to flush '{command}': {e}")))?;

        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .map_err(|e| BenchError::Engine(format!("failed to read log entry: {e}")))?;
            if n == 0 {
                return Err(BenchError::Engine(format!("shell exited while running '{command}'")));
            }
            let trimmed = line.trim();
            // The shell may echo prompts or banner text; log entries are the
            // only JSON-object lines on stdout.
            if trimmed.starts_with('{') {
                return serde_json::from_str(trimmed).map_err(|e| {
                    BenchError::Engine(format!("malformed log entry for '{command}': {e}"))
                });
            }
        }
    }

    fn execute_op(&mut self, command: &str) -> BenchResult<OpReport> {
        let entry = self.execute(command)?;
        op_report_of(&entry)
    }
}

impl Drop for ShellEngine {
    fn drop(&mut self) {
        let _ = writeln!(self.stdin, "quit");
        let _ = self.stdin.flush();
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl SynthesisEngine for ShellEngine {
    fn name(&self) -> &str {
        "cirkit"
    }

    fn version(&self) -> Option<String> {
        Command::new(&self.config.shell_path)
            .arg("--version")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn read_network(&mut self, repr: ReprType, source: &Path) -> BenchResult<()> {
        self.execute(&read_command(repr, source))?;
        Ok(())
    }

    fn clear_store(&mut self) -> BenchResult<()> {
        self.execute(clear_command())?;
        Ok(())
    }

    fn network_stats(&mut self, repr: ReprType) -> BenchResult<NetworkStats> {
        let entry = self.execute(&format!("ps --silent --{repr}"))?;
        network_stats_of(&entry)
    }

    fn mapped_stats(&mut self) -> BenchResult<NetworkStats> {
        let entry = self.execute("ps --silent --lut")?;
        network_stats_of(&entry)
    }

    fn lut_map(&mut self, repr: ReprType) -> BenchResult<OpReport> {
        self.execute_op(&format!("lut_mapping --{repr}"))
    }

    fn collapse_mapping(&mut self, repr: ReprType) -> BenchResult<OpReport> {
        self.execute_op(&format!("collapse_mapping --{repr}"))
    }

    fn area_restructure(&mut self) -> BenchResult<OpReport> {
        self.execute_op("mighty --area_aware")
    }

    fn resubstitute(&mut self, max_pis: u32, depth: u32, zero_gain: bool) -> BenchResult<OpReport> {
        let mut command = format!("resub --max_pis {max_pis} --depth {depth}");
        if zero_gain {
            command.push_str(" --zero_gain");
        }
        self.execute_op(&command)
    }

    fn cut_rewrite(
        &mut self,
        repr: ReprType,
        lut_size: u32,
        zero_gain: bool,
    ) -> BenchResult<OpReport> {
        let mut command = format!("cut_rewrite --{repr} --strategy 0 --lutsize {lut_size}");
        if zero_gain {
            command.push_str(" --zero_gain");
        }
        self.execute_op(&command)
    }

    fn refactor(&mut self, zero_gain: bool) -> BenchResult<OpReport> {
        let mut command = String::from("refactor --strategy 1");
        if zero_gain {
            command.push_str(" --zero_gain");
        }
        self.execute_op(&command)
    }

    fn write_network(&mut self, repr: ReprType, destination: &Path) -> BenchResult<()> {
        self.execute(&write_command(repr, destination))?;
        Ok(())
    }
}

fn read_command(repr: ReprType, source: &Path) -> String {
    format!("read_aiger --{repr} {}", source.display())
}

fn clear_command() -> &'static str {
    "store --clear --aig --mig --xag --xmg --lut"
}

fn write_command(repr: ReprType, destination: &Path) -> String {
    format!("write_aiger --{repr} {}", destination.display())
}

/// Extract the engine runtime from a log entry.
fn op_report_of(entry: &Value) -> BenchResult<OpReport> {
    let secs = entry
        .get("time_total")
        .and_then(Value::as_f64)
        .ok_or_else(|| BenchError::Engine("log entry missing 'time_total'".into()))?;
    Ok(OpReport::new(Duration::from_secs_f64(secs)))
}

/// Extract structural statistics from a `ps` log entry.
fn network_stats_of(entry: &Value) -> BenchResult<NetworkStats> {
    let field = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_u64)
            .ok_or_else(|| BenchError::Engine(format!("stats entry missing '{key}'")))
    };
    Ok(NetworkStats {
        inputs: field("pis")?,
        outputs: field("pos")?,
        gates: field("gates")?,
        depth: field("depth")?,
    })
}
