//! # Energy Node
//!
//! ```text
//! energy-node [SCRIPT]
//! ```
//!
//! Runs the invocations in `SCRIPT` (or stdin) and prints one result line
//! per invocation.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tracing::info;

use energy_node::config::RuntimeConfig;
use energy_node::script::format_response;
use energy_node::{init_tracing, NodeRuntime};

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("invalid configuration")?;
    init_tracing(&config).context("failed to initialize tracing")?;

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("cannot open script {path}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut node = NodeRuntime::open(config).context("failed to open ledger")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in input.lines() {
        let line = line.context("failed to read invocation")?;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        if let Some(response) = node.execute_line(&line, &timestamp) {
            writeln!(out, "{}", format_response(&response)).context("failed to write result")?;
        }
    }

    node.persist().context("failed to persist ledger")?;

    let stats = node.stats();
    info!(
        invocations = stats.invocations,
        succeeded = stats.succeeded,
        rejected = stats.rejected,
        failed = stats.failed,
        "Energy node finished"
    );
    Ok(())
}
