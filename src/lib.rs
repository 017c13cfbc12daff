// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod store;

use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::config::loader::resolve_store_root;
use crate::store::{audit_store, resolve_chain, ProcessStore, ProjectPath, ResolvedProcess};

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> Result<()> {
    let settings_path = Path::new(&args.config);
    let store_root = resolve_store_root(args.store_root.as_deref(), settings_path)?;

    match args.command {
        Command::Resolve {
            trigger,
            project,
            json,
        } => cmd_resolve(&store_root, &trigger, &project, json),
        Command::Chain { project, json } => cmd_chain(&store_root, &project, json),
        Command::Check => cmd_check(&store_root),
    }
}

fn cmd_resolve(store_root: &Path, trigger: &str, project: &str, json: bool) -> Result<()> {
    let project: ProjectPath = project.parse()?;
    let store = ProcessStore::new(store_root);

    let resolved: Vec<ResolvedProcess> = store.resolve(trigger, &project).collect();
    info!(
        trigger,
        project = %project,
        count = resolved.len(),
        "resolution complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    println!(
        "processes for trigger '{trigger}' under '{project}' ({}):",
        resolved.len()
    );
    for process in &resolved {
        println!("  - {}", process.name);
        println!("      pdef: {}", process.source.display());
        match &process.config {
            Some(config) => println!("      config: {}", serde_json::to_string(config)?),
            None => println!("      config: (none)"),
        }
    }

    Ok(())
}

fn cmd_chain(store_root: &Path, project: &str, json: bool) -> Result<()> {
    let project: ProjectPath = project.parse()?;
    let chain = resolve_chain(store_root, &project);

    if json {
        println!("{}", serde_json::to_string_pretty(&chain)?);
        return Ok(());
    }

    println!(
        "inheritance chain for '{project}' ({} directories, ancestor first):",
        chain.len()
    );
    for dir in &chain {
        println!("  - {}  ({})", dir.project, dir.path.display());
    }

    Ok(())
}

fn cmd_check(store_root: &Path) -> Result<()> {
    let report = audit_store(store_root)?;

    if report.findings.is_empty() {
        println!("store audit clean: {}", store_root.display());
        return Ok(());
    }

    for finding in &report.findings {
        println!(
            "{}: {}: {}",
            finding.severity,
            finding.path.display(),
            finding.message
        );
    }

    if report.has_errors() {
        let errors = report
            .findings
            .iter()
            .filter(|f| f.severity == store::Severity::Error)
            .count();
        bail!("store audit found {errors} error(s)");
    }

    Ok(())
}
