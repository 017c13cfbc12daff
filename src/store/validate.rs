// src/store/validate.rs

//! Store-wide audit.
//!
//! The resolution engine soft-fails its way around broken store contents;
//! this module exists so operators can find the breakage before it silently
//! shrinks resolution results. It walks the whole store and reports
//! inheritance cycles, dangling `_parent` pointers, invalid JSON, and merge
//! fragments with no base configuration anywhere in their chain.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use tracing::debug;

use crate::store::chain::{resolve_chain, PARENT_POINTER_FILE};
use crate::store::conf::Config;
use crate::store::project::ProjectPath;
use crate::store::scan::scan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One audit finding, tied to the path that caused it.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default, Serialize)]
pub struct AuditReport {
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }

    fn error(&mut self, path: impl Into<PathBuf>, message: String) {
        self.findings.push(Finding {
            severity: Severity::Error,
            path: path.into(),
            message,
        });
    }

    fn warning(&mut self, path: impl Into<PathBuf>, message: String) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            path: path.into(),
            message,
        });
    }
}

/// Audit every project directory under `root`.
///
/// Fails only on an unreadable store root; everything found *inside* the
/// store becomes a finding, not an error.
pub fn audit_store(root: &Path) -> Result<AuditReport> {
    let mut report = AuditReport::default();

    let dirs = collect_project_dirs(root)?;
    debug!(root = %root.display(), directories = dirs.len(), "auditing store");

    let mut edges: Vec<(String, String)> = Vec::new();
    let mut nodes: Vec<String> = Vec::new();

    for dir in &dirs {
        let project = project_for_dir(root, dir);
        nodes.push(project.to_string());
        audit_parent_pointer(root, dir, &project, &mut edges, &mut report);
        audit_config_files(root, dir, &project, &mut report);
    }

    audit_inheritance_graph(root, &nodes, &edges, &mut report);

    Ok(report)
}

/// All directories under `root`, recursively, symlinks not followed.
fn collect_project_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries =
            fs::read_dir(&dir).with_context(|| format!("listing store directory {:?}", dir))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("reading entry in {:?}", dir))?;
            let file_type = entry
                .file_type()
                .with_context(|| format!("stat {:?}", entry.path()))?;
            if file_type.is_dir() {
                dirs.push(entry.path());
                stack.push(entry.path());
            }
        }
    }

    dirs.sort();
    Ok(dirs)
}

fn project_for_dir(root: &Path, dir: &Path) -> ProjectPath {
    let segments = dir
        .strip_prefix(root)
        .unwrap_or(dir)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());
    ProjectPath::from_segments(segments)
}

fn audit_parent_pointer(
    root: &Path,
    dir: &Path,
    project: &ProjectPath,
    edges: &mut Vec<(String, String)>,
    report: &mut AuditReport,
) {
    let pointer = dir.join(PARENT_POINTER_FILE);
    let contents = match fs::read_to_string(&pointer) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
        Err(err) => {
            report.warning(&pointer, format!("unreadable _parent pointer: {err}"));
            return;
        }
    };

    let line = contents.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        report.error(&pointer, "empty _parent pointer".to_string());
        return;
    }

    let parent: ProjectPath = match line.parse() {
        Ok(parent) => parent,
        Err(err) => {
            report.error(&pointer, format!("unparsable _parent pointer: {err}"));
            return;
        }
    };

    if !parent.dir_under(root).is_dir() {
        report.error(
            &pointer,
            format!("dangling _parent pointer: '{parent}' is not a project directory"),
        );
        return;
    }

    edges.push((parent.to_string(), project.to_string()));
}

fn audit_config_files(root: &Path, dir: &Path, project: &ProjectPath, report: &mut AuditReport) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            report.warning(dir, format!("unreadable directory: {err}"));
            return;
        }
    };

    for entry in entries.flatten() {
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        let path = entry.path();

        if let Some(stem) = file_name.strip_suffix(".merge_conf") {
            check_json(&path, report);
            audit_merge_base(root, project, stem, &path, report);
        } else if file_name.ends_with(".conf") {
            check_json(&path, report);
        }
    }
}

fn check_json(path: &Path, report: &mut AuditReport) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            report.warning(path, format!("unreadable config file: {err}"));
            return;
        }
    };
    if let Err(err) = Config::parse(&text) {
        report.error(path, format!("invalid JSON (after comment stripping): {err}"));
    }
}

/// A merge fragment needs a base `.conf` for the same trigger and process
/// name somewhere in its inheritance chain, up to and including its own
/// directory.
fn audit_merge_base(
    root: &Path,
    project: &ProjectPath,
    stem: &str,
    path: &Path,
    report: &mut AuditReport,
) {
    // `<trigger>.<name>.merge_conf`: the trigger is the first dot-separated
    // component, the process name is the rest.
    let Some((trigger, name)) = stem.split_once('.') else {
        report.warning(
            path,
            "merge fragment file name has no process name component".to_string(),
        );
        return;
    };

    let chain = resolve_chain(root, project);
    let has_base = chain
        .iter()
        .any(|dir| scan(&dir.path, trigger).base_configs.contains_key(name));

    if !has_base {
        report.error(
            path,
            format!(
                "merge fragment for process '{name}' (trigger '{trigger}') has no base \
                 .conf anywhere in its inheritance chain"
            ),
        );
    }
}

fn audit_inheritance_graph(
    root: &Path,
    nodes: &[String],
    edges: &[(String, String)],
    report: &mut AuditReport,
) {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for node in nodes {
        graph.add_node(node.as_str());
    }
    for (parent, child) in edges {
        graph.add_edge(parent.as_str(), child.as_str(), ());
    }

    // Every strongly connected component with more than one node (or a
    // self-edge) is an inheritance cycle.
    for scc in tarjan_scc(&graph) {
        let cyclic = scc.len() > 1 || scc.iter().any(|&n| graph.contains_edge(n, n));
        if cyclic {
            let mut members: Vec<&str> = scc.clone();
            members.sort();
            report.error(
                root,
                format!("inheritance cycle among projects: {}", members.join(" -> ")),
            );
        }
    }
}
