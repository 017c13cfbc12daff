use std::error::Error;
use std::fs;

use procstore::store::{resolve_chain, ProjectPath};
use procstore_test_utils::builders::StoreBuilder;
use procstore_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn chain_idents(store: &StoreBuilder, project: &str) -> Vec<String> {
    let project: ProjectPath = project.parse().expect("valid project identifier");
    resolve_chain(store.root(), &project)
        .iter()
        .map(|dir| dir.project.to_string())
        .collect()
}

#[test]
fn chain_is_ancestor_first() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store
        .project("A")
        .parent("B", "A")
        .parent("C", "B");

    assert_eq!(chain_idents(&store, "C"), vec!["A", "B", "C"]);
    Ok(())
}

#[test]
fn missing_directory_yields_empty_chain() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();

    assert!(chain_idents(&store, "Nope").is_empty());
    Ok(())
}

#[test]
fn missing_parent_directory_contributes_nothing() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store.parent("Child", "Gone");

    assert_eq!(chain_idents(&store, "Child"), vec!["Child"]);
    Ok(())
}

#[test]
fn cycle_drops_the_directory_that_closes_it() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store.parent("A", "B").parent("B", "A");

    // Resolving A: B's parent closes the cycle, so B is dropped while A
    // still contributes itself.
    assert_eq!(chain_idents(&store, "A"), vec!["A"]);
    Ok(())
}

#[test]
fn cycle_chain_contains_no_repeated_directory() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store.parent("A", "B").parent("B", "C").parent("C", "A");

    let project: ProjectPath = "A".parse()?;
    let chain = resolve_chain(store.root(), &project);

    let mut paths: Vec<_> = chain.iter().map(|d| d.path.clone()).collect();
    let before = paths.len();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), before);
    Ok(())
}

#[test]
fn self_parent_yields_empty_chain() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store.parent("Selfish", "Selfish");

    assert!(chain_idents(&store, "Selfish").is_empty());
    Ok(())
}

#[test]
fn descendants_below_a_cycle_still_contribute() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store
        .parent("A", "B")
        .parent("B", "A")
        .parent("Leaf", "A");

    // Leaf -> A -> B -> A: A closes the cycle and is dropped, Leaf remains.
    assert_eq!(chain_idents(&store, "Leaf"), vec!["Leaf"]);
    Ok(())
}

#[test]
fn non_directory_project_path_contributes_nothing() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    fs::write(store.root().join("Plainfile"), "not a directory")?;

    assert!(chain_idents(&store, "Plainfile").is_empty());
    Ok(())
}

#[test]
fn unparsable_parent_pointer_is_treated_as_no_parent() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store.project("A").parent("B", "../escape");

    assert_eq!(chain_idents(&store, "B"), vec!["B"]);
    Ok(())
}

#[test]
fn parent_pointer_is_trimmed_and_only_first_line_counts() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store
        .project("A")
        .file("B", "_parent", "  A  \nthis line is ignored\n");

    assert_eq!(chain_idents(&store, "B"), vec!["A", "B"]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlinked_project_resolves_to_its_real_location() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store.pdef("Real", "t", "p", "text");
    store.symlink_project("Alias", "Real");

    let project: ProjectPath = "Alias".parse()?;
    let chain = resolve_chain(store.root(), &project);

    assert_eq!(chain.len(), 1);
    let real = fs::canonicalize(store.project_dir("Real"))?;
    assert_eq!(chain[0].path, real);
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlink_into_own_chain_is_detected_as_cycle() -> TestResult {
    init_tracing();
    let store = StoreBuilder::new();
    store.project("Real");
    store.symlink_project("Alias", "Real");
    // Real inherits from Alias, which is really Real again.
    store.parent("Real", "Alias");

    assert!(chain_idents(&store, "Real").is_empty());
    Ok(())
}
