use std::error::Error;

use procstore::store::Config;
use procstore_test_utils::init_tracing;
use serde_json::json;

type TestResult = Result<(), Box<dyn Error>>;

fn cfg(json: &str) -> Config {
    Config::parse(json).expect("valid test config")
}

#[test]
fn null_deletes_a_nested_key() -> TestResult {
    init_tracing();
    let mut base = cfg(r#"{"a":{"x":1,"y":2}}"#);
    base.merge_fragment(cfg(r#"{"a":{"y":null}}"#));

    assert_eq!(base, cfg(r#"{"a":{"x":1}}"#));
    Ok(())
}

#[test]
fn deleting_an_absent_key_is_a_no_op() -> TestResult {
    init_tracing();
    let mut base = cfg(r#"{"a":1}"#);
    base.merge_fragment(cfg(r#"{"missing":null}"#));

    assert_eq!(base, cfg(r#"{"a":1}"#));
    Ok(())
}

#[test]
fn nested_objects_merge_recursively() -> TestResult {
    init_tracing();
    let mut base = cfg(r#"{"outer":{"keep":1,"replace":2}}"#);
    base.merge_fragment(cfg(r#"{"outer":{"replace":3,"add":4}}"#));

    assert_eq!(base, cfg(r#"{"outer":{"keep":1,"replace":3,"add":4}}"#));
    Ok(())
}

#[test]
fn nested_object_is_created_when_missing() -> TestResult {
    init_tracing();
    let mut base = Config::new();
    base.merge_fragment(cfg(r#"{"a":{"b":{"c":1}}}"#));

    assert_eq!(base, cfg(r#"{"a":{"b":{"c":1}}}"#));
    Ok(())
}

#[test]
fn non_object_base_value_is_replaced_by_the_fragment_object() -> TestResult {
    init_tracing();
    let mut base = cfg(r#"{"a":"scalar"}"#);
    base.merge_fragment(cfg(r#"{"a":{"b":1}}"#));

    assert_eq!(base, cfg(r#"{"a":{"b":1}}"#));
    Ok(())
}

#[test]
fn lists_are_replaced_wholesale() -> TestResult {
    init_tracing();
    let mut base = cfg(r#"{"l":[1,2,3]}"#);
    base.merge_fragment(cfg(r#"{"l":[9]}"#));

    assert_eq!(base, cfg(r#"{"l":[9]}"#));
    Ok(())
}

#[test]
fn scalars_overwrite() -> TestResult {
    init_tracing();
    let mut base = cfg(r#"{"k":"old","untouched":true}"#);
    base.merge_fragment(cfg(r#"{"k":"new"}"#));

    assert_eq!(base, cfg(r#"{"k":"new","untouched":true}"#));
    Ok(())
}

#[test]
fn parse_rejects_non_object_top_level() {
    init_tracing();
    assert!(Config::parse("[1,2,3]").is_err());
    assert!(Config::parse("\"just a string\"").is_err());
    assert!(Config::parse("").is_err());
}

#[test]
fn whole_line_comments_are_stripped() -> TestResult {
    init_tracing();
    let config = Config::parse("# top\n{\n# mid\n\"k\": 1\n}\n# tail\n")?;

    assert_eq!(config, cfg(r#"{"k":1}"#));
    Ok(())
}

#[test]
fn inline_comments_are_not_supported() {
    init_tracing();
    assert!(Config::parse("{\"k\": 1 # inline\n}").is_err());
}

#[test]
fn accessors_see_through_nesting() -> TestResult {
    init_tracing();
    let config = cfg(r#"{"a":{"b":{"s":"v","n":7,"f":false}}}"#);

    assert_eq!(config.get_str("a.b.s"), Some("v"));
    assert_eq!(config.get_u64("a.b.n"), Some(7));
    assert_eq!(config.get_bool("a.b.f"), Some(false));
    assert_eq!(config.get_path("a.b.missing"), None);
    assert_eq!(config.get_path("a.b.s.too_deep"), None);
    assert_eq!(config.get("a"), Some(&json!({"b":{"s":"v","n":7,"f":false}})));
    Ok(())
}

#[test]
fn empty_config_reports_empty() {
    init_tracing();
    assert!(Config::new().is_empty());
    assert!(!cfg(r#"{"k":1}"#).is_empty());
}
