use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fontcache() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fontcache"));
    for var in ["FONTCACHE_ROOT", "FONTCACHE_SOURCE", "FONTCACHE_STORE", "FONTCACHE_TTL", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_fonts(root: &Path, content: &str) -> PathBuf {
    let path = root.join("data").join("google_fonts.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn parse_json(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("valid json output")
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn fonts_prints_catalogue() {
    let temp = tempdir().unwrap();
    write_fonts(temp.path(), r#"[{"family": "Roboto"}]"#);

    let assert = fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();

    assert_eq!(
        parse_json(&assert.get_output().stdout),
        json!([{"family": "Roboto"}])
    );
}

#[test]
fn fonts_served_from_file_cache_after_source_deleted() {
    let temp = tempdir().unwrap();
    let source = write_fonts(temp.path(), r#"[{"family": "Roboto"}]"#);

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();
    assert!(temp
        .path()
        .join(".fontcache/entries/google_fonts.json")
        .is_file());

    fs::remove_file(&source).unwrap();

    let assert = fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .arg("--stats")
        .assert()
        .success()
        .stderr(predicate::str::contains(r#""source_reads":0"#));

    assert_eq!(
        parse_json(&assert.get_output().stdout),
        json!([{"family": "Roboto"}])
    );
}

#[test]
fn fonts_memory_store_does_not_persist() {
    let temp = tempdir().unwrap();
    let source = write_fonts(temp.path(), r#"["Roboto"]"#);

    fontcache()
        .args(["--store", "memory", "--root"])
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();
    assert!(!temp.path().join(".fontcache").exists());

    fs::remove_file(&source).unwrap();
    fontcache()
        .args(["--store", "memory", "--root"])
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("source file not found"));
}

#[test]
fn fonts_missing_source_fails_and_leaves_cache_empty() {
    let temp = tempdir().unwrap();

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("google_fonts.json"));

    let assert = fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "list"])
        .assert()
        .success();
    assert_eq!(parse_json(&assert.get_output().stdout), json!([]));
}

#[test]
fn fonts_malformed_source_fails() {
    let temp = tempdir().unwrap();
    write_fonts(temp.path(), "[");

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn fonts_source_override_via_env() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("custom.json"), r#"["Inter"]"#).unwrap();

    let assert = fontcache()
        .env("FONTCACHE_SOURCE", "custom.json")
        .env("FONTCACHE_STORE", "memory")
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();

    assert_eq!(parse_json(&assert.get_output().stdout), json!(["Inter"]));
}

#[test]
fn fonts_zero_ttl_rereads_source() {
    let temp = tempdir().unwrap();
    let source = write_fonts(temp.path(), r#"["Roboto"]"#);

    fontcache()
        .args(["--ttl", "0", "--root"])
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();

    fs::write(&source, r#"["Lato"]"#).unwrap();
    let assert = fontcache()
        .args(["--ttl", "0", "--root"])
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();

    assert_eq!(parse_json(&assert.get_output().stdout), json!(["Lato"]));
}

#[test]
fn fonts_jsonl_prints_one_font_per_line() {
    let assert = fontcache()
        .args(["--store", "memory", "--format", "jsonl", "--root"])
        .arg(fixtures_dir().join("sample_app"))
        .arg("fonts")
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    let families: Vec<_> = items
        .iter()
        .map(|v| v["family"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(families, vec!["Roboto", "Lora", "Fira Code"]);
}

#[test]
fn fixture_catalogue_passes_through_verbatim() {
    let root = fixtures_dir().join("sample_app");
    let expected: Value =
        serde_json::from_str(&fs::read_to_string(root.join("data/google_fonts.json")).unwrap())
            .unwrap();

    let assert = fontcache()
        .args(["--store", "memory", "--root"])
        .arg(&root)
        .arg("fonts")
        .assert()
        .success();

    assert_eq!(parse_json(&assert.get_output().stdout), expected);
}

#[test]
fn call_dispatches_registered_method() {
    let temp = tempdir().unwrap();
    write_fonts(temp.path(), r#"["Roboto"]"#);

    let assert = fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["call", "get_google_fonts"])
        .assert()
        .success();

    assert_eq!(parse_json(&assert.get_output().stdout), json!(["Roboto"]));
}

#[test]
fn call_unknown_method_fails() {
    let temp = tempdir().unwrap();

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["call", "get_everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown method 'get_everything'"));
}

#[test]
fn routes_lists_google_fonts() {
    let temp = tempdir().unwrap();

    let assert = fontcache()
        .args(["--store", "memory", "--root"])
        .arg(temp.path())
        .arg("routes")
        .assert()
        .success();

    let routes = parse_json(&assert.get_output().stdout);
    assert_eq!(routes[0]["method"], "get_google_fonts");
    assert!(routes[0]["description"].is_string());
}

#[test]
fn cache_get_list_and_clear() {
    let temp = tempdir().unwrap();
    write_fonts(temp.path(), r#"["Roboto"]"#);

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();

    let listed = fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "list"])
        .assert()
        .success();
    assert_eq!(
        parse_json(&listed.get_output().stdout),
        json!(["google_fonts"])
    );

    let got = fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "get", "google_fonts"])
        .assert()
        .success();
    assert_eq!(parse_json(&got.get_output().stdout), json!(["Roboto"]));

    let cleared = fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "clear"])
        .assert()
        .success();
    assert_eq!(
        parse_json(&cleared.get_output().stdout),
        json!({"cleared": ["google_fonts"]})
    );

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "get", "google_fonts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No cached value"));
}

#[test]
fn cache_clear_single_key_reloads_source() {
    let temp = tempdir().unwrap();
    let source = write_fonts(temp.path(), r#"["Roboto"]"#);

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();

    fs::write(&source, r#"["Lato"]"#).unwrap();
    fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "clear", "--key", "google_fonts"])
        .assert()
        .success();

    let assert = fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();
    assert_eq!(parse_json(&assert.get_output().stdout), json!(["Lato"]));
}

#[test]
fn cache_clear_recovers_from_corrupt_record() {
    let temp = tempdir().unwrap();
    write_fonts(temp.path(), r#"["Roboto"]"#);

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("fonts")
        .assert()
        .success();

    let record = temp.path().join(".fontcache/entries/google_fonts.json");
    fs::write(&record, "{not json").unwrap();

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "clear"])
        .assert()
        .success();
    assert!(!record.exists());

    let listed = fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "list"])
        .assert()
        .success();
    assert_eq!(parse_json(&listed.get_output().stdout), json!([]));
}

#[test]
fn routes_does_not_create_cache_dir() {
    let temp = tempdir().unwrap();

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("get_google_fonts"));

    assert!(!temp.path().join(".fontcache").exists());
}

#[test]
fn cache_get_rejects_path_like_key() {
    let temp = tempdir().unwrap();

    fontcache()
        .arg("--root")
        .arg(temp.path())
        .args(["cache", "get", "../secrets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid cache key"));
}

#[test]
fn unknown_format_fails() {
    let temp = tempdir().unwrap();

    fontcache()
        .args(["--format", "yaml", "--root"])
        .arg(temp.path())
        .arg("routes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));
}
