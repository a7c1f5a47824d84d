use assert_cmd::Command;
use predicates::str::contains;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("sdscheck").unwrap()
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn extracted_fixture() -> Value {
    json!({
        "document": {
            "product_name": {"value": "Acetone", "evidence": "Product: Acetone", "confidence": 0.97},
            "revision_date": {"value": "31-12-2023", "confidence": 0.8}
        },
        "composition": {
            "ingredients": [
                {
                    "name": {"value": "Acetone"},
                    "cas": {"value": "67\u{2013}64\u{2013}1", "confidence": 0.95},
                    "concentration": {"value": "90-100%"}
                },
                {
                    "name": {"value": "Mystery"},
                    "cas": {"value": "12345678-00-1"}
                }
            ]
        }
    })
}

#[test]
fn check_attaches_warnings_and_exits_zero() {
    let tmp = TempDir::new().unwrap();
    let input = write_json(tmp.path(), "acetone.json", &extracted_fixture());

    let out = cmd()
        .arg("check")
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&out).unwrap();

    // En-dash CAS normalized in place.
    assert_eq!(
        doc["composition"]["ingredients"][0]["cas"]["value"],
        json!("67-64-1")
    );

    let warnings = doc["meta"]["validation_warnings"].as_array().unwrap();
    let rules: Vec<&str> = warnings
        .iter()
        .map(|w| w["rule"].as_str().unwrap())
        .collect();
    assert_eq!(rules, vec!["cas_format", "date_format"]);
    assert_eq!(
        warnings[0]["field"],
        json!("composition.ingredients[1].cas.value")
    );
}

#[test]
fn check_no_normalize_leaves_cas_untouched() {
    let tmp = TempDir::new().unwrap();
    let input = write_json(tmp.path(), "acetone.json", &extracted_fixture());

    let out = cmd()
        .args(["check", "--no-normalize"])
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        doc["composition"]["ingredients"][0]["cas"]["value"],
        json!("67\u{2013}64\u{2013}1")
    );
}

#[test]
fn check_writes_annotated_copy_into_out_dir() {
    let tmp = TempDir::new().unwrap();
    let input = write_json(tmp.path(), "acetone.json", &extracted_fixture());
    let out_dir = tmp.path().join("annotated");

    cmd()
        .arg("check")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let written = fs::read_to_string(out_dir.join("acetone.json")).unwrap();
    let doc: Value = serde_json::from_str(&written).unwrap();
    assert!(doc["meta"]["validation_warnings"].is_array());
}

#[test]
fn check_schema_check_flags_malformed_fields() {
    let tmp = TempDir::new().unwrap();
    let input = write_json(
        tmp.path(),
        "weird.json",
        &json!({
            "composition": {"ingredients": [{"cas": {"value": {"nested": "object"}}}]}
        }),
    );

    cmd()
        .args(["check", "--schema-check"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("schema_shape"));
}

#[test]
fn check_rejects_unreadable_input() {
    cmd()
        .args(["check", "/no/such/file.json"])
        .assert()
        .failure()
        .stderr(contains("checking"));
}

#[test]
fn eval_identical_documents_is_fully_accurate() {
    let tmp = TempDir::new().unwrap();
    let doc = extracted_fixture();
    let extracted = write_json(tmp.path(), "extracted.json", &doc);
    let truth = write_json(tmp.path(), "truth.json", &doc);

    cmd()
        .arg("eval")
        .args(["--extracted", extracted.to_str().unwrap()])
        .args(["--truth", truth.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Accuracy:        100.00%"))
        .stdout(contains("Missing:         none"));
}

#[test]
fn eval_json_report_lists_missing_paths() {
    let tmp = TempDir::new().unwrap();
    let extracted = write_json(
        tmp.path(),
        "extracted.json",
        &json!({"document": {"product_name": {"value": "Acetone"}}}),
    );
    let truth = write_json(
        tmp.path(),
        "truth.json",
        &json!({"document": {"product_name": {"value": "Benzene"}}}),
    );

    let out = cmd()
        .arg("eval")
        .args(["--extracted", extracted.to_str().unwrap()])
        .args(["--truth", truth.to_str().unwrap()])
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["fields_compared"], json!(1));
    assert_eq!(report["correct"], json!(0));
    assert_eq!(report["accuracy"], json!(0.0));
    assert_eq!(report["missing"], json!(["document.product_name.value"]));
    assert_eq!(report["hallucinated"], json!([]));
}

#[test]
fn eval_accepts_yaml_ground_truth() {
    let tmp = TempDir::new().unwrap();
    let extracted = write_json(
        tmp.path(),
        "extracted.json",
        &json!({"document": {"product_name": {"value": "ACETONE"}}}),
    );
    let truth = tmp.path().join("truth.yaml");
    fs::write(&truth, "document:\n  product_name:\n    value: acetone\n").unwrap();

    cmd()
        .arg("eval")
        .args(["--extracted", extracted.to_str().unwrap()])
        .args(["--truth", truth.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Accuracy:        100.00%"));
}

#[test]
fn check_processes_a_batch_independently() {
    let tmp = TempDir::new().unwrap();
    let clean = write_json(
        tmp.path(),
        "clean.json",
        &json!({
            "document": {"revision_date": {"value": "12-31-2023"}},
            "composition": {"ingredients": [{"cas": {"value": "7732-18-5"}}]}
        }),
    );
    let dirty = write_json(
        tmp.path(),
        "dirty.json",
        &json!({
            "composition": {"ingredients": [{"cas": {"value": "50-00"}}]}
        }),
    );

    let out = cmd()
        .arg("check")
        .arg(&clean)
        .arg(&dirty)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(out).unwrap();
    // The clean document picks up no warning list; the dirty one does.
    assert_eq!(text.matches("validation_warnings").count(), 1);
    assert!(text.contains("cas_format"));
}
