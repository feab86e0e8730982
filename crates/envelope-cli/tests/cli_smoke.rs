use assert_cmd::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("envelope-cli"))
        .arg("--help")
        .assert()
        .success();
    Ok(())
}

#[test]
fn wraps_file_input_in_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{{\"id\": 1}}")?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("envelope-cli"))
        .arg(tmp.path())
        .arg("--meta")
        .arg("trace_id=abc")
        .output()?;
    assert!(output.status.success());
    let out: serde_json::Value = serde_json::from_str(&String::from_utf8(output.stdout)?)?;
    assert_eq!(
        out,
        serde_json::json!({
            "data": {"id": 1},
            "meta": {"trace_id": "abc"},
            "errors": null
        })
    );
    Ok(())
}

#[test]
fn meta_values_parse_as_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "[]")?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("envelope-cli"))
        .arg(tmp.path())
        .arg("--meta")
        .arg("count=3")
        .arg("--meta")
        .arg("cached=true")
        .output()?;
    assert!(output.status.success());
    let out: serde_json::Value = serde_json::from_str(&String::from_utf8(output.stdout)?)?;
    assert_eq!(out["meta"], serde_json::json!({"count": 3, "cached": true}));
    Ok(())
}

#[test]
fn error_envelope_with_fields_and_code() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("envelope-cli"))
        .arg("--error")
        .arg("Validation failed.")
        .arg("--field")
        .arg("email=Invalid email.")
        .arg("--field")
        .arg("email=Already taken.")
        .arg("--code")
        .arg("validation")
        .output()?;
    assert!(output.status.success());
    let out: serde_json::Value = serde_json::from_str(&String::from_utf8(output.stdout)?)?;
    assert_eq!(
        out,
        serde_json::json!({
            "data": null,
            "meta": {},
            "errors": {
                "message": "Validation failed.",
                "fields": {"email": ["Invalid email.", "Already taken."]},
                "code": "validation"
            }
        })
    );
    Ok(())
}

#[test]
fn invalid_json_input_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "not json")?;

    Command::new(assert_cmd::cargo::cargo_bin!("envelope-cli"))
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("not valid JSON"));
    Ok(())
}
