use std::path::Path;
use std::process::{Command, Output};

use form_store::config::{CONFIG_ENV, DEFAULT_PATH_ENV};
use tempfile::TempDir;

fn form_store(tmp: &Path, args: &[&str], envs: &[(&str, &Path)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_form-store"));
    cmd.args(args)
        .current_dir(tmp)
        .env_remove(CONFIG_ENV)
        .env_remove(DEFAULT_PATH_ENV)
        .env_remove("RUST_LOG");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("form-store should run")
}

/// 写一个只有一个启用目录的配置文件
fn write_config(tmp: &TempDir) -> std::path::PathBuf {
    let forms_dir = tmp.path().join("forms");
    let config = tmp.path().join("form-store.yaml");
    std::fs::write(
        &config,
        format!("forms:\n  savePaths:\n    {}: true\n", forms_dir.display()),
    )
    .unwrap();
    config
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_exists_exit_codes() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let form_file = tmp.path().join("contact-input.yaml");
    std::fs::write(&form_file, "identifier: contact\nlabel: Contact\n").unwrap();
    let config_arg = config.to_str().unwrap();

    let saved = form_store(
        tmp.path(),
        &["--config", config_arg, "save", "contact", "--file", form_file.to_str().unwrap()],
        &[],
    );
    assert!(saved.status.success(), "save 失败: {}", stderr(&saved));
    assert!(tmp.path().join("forms").join("contact.yaml").is_file());

    let found = form_store(tmp.path(), &["--config", config_arg, "exists", "contact"], &[]);
    assert_eq!(found.status.code(), Some(0));
    assert_eq!(stdout(&found).trim(), "true");

    let missing = form_store(tmp.path(), &["--config", config_arg, "exists", "nope"], &[]);
    assert_eq!(missing.status.code(), Some(1));
    assert_eq!(stdout(&missing).trim(), "false");
}

#[test]
fn test_error_prints_code_and_exits_2() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    let output = form_store(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "show", "missing"],
        &[],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("错误[E_NOT_FOUND]"));
}

#[test]
fn test_malformed_input_file_reports_its_path() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let bad = tmp.path().join("bad-input.yaml");
    std::fs::write(&bad, "label: no identifier\n").unwrap();

    let output = form_store(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "save", "x", "--file", bad.to_str().unwrap()],
        &[],
    );
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("错误[E_CODEC]"));
    assert!(err.contains("bad-input.yaml"));
}

#[test]
fn test_config_env_missing_file_uses_default_path() {
    let tmp = TempDir::new().unwrap();
    let absent = tmp.path().join("absent.yaml");
    let defaults = tmp.path().join("defaults");

    let output = form_store(
        tmp.path(),
        &["paths"],
        &[(CONFIG_ENV, absent.as_path()), (DEFAULT_PATH_ENV, defaults.as_path())],
    );
    assert!(output.status.success(), "paths 失败: {}", stderr(&output));
    assert!(defaults.is_dir());
    assert!(stdout(&output).contains(&defaults.display().to_string()));
}

#[test]
fn test_default_path_env_applies_with_explicit_config() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("only-default.yaml");
    std::fs::write(&config, "defaultSavePath: /unused/by/this/test\n").unwrap();
    let defaults = tmp.path().join("defaults");

    let output = form_store(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "paths"],
        &[(DEFAULT_PATH_ENV, defaults.as_path())],
    );
    assert!(output.status.success(), "paths 失败: {}", stderr(&output));
    assert!(defaults.is_dir());
}

#[test]
fn test_list_json_uses_camel_case_fields() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let forms_dir = tmp.path().join("forms");
    std::fs::create_dir_all(&forms_dir).unwrap();
    std::fs::write(forms_dir.join("form1.yaml"), "identifier: f1\nlabel: Form One\n").unwrap();

    let output = form_store(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "list", "--json"],
        &[],
    );
    assert!(output.status.success(), "list 失败: {}", stderr(&output));
    let forms: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        forms,
        serde_json::json!([
            {"identifier": "f1", "name": "Form One", "persistenceIdentifier": "form1"}
        ])
    );
}
