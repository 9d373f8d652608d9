// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;

use ynabctl::cli;
use ynabctl::commands::{self, Context};
use ynabctl::config::{ConfigError, ConfigUpdate, Settings};
use ynabctl::render::OutputFormat;

fn run_config(dir: &std::path::Path, args: &[&str]) -> anyhow::Result<String> {
    let mut full = vec!["ynabctl", "config"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    let (_, config_m) = matches.subcommand().unwrap();
    let (name, sub) = config_m.subcommand().unwrap();
    let mut out = Vec::new();
    commands::config::set(&dir.join("config.toml"), name, sub, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn set_commands_merge_into_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("nested");

    let msg = run_config(&dir, &["set-token", "secret-token-123"]).unwrap();
    assert_eq!(msg.trim(), "Token saved successfully.");
    run_config(&dir, &["set-default-budget", "b42"]).unwrap();
    let msg = run_config(&dir, &["set-format", "table"]).unwrap();
    assert_eq!(msg.trim(), "Default format set to: table");

    let settings = Settings::read_file(&dir.join("config.toml")).unwrap();
    assert_eq!(settings.token(), Some("secret-token-123"));
    assert_eq!(settings.default_budget(), Some("b42"));
    assert_eq!(settings.output_format().unwrap(), Some(OutputFormat::Table));
}

#[test]
fn invalid_format_is_not_written() {
    let tmp = tempfile::tempdir().unwrap();
    let err = run_config(tmp.path(), &["set-format", "yaml"]).unwrap_err();
    assert!(err.to_string().contains("invalid format: yaml"));
    assert!(!tmp.path().join("config.toml").exists());
}

#[test]
fn malformed_file_is_reported_with_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "token = [unterminated").unwrap();
    let err = Settings::read_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Malformed { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn persist_keeps_unrelated_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "token = \"abc\"\nformat = \"json\"\n").unwrap();
    let saved = Settings::persist_to(
        &path,
        ConfigUpdate {
            default_budget: Some("b1".into()),
            ..ConfigUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(saved.token(), Some("abc"));
    assert_eq!(saved.format.as_deref(), Some("json"));
    assert_eq!(saved.default_budget(), Some("b1"));
}

#[test]
fn show_masks_token() {
    let settings = Settings {
        token: Some("abcdefghijklmnop".into()),
        default_budget: None,
        format: Some("table".into()),
    };
    let mut out = Vec::new();
    commands::config::show(&settings, std::path::Path::new("/x/config.toml"), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Config file: /x/config.toml"));
    assert!(text.contains("Token:          abcd...mnop"));
    assert!(text.contains("Default Budget: (not set)"));
    assert!(text.contains("Format:         table"));
}

#[test]
fn context_requires_token() {
    let err = Context::from_settings(&Settings::default(), Some("b1".into()), None).unwrap_err();
    assert!(err.to_string().contains("ynabctl config set-token"));
}

#[test]
fn context_flags_override_settings() {
    let settings = Settings {
        token: Some("t".into()),
        default_budget: Some("from-file".into()),
        format: Some("table".into()),
    };
    let ctx = Context::from_settings(&settings, None, Some(OutputFormat::Json)).unwrap();
    assert_eq!(ctx.budget_id().unwrap(), "from-file");
    assert_eq!(ctx.format, OutputFormat::Json);

    let ctx = Context::from_settings(&settings, Some("from-flag".into()), None).unwrap();
    assert_eq!(ctx.budget_id().unwrap(), "from-flag");
    assert_eq!(ctx.format, OutputFormat::Table);
}
