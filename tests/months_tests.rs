// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;
use httpmock::prelude::*;
use serde_json::json;

use ynabctl::client::Client;
use ynabctl::commands::{Context, categories, months};
use ynabctl::render::{OutputFormat, Renderable};
use ynabctl::{cli, utils};

fn context(server: &MockServer) -> Context {
    let client = Client::with_base_url("t", server.base_url()).unwrap();
    Context::new(client, Some("b1".into()), OutputFormat::Json)
}

fn this_month() -> String {
    let today = utils::today();
    format!("{:04}-{:02}-01", today.year(), today.month())
}

#[test]
fn current_month_uses_first_day() {
    let server = MockServer::start();
    let month = this_month();
    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/budgets/b1/months/{}", month));
        then.status(200).json_body(json!({
            "data": {"month": {
                "month": month,
                "income": 500000,
                "budgeted": 400000,
                "activity": -120000,
                "to_be_budgeted": 100000,
                "age_of_money": 42
            }}
        }));
    });

    let matches = cli::build_cli().get_matches_from(["ynabctl", "months", "get"]);
    if let Some(("months", m)) = matches.subcommand() {
        let out = months::handle(&context(&server), m).unwrap();
        mock.assert();
        match out {
            Renderable::Month(detail) => assert_eq!(detail.age_of_money, Some(42)),
            other => panic!("unexpected {other:?}"),
        }
    } else {
        panic!("no months subcommand");
    }
}

#[test]
fn explicit_month_is_normalized() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/budgets/b1/months/2024-03-01");
        then.status(200).json_body(json!({
            "data": {"month": {"month": "2024-03-01"}}
        }));
    });

    let matches = cli::build_cli().get_matches_from(["ynabctl", "months", "get", "2024-03-17"]);
    let (_, m) = matches.subcommand().unwrap();
    months::handle(&context(&server), m).unwrap();
    mock.assert();
}

#[test]
fn category_update_defaults_to_current_month() {
    let server = MockServer::start();
    let path = format!("/budgets/b1/months/{}/categories/c1", this_month());
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path(path)
            .json_body(json!({"category": {"budgeted": 600000}}));
        then.status(200).json_body(json!({
            "data": {"category": {"id": "c1", "name": "Groceries", "budgeted": 600000}}
        }));
    });

    let matches = cli::build_cli().get_matches_from([
        "ynabctl",
        "categories",
        "update",
        "c1",
        "--budgeted",
        "600",
    ]);
    let (_, m) = matches.subcommand().unwrap();
    categories::handle(&context(&server), m).unwrap();
    mock.assert();
}

#[test]
fn bad_month_is_rejected_without_request() {
    let server = MockServer::start();
    let any = server.mock(|_when, then| {
        then.status(200);
    });

    let matches = cli::build_cli().get_matches_from(["ynabctl", "months", "get", "someday"]);
    let (_, m) = matches.subcommand().unwrap();
    assert!(months::handle(&context(&server), m).is_err());
    any.assert_calls(0);
}
