// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use httpmock::prelude::*;
use serde_json::json;

use ynabctl::client::Client;
use ynabctl::commands::{Context, transactions};
use ynabctl::render::{OutputFormat, Renderable};
use ynabctl::{cli, commands};

fn context(server: &MockServer) -> Context {
    let client = Client::with_base_url("t", server.base_url()).unwrap();
    Context::new(client, Some("b1".into()), OutputFormat::Json)
}

fn existing() -> serde_json::Value {
    json!({
        "id": "t1",
        "date": "2024-05-01",
        "amount": -1000,
        "memo": "old",
        "cleared": "cleared",
        "approved": true,
        "account_id": "a1",
        "account_name": "Checking",
        "payee_id": "p1",
        "payee_name": "Grocer",
        "category_id": "c1",
        "category_name": "Food"
    })
}

#[test]
fn update_sends_merged_transaction() {
    let server = MockServer::start();
    let get = server.mock(|when, then| {
        when.method(GET).path("/budgets/b1/transactions/t1");
        then.status(200)
            .json_body(json!({"data": {"transaction": existing()}}));
    });
    let mut updated = existing();
    updated["amount"] = json!(-2000);
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/budgets/b1/transactions/t1")
            .json_body(json!({
                "transaction": {
                    "account_id": "a1",
                    "date": "2024-05-01",
                    "amount": -2000,
                    "payee_id": "p1",
                    "category_id": "c1",
                    "memo": "old",
                    "cleared": "cleared",
                    "approved": true
                }
            }));
        then.status(200)
            .json_body(json!({"data": {"transaction": updated}}));
    });

    let matches = cli::build_cli().get_matches_from([
        "ynabctl",
        "transactions",
        "update",
        "t1",
        "--amount",
        "-2",
    ]);
    if let Some(("transactions", tx_m)) = matches.subcommand() {
        let out = transactions::handle(&context(&server), tx_m).unwrap();
        get.assert();
        put.assert();
        match out {
            Renderable::Transaction(tx) => assert_eq!(tx.amount, -2000),
            other => panic!("unexpected {other:?}"),
        }
    } else {
        panic!("no transactions subcommand");
    }
}

#[test]
fn create_posts_converted_amount() {
    let server = MockServer::start();
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/budgets/b1/transactions")
            .json_body(json!({
                "transaction": {
                    "account_id": "a1",
                    "date": "2024-01-15",
                    "amount": -42500,
                    "payee_name": "Cafe",
                    "memo": "coffee",
                    "approved": true
                }
            }));
        then.status(201)
            .json_body(json!({"data": {"transaction": existing()}}));
    });

    let matches = cli::build_cli().get_matches_from([
        "ynabctl",
        "transactions",
        "create",
        "--account",
        "a1",
        "--amount",
        "-42.50",
        "--date",
        "2024-01-15",
        "--payee-name",
        "Cafe",
        "--memo",
        "coffee",
        "--approved",
    ]);
    let (name, sub) = matches.subcommand().unwrap();
    commands::dispatch(&context(&server), name, sub).unwrap();
    post.assert();
}

#[test]
fn table_output_truncates_memo() {
    let server = MockServer::start();
    let mut tx = existing();
    tx["memo"] = json!("a very long memo that keeps going and going");
    server.mock(|when, then| {
        when.method(GET).path("/budgets/b1/transactions");
        then.status(200)
            .json_body(json!({"data": {"transactions": [tx]}}));
    });

    let client = Client::with_base_url("t", server.base_url()).unwrap();
    let ctx = Context::new(client, Some("b1".into()), OutputFormat::Table);
    let matches = cli::build_cli().get_matches_from(["ynabctl", "transactions", "list"]);
    let (name, sub) = matches.subcommand().unwrap();
    let value = commands::dispatch(&ctx, name, sub).unwrap();

    let mut out = Vec::new();
    ctx.emit(&value, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("a very long memo that keeps..."));
    assert!(text.contains("-1.00"));
    assert!(!text.contains("going and going"));
}

#[test]
fn missing_budget_fails_before_request() {
    let server = MockServer::start();
    let any = server.mock(|_when, then| {
        then.status(200);
    });
    let client = Client::with_base_url("t", server.base_url()).unwrap();
    let ctx = Context::new(client, None, OutputFormat::Json);

    let matches = cli::build_cli().get_matches_from(["ynabctl", "transactions", "list"]);
    let (name, sub) = matches.subcommand().unwrap();
    let err = commands::dispatch(&ctx, name, sub).unwrap_err();
    assert!(err.to_string().contains("set-default-budget"));
    any.assert_calls(0);
}
