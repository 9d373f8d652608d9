// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the YNAB REST API.
//!
//! Every successful response is wrapped as `{"data": {"<resource>": ...}}`;
//! each operation unwraps exactly that one level. Failures surface as a
//! single [`ClientError`] and are never retried.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    Account, Budget, BudgetSettings, Category, CategoryGroup, Month, Payee, SaveAccount,
    SaveMonthCategory, SavePayee, SaveScheduledTransaction, SaveTransaction,
    ScheduledTransaction, Transaction, TransactionType, User,
};
use crate::utils::{fmt_date, http_client};

pub const BASE_URL: &str = "https://api.ynab.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Structured error reported by the API.
    #[error("{name}: {detail}")]
    Api {
        status: u16,
        id: String,
        name: String,
        detail: String,
    },

    /// Error status whose body is not the API's error shape.
    #[error("API error: {body} (status {status})")]
    Http { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to parse response: missing `data.{0}`")]
    MissingKey(&'static str),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

impl ClientError {
    /// True when the server answered successfully but the body did not match
    /// the expected envelope.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::MissingKey(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    fn from_error_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                error: Some(detail),
            }) => Self::Api {
                status,
                id: detail.id,
                name: detail.name,
                detail: detail.detail,
            },
            _ => Self::Http {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    detail: String,
}

#[derive(serde::Deserialize)]
struct Envelope {
    data: Option<Map<String, Value>>,
}

/// Unwrap `{"data": {key: T}}`.
pub fn decode_envelope<T: DeserializeOwned>(
    body: &[u8],
    key: &'static str,
) -> Result<T, ClientError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    let value = envelope
        .data
        .and_then(|mut data| data.remove(key))
        .ok_or(ClientError::MissingKey(key))?;
    Ok(serde_json::from_value(value)?)
}

fn wrap<T: Serialize>(key: &str, payload: &T) -> Result<Value, ClientError> {
    let inner = serde_json::to_value(payload).map_err(ClientError::Encode)?;
    let mut outer = Map::new();
    outer.insert(key.to_string(), inner);
    Ok(Value::Object(outer))
}

/// Base URL joined with percent-encoded path segments and query pairs.
pub fn endpoint(
    base: &Url,
    segments: &[&str],
    params: &[(&str, String)],
) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::BaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

/// Which transaction listing endpoint to hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransactionScope {
    #[default]
    All,
    Account(String),
    Category(String),
    Payee(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub scope: TransactionScope,
    pub since_date: Option<NaiveDate>,
    /// Only honored by the unscoped endpoint.
    pub kind: Option<TransactionType>,
}

impl TransactionQuery {
    pub fn url(&self, base: &Url, budget_id: &str) -> Result<Url, ClientError> {
        let segments = match &self.scope {
            TransactionScope::All => vec!["budgets", budget_id, "transactions"],
            TransactionScope::Account(id) => {
                vec!["budgets", budget_id, "accounts", id.as_str(), "transactions"]
            }
            TransactionScope::Category(id) => {
                vec!["budgets", budget_id, "categories", id.as_str(), "transactions"]
            }
            TransactionScope::Payee(id) => vec!["budgets", budget_id, "payees", id.as_str(), "transactions"],
        };
        let mut params = Vec::new();
        if let Some(since) = self.since_date {
            params.push(("since_date", fmt_date(since)));
        }
        if let (TransactionScope::All, Some(kind)) = (&self.scope, self.kind) {
            params.push(("type", kind.as_str().to_string()));
        }
        endpoint(base, &segments, &params)
    }
}

/// Authenticated API client. Holds no mutable state; reuse freely.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    token: String,
    base: Url,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_base_url(token, BASE_URL)
    }

    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl AsRef<str>,
    ) -> Result<Self, ClientError> {
        let raw = base_url.as_ref();
        let base = Url::parse(raw).map_err(|e| ClientError::BaseUrl(format!("{raw} ({e})")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::BaseUrl(raw.to_string()));
        }
        Ok(Self {
            http: http_client(DEFAULT_TIMEOUT)?,
            token: token.into(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        endpoint(&self.base, segments, &[])
    }

    /// Issue one request and return the raw success body.
    pub fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Vec<u8>, ClientError> {
        debug!(%method, path = url.path(), "sending request");

        let mut req = self.http.request(method, url).bearer_auth(&self.token);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes()?;
        debug!(status, len = bytes.len(), "received response");

        if status >= 400 {
            return Err(ClientError::from_error_body(status, &bytes));
        }
        Ok(bytes.to_vec())
    }

    fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        key: &'static str,
    ) -> Result<T, ClientError> {
        let body = self.request(Method::GET, self.url(segments)?, None)?;
        decode_envelope(&body, key)
    }

    fn send<T: DeserializeOwned, P: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        key: &'static str,
        payload: &P,
    ) -> Result<T, ClientError> {
        let wrapped = wrap(key, payload)?;
        let body = self.request(method, self.url(segments)?, Some(&wrapped))?;
        decode_envelope(&body, key)
    }

    fn delete<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        key: &'static str,
    ) -> Result<T, ClientError> {
        let body = self.request(Method::DELETE, self.url(segments)?, None)?;
        decode_envelope(&body, key)
    }

    pub fn get_user(&self) -> Result<User, ClientError> {
        self.get(&["user"], "user")
    }

    pub fn list_budgets(&self) -> Result<Vec<Budget>, ClientError> {
        self.get(&["budgets"], "budgets")
    }

    pub fn get_budget(&self, budget_id: &str) -> Result<Budget, ClientError> {
        self.get(&["budgets", budget_id], "budget")
    }

    pub fn get_budget_settings(&self, budget_id: &str) -> Result<BudgetSettings, ClientError> {
        self.get(&["budgets", budget_id, "settings"], "settings")
    }

    pub fn list_accounts(&self, budget_id: &str) -> Result<Vec<Account>, ClientError> {
        self.get(&["budgets", budget_id, "accounts"], "accounts")
    }

    pub fn get_account(&self, budget_id: &str, account_id: &str) -> Result<Account, ClientError> {
        self.get(&["budgets", budget_id, "accounts", account_id], "account")
    }

    /// `account.balance` must already be in milliunits.
    pub fn create_account(
        &self,
        budget_id: &str,
        account: &SaveAccount,
    ) -> Result<Account, ClientError> {
        self.send(
            Method::POST,
            &["budgets", budget_id, "accounts"],
            "account",
            account,
        )
    }

    pub fn list_categories(&self, budget_id: &str) -> Result<Vec<CategoryGroup>, ClientError> {
        self.get(&["budgets", budget_id, "categories"], "category_groups")
    }

    pub fn get_category(
        &self,
        budget_id: &str,
        category_id: &str,
    ) -> Result<Category, ClientError> {
        self.get(&["budgets", budget_id, "categories", category_id], "category")
    }

    /// Set the budgeted milliunits of one category for one month.
    pub fn update_category_budgeted(
        &self,
        budget_id: &str,
        month: NaiveDate,
        category_id: &str,
        budgeted: i64,
    ) -> Result<Category, ClientError> {
        let month = fmt_date(month);
        self.send(
            Method::PATCH,
            &["budgets", budget_id, "months", &month, "categories", category_id],
            "category",
            &SaveMonthCategory { budgeted },
        )
    }

    pub fn list_payees(&self, budget_id: &str) -> Result<Vec<Payee>, ClientError> {
        self.get(&["budgets", budget_id, "payees"], "payees")
    }

    pub fn get_payee(&self, budget_id: &str, payee_id: &str) -> Result<Payee, ClientError> {
        self.get(&["budgets", budget_id, "payees", payee_id], "payee")
    }

    pub fn rename_payee(
        &self,
        budget_id: &str,
        payee_id: &str,
        name: &str,
    ) -> Result<Payee, ClientError> {
        self.send(
            Method::PATCH,
            &["budgets", budget_id, "payees", payee_id],
            "payee",
            &SavePayee {
                name: name.to_string(),
            },
        )
    }

    pub fn list_transactions(
        &self,
        budget_id: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, ClientError> {
        let body = self.request(Method::GET, query.url(&self.base, budget_id)?, None)?;
        decode_envelope(&body, "transactions")
    }

    pub fn get_transaction(
        &self,
        budget_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction, ClientError> {
        self.get(
            &["budgets", budget_id, "transactions", transaction_id],
            "transaction",
        )
    }

    pub fn create_transaction(
        &self,
        budget_id: &str,
        transaction: &SaveTransaction,
    ) -> Result<Transaction, ClientError> {
        self.send(
            Method::POST,
            &["budgets", budget_id, "transactions"],
            "transaction",
            transaction,
        )
    }

    /// Full replace of the mutable fields.
    pub fn update_transaction(
        &self,
        budget_id: &str,
        transaction_id: &str,
        transaction: &SaveTransaction,
    ) -> Result<Transaction, ClientError> {
        self.send(
            Method::PUT,
            &["budgets", budget_id, "transactions", transaction_id],
            "transaction",
            transaction,
        )
    }

    pub fn delete_transaction(
        &self,
        budget_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction, ClientError> {
        self.delete(
            &["budgets", budget_id, "transactions", transaction_id],
            "transaction",
        )
    }

    pub fn list_scheduled_transactions(
        &self,
        budget_id: &str,
    ) -> Result<Vec<ScheduledTransaction>, ClientError> {
        self.get(
            &["budgets", budget_id, "scheduled_transactions"],
            "scheduled_transactions",
        )
    }

    pub fn get_scheduled_transaction(
        &self,
        budget_id: &str,
        scheduled_id: &str,
    ) -> Result<ScheduledTransaction, ClientError> {
        self.get(
            &["budgets", budget_id, "scheduled_transactions", scheduled_id],
            "scheduled_transaction",
        )
    }

    pub fn create_scheduled_transaction(
        &self,
        budget_id: &str,
        scheduled: &SaveScheduledTransaction,
    ) -> Result<ScheduledTransaction, ClientError> {
        self.send(
            Method::POST,
            &["budgets", budget_id, "scheduled_transactions"],
            "scheduled_transaction",
            scheduled,
        )
    }

    pub fn update_scheduled_transaction(
        &self,
        budget_id: &str,
        scheduled_id: &str,
        scheduled: &SaveScheduledTransaction,
    ) -> Result<ScheduledTransaction, ClientError> {
        self.send(
            Method::PUT,
            &["budgets", budget_id, "scheduled_transactions", scheduled_id],
            "scheduled_transaction",
            scheduled,
        )
    }

    pub fn delete_scheduled_transaction(
        &self,
        budget_id: &str,
        scheduled_id: &str,
    ) -> Result<ScheduledTransaction, ClientError> {
        self.delete(
            &["budgets", budget_id, "scheduled_transactions", scheduled_id],
            "scheduled_transaction",
        )
    }

    pub fn list_months(&self, budget_id: &str) -> Result<Vec<Month>, ClientError> {
        self.get(&["budgets", budget_id, "months"], "months")
    }

    /// `month` must be the first day of a month; see [`crate::utils::resolve_month`].
    pub fn get_month(&self, budget_id: &str, month: NaiveDate) -> Result<Month, ClientError> {
        let month = fmt_date(month);
        self.get(&["budgets", budget_id, "months", &month], "month")
    }
}

/// Major units to milliunits, truncating toward zero.
///
/// Float error near the third decimal is not corrected: `1.005 * 1000.0`
/// evaluates to `1004.999...` and truncates to `1004`.
pub fn amount_to_milliunits(amount: f64) -> i64 {
    (amount * 1000.0) as i64
}

pub fn milliunits_to_amount(milliunits: i64) -> f64 {
    milliunits as f64 / 1000.0
}
