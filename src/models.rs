// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wire types for the YNAB API. Monetary fields are milliunits (1000 = 1.00).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub last_modified_on: Option<String>,
    pub first_month: Option<NaiveDate>,
    pub last_month: Option<NaiveDate>,
    pub date_format: Option<DateFormat>,
    pub currency_format: Option<CurrencyFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormat {
    #[serde(default)]
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub iso_code: String,
    pub example_format: String,
    pub decimal_digits: u32,
    pub decimal_separator: String,
    pub symbol_first: bool,
    pub group_separator: String,
    pub currency_symbol: String,
    pub display_symbol: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSettings {
    #[serde(default)]
    pub date_format: DateFormat,
    #[serde(default)]
    pub currency_format: CurrencyFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// checking, savings, creditCard, ... passed through as the API reports it.
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub on_budget: bool,
    #[serde(default)]
    pub closed: bool,
    pub note: Option<String>,
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub cleared_balance: i64,
    #[serde(default)]
    pub uncleared_balance: i64,
    pub transfer_payee_id: Option<String>,
    #[serde(default)]
    pub direct_import_linked: bool,
    #[serde(default)]
    pub direct_import_in_error: bool,
    pub last_reconciled_at: Option<String>,
    pub debt_original_balance: Option<i64>,
    pub debt_interest_rates: Option<BTreeMap<String, i64>>,
    pub debt_minimum_payments: Option<BTreeMap<String, i64>>,
    pub debt_escrow_amounts: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl CategoryGroup {
    pub fn is_visible(&self) -> bool {
        !self.hidden && !self.deleted
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub category_group_id: String,
    pub category_group_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    pub original_category_group_id: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub budgeted: i64,
    #[serde(default)]
    pub activity: i64,
    #[serde(default)]
    pub balance: i64,
    pub goal_type: Option<String>,
    pub goal_day: Option<i32>,
    pub goal_cadence: Option<i32>,
    pub goal_cadence_frequency: Option<i32>,
    pub goal_creation_month: Option<NaiveDate>,
    pub goal_target: Option<i64>,
    pub goal_target_month: Option<NaiveDate>,
    pub goal_percentage_complete: Option<i32>,
    pub goal_months_to_budget: Option<i32>,
    pub goal_under_funded: Option<i64>,
    pub goal_overall_funded: Option<i64>,
    pub goal_overall_left: Option<i64>,
    #[serde(default)]
    pub deleted: bool,
}

impl Category {
    pub fn is_visible(&self) -> bool {
        !self.hidden && !self.deleted
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    pub id: String,
    pub name: String,
    /// Set when the payee is the transfer endpoint of another account.
    pub transfer_account_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    Cleared,
    #[default]
    Uncleared,
    Reconciled,
}

impl ClearedStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cleared => "cleared",
            Self::Uncleared => "uncleared",
            Self::Reconciled => "reconciled",
        }
    }
}

/// Recurrence of a scheduled transaction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Frequency {
    #[default]
    #[serde(rename = "never")]
    #[value(name = "never")]
    Never,
    #[serde(rename = "daily")]
    #[value(name = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    #[value(name = "weekly")]
    Weekly,
    #[serde(rename = "everyOtherWeek")]
    #[value(name = "everyOtherWeek")]
    EveryOtherWeek,
    #[serde(rename = "twiceAMonth")]
    #[value(name = "twiceAMonth")]
    TwiceAMonth,
    #[serde(rename = "every4Weeks")]
    #[value(name = "every4Weeks")]
    Every4Weeks,
    #[serde(rename = "monthly")]
    #[value(name = "monthly")]
    Monthly,
    #[serde(rename = "everyOtherMonth")]
    #[value(name = "everyOtherMonth")]
    EveryOtherMonth,
    #[serde(rename = "every3Months")]
    #[value(name = "every3Months")]
    Every3Months,
    #[serde(rename = "every4Months")]
    #[value(name = "every4Months")]
    Every4Months,
    #[serde(rename = "twiceAYear")]
    #[value(name = "twiceAYear")]
    TwiceAYear,
    #[serde(rename = "yearly")]
    #[value(name = "yearly")]
    Yearly,
    #[serde(rename = "everyOtherYear")]
    #[value(name = "everyOtherYear")]
    EveryOtherYear,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::EveryOtherWeek => "everyOtherWeek",
            Self::TwiceAMonth => "twiceAMonth",
            Self::Every4Weeks => "every4Weeks",
            Self::Monthly => "monthly",
            Self::EveryOtherMonth => "everyOtherMonth",
            Self::Every3Months => "every3Months",
            Self::Every4Months => "every4Months",
            Self::TwiceAYear => "twiceAYear",
            Self::Yearly => "yearly",
            Self::EveryOtherYear => "everyOtherYear",
        }
    }
}

/// Server-side filter for the unscoped transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Uncategorized,
    Unapproved,
}

impl TransactionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uncategorized => "uncategorized",
            Self::Unapproved => "unapproved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub memo: Option<String>,
    #[serde(default)]
    pub cleared: ClearedStatus,
    #[serde(default)]
    pub approved: bool,
    pub flag_color: Option<String>,
    pub flag_name: Option<String>,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub account_name: String,
    pub payee_id: Option<String>,
    pub payee_name: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub transfer_account_id: Option<String>,
    pub transfer_transaction_id: Option<String>,
    pub matched_transaction_id: Option<String>,
    pub import_id: Option<String>,
    pub import_payee_name: Option<String>,
    pub import_payee_name_original: Option<String>,
    pub debt_transaction_type: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub subtransactions: Vec<Subtransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtransaction {
    pub id: String,
    #[serde(default)]
    pub transaction_id: String,
    pub amount: i64,
    pub memo: Option<String>,
    pub payee_id: Option<String>,
    pub payee_name: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub transfer_account_id: Option<String>,
    pub transfer_transaction_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTransaction {
    pub id: String,
    pub date_first: NaiveDate,
    pub date_next: NaiveDate,
    #[serde(default)]
    pub frequency: Frequency,
    pub amount: i64,
    pub memo: Option<String>,
    pub flag_color: Option<String>,
    pub flag_name: Option<String>,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub account_name: String,
    pub payee_id: Option<String>,
    pub payee_name: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub transfer_account_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub subtransactions: Vec<ScheduledSubtransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSubtransaction {
    pub id: String,
    #[serde(default)]
    pub scheduled_transaction_id: String,
    pub amount: i64,
    pub memo: Option<String>,
    pub payee_id: Option<String>,
    pub category_id: Option<String>,
    pub transfer_account_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    /// Always the first day of the calendar month.
    pub month: NaiveDate,
    pub note: Option<String>,
    #[serde(default)]
    pub income: i64,
    #[serde(default)]
    pub budgeted: i64,
    #[serde(default)]
    pub activity: i64,
    #[serde(default)]
    pub to_be_budgeted: i64,
    pub age_of_money: Option<i64>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

// Request payloads. Each is sent wrapped under its resource key.

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveMonthCategory {
    pub budgeted: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavePayee {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveTransaction {
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared: Option<ClearedStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_color: Option<String>,
}

impl From<&Transaction> for SaveTransaction {
    fn from(t: &Transaction) -> Self {
        Self {
            account_id: t.account_id.clone(),
            date: t.date,
            amount: t.amount,
            payee_id: t.payee_id.clone(),
            payee_name: None,
            category_id: t.category_id.clone(),
            memo: t.memo.clone(),
            cleared: Some(t.cleared),
            approved: Some(t.approved),
            flag_color: t.flag_color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveScheduledTransaction {
    pub account_id: String,
    /// First occurrence; the server reports it back as `date_first`.
    pub date: NaiveDate,
    pub frequency: Frequency,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_color: Option<String>,
}

impl From<&ScheduledTransaction> for SaveScheduledTransaction {
    fn from(st: &ScheduledTransaction) -> Self {
        Self {
            account_id: st.account_id.clone(),
            date: st.date_first,
            frequency: st.frequency,
            amount: st.amount,
            payee_id: st.payee_id.clone(),
            payee_name: None,
            category_id: st.category_id.clone(),
            memo: st.memo.clone(),
            flag_color: st.flag_color.clone(),
        }
    }
}
