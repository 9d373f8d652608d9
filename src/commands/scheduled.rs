// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result, anyhow};
use chrono::NaiveDate;
use clap::ArgMatches;

use super::{Context, arg, unknown};
use crate::client::amount_to_milliunits;
use crate::models::{Frequency, SaveScheduledTransaction, ScheduledTransaction};
use crate::render::Renderable;
use crate::utils::today;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledOverrides {
    pub account_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub frequency: Option<Frequency>,
    pub amount: Option<i64>,
    pub payee_id: Option<String>,
    pub payee_name: Option<String>,
    pub category_id: Option<String>,
    pub memo: Option<String>,
    pub flag_color: Option<String>,
}

impl ScheduledOverrides {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let text = |id: &str| m.get_one::<String>(id).cloned();
        Self {
            account_id: text("account"),
            date: m.get_one::<NaiveDate>("date").copied(),
            frequency: m.get_one::<Frequency>("frequency").copied(),
            amount: m.get_one::<f64>("amount").copied().map(amount_to_milliunits),
            payee_id: text("payee-id"),
            payee_name: text("payee-name"),
            category_id: text("category"),
            memo: text("memo"),
            flag_color: text("flag"),
        }
    }

    /// The replacement keeps `date_first` unless `--date` is given.
    pub fn apply(self, existing: &ScheduledTransaction) -> SaveScheduledTransaction {
        let mut save = SaveScheduledTransaction::from(existing);
        if let Some(v) = self.account_id {
            save.account_id = v;
        }
        if let Some(v) = self.date {
            save.date = v;
        }
        if let Some(v) = self.frequency {
            save.frequency = v;
        }
        if let Some(v) = self.amount {
            save.amount = v;
        }
        if self.payee_name.is_some() && self.payee_id.is_none() {
            save.payee_id = None;
        }
        if let Some(v) = self.payee_id {
            save.payee_id = Some(v);
        }
        if let Some(v) = self.payee_name {
            save.payee_name = Some(v);
        }
        if let Some(v) = self.category_id {
            save.category_id = Some(v);
        }
        if let Some(v) = self.memo {
            save.memo = Some(v);
        }
        if let Some(v) = self.flag_color {
            save.flag_color = Some(v);
        }
        save
    }

    pub fn into_create(self, today: NaiveDate) -> Result<SaveScheduledTransaction> {
        Ok(SaveScheduledTransaction {
            account_id: self
                .account_id
                .ok_or_else(|| anyhow!("account ID is required (--account)"))?,
            date: self.date.unwrap_or(today),
            frequency: self
                .frequency
                .ok_or_else(|| anyhow!("frequency is required (--frequency)"))?,
            amount: self
                .amount
                .ok_or_else(|| anyhow!("amount is required (--amount)"))?,
            payee_id: self.payee_id,
            payee_name: self.payee_name,
            category_id: self.category_id,
            memo: self.memo,
            flag_color: self.flag_color,
        })
    }
}

pub fn handle(ctx: &Context, m: &ArgMatches) -> Result<Renderable> {
    let budget = ctx.budget_id()?;
    match m.subcommand() {
        Some(("list", _)) => {
            let list = ctx
                .client
                .list_scheduled_transactions(budget)
                .context("failed to get scheduled transactions")?;
            Ok(list.into())
        }
        Some(("get", sub)) => {
            let st = ctx
                .client
                .get_scheduled_transaction(budget, arg(sub, "id")?)
                .context("failed to get scheduled transaction")?;
            Ok(st.into())
        }
        Some(("create", sub)) => {
            let save = ScheduledOverrides::from_matches(sub).into_create(today())?;
            let st = ctx
                .client
                .create_scheduled_transaction(budget, &save)
                .context("failed to create scheduled transaction")?;
            Ok(st.into())
        }
        Some(("update", sub)) => {
            let id = arg(sub, "id")?;
            let existing = ctx
                .client
                .get_scheduled_transaction(budget, id)
                .context("failed to get existing scheduled transaction")?;
            let save = ScheduledOverrides::from_matches(sub).apply(&existing);
            let st = ctx
                .client
                .update_scheduled_transaction(budget, id, &save)
                .context("failed to update scheduled transaction")?;
            Ok(st.into())
        }
        Some(("delete", sub)) => {
            let st = ctx
                .client
                .delete_scheduled_transaction(budget, arg(sub, "id")?)
                .context("failed to delete scheduled transaction")?;
            Ok(st.into())
        }
        _ => Err(unknown(m)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn existing() -> ScheduledTransaction {
        serde_json::from_value(json!({
            "id": "s1",
            "date_first": "2024-01-01",
            "date_next": "2024-06-01",
            "frequency": "monthly",
            "amount": -150000,
            "memo": "Rent",
            "account_id": "a1",
            "account_name": "Checking",
            "payee_id": "p2"
        }))
        .unwrap()
    }

    #[test]
    fn update_keeps_first_date_and_frequency() {
        let over = ScheduledOverrides {
            amount: Some(-160000),
            ..ScheduledOverrides::default()
        };
        let save = over.apply(&existing());
        assert_eq!(save.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(save.frequency, Frequency::Monthly);
        assert_eq!(save.amount, -160000);
        assert_eq!(save.memo.as_deref(), Some("Rent"));
    }

    #[test]
    fn create_requires_frequency() {
        let over = ScheduledOverrides {
            account_id: Some("a1".into()),
            amount: Some(-1000),
            ..ScheduledOverrides::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(over.into_create(today).is_err());
    }
}
