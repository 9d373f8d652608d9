// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use anyhow::Result;

/// Markdown primer for assistants driving the CLI.
pub const GUIDE: &str = r#"# ynabctl: guide for AI assistants

ynabctl talks to the YNAB (You Need A Budget) REST API. Output is JSON by
default so it can be piped into jq; pass `-f table` for a human view.

## Concepts

- Budget: the container for all other data. Most commands need a budget ID,
  taken from `--budget` or the configured default.
- Accounts: checking, savings, cash, creditCard, lineOfCredit, otherAsset,
  otherLiability, mortgage, autoLoan, studentLoan, personalLoan, medicalDebt,
  otherDebt.
- Categories live in groups. Each has budgeted, activity and balance for a month.
- Transactions: date, amount, payee, category, memo.
- Milliunits: the API stores money as 1/1000 of a unit (50000 = 50.00).
  JSON output shows raw milliunits; command-line amounts are plain decimals
  and are converted for you.

Amounts: negative is an outflow, positive is an inflow.
Dates: always YYYY-MM-DD. IDs are UUIDs; copy them from list output.

## Setup

```bash
ynabctl config set-token <token>        # Account Settings > Developer Settings
ynabctl budgets list                    # find the budget ID
ynabctl config set-default-budget <id>
ynabctl config set-format table         # optional; json is the default
ynabctl config show
```

## Commands

```bash
ynabctl user
ynabctl budgets list | get [id] | settings [id]
ynabctl accounts list | get <id>
ynabctl accounts create --name "Checking" --type checking --balance 1000
ynabctl categories list | get <id>
ynabctl categories update <id> --budgeted 500 [--month 2024-01 | current]
ynabctl payees list | get <id>
ynabctl payees update <id> --name "New Name"
ynabctl transactions list [--since 2024-01-01] [--type unapproved|uncategorized]
ynabctl transactions list --account <id> | --category <id> | --payee <id>
ynabctl transactions get <id>
ynabctl transactions create --account <id> --amount -42.50 \
    [--date 2024-01-15] [--payee-name "Cafe"] [--category <id>] [--memo "..."] \
    [--cleared cleared] [--approved] [--flag red]
ynabctl transactions update <id> --amount -55     # only the given fields change
ynabctl transactions delete <id>
ynabctl scheduled list | get <id> | delete <id>
ynabctl scheduled create --account <id> --amount -100 --frequency monthly \
    [--date 2024-02-01] [--payee-name "Landlord"] [--memo "Rent"]
ynabctl scheduled update <id> --amount -150
ynabctl months list
ynabctl months get [current | 2024-01 | 2024-01-01]
```

`--type` only applies to the unfiltered listing; `--account`, `--category`
and `--payee` are mutually exclusive.

Frequencies: never, daily, weekly, everyOtherWeek, twiceAMonth, every4Weeks,
monthly, everyOtherMonth, every3Months, every4Months, twiceAYear, yearly,
everyOtherYear.

## Global flags

```bash
-b, --budget <id>      # overrides the default budget
-f, --format <fmt>     # json or table
-v, --verbose          # log HTTP requests to stderr
```

## Recipes

```bash
ynabctl months get current -f table                          # to be budgeted
ynabctl accounts list | jq '.[] | {id, name}'
ynabctl categories list | jq '.[].categories[] | {id, name}'
ynabctl transactions list --since "$(date +%Y-%m-01)" -f table
ynabctl transactions list --type unapproved -f table
```

## Environment

```bash
YNAB_TOKEN            # API token
YNAB_DEFAULT_BUDGET   # default budget ID
YNAB_FORMAT           # json or table
YNABCTL_CONFIG_DIR    # alternative config directory
YNABCTL_LOG           # log filter, e.g. debug
```

## Errors

- 401: the token is invalid or expired.
- 404: a budget, account or transaction ID does not exist.
- 400: a parameter was rejected; check dates and amounts.

The process exits with status 1 on any error and prints `Error: ...` to stderr.
"#;

pub fn handle<W: Write>(out: &mut W) -> Result<()> {
    out.write_all(GUIDE.as_bytes())?;
    Ok(())
}
