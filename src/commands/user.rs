// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};

use super::Context;
use crate::render::Renderable;

pub fn handle(ctx: &Context) -> Result<Renderable> {
    let user = ctx.client.get_user().context("failed to get user")?;
    Ok(user.into())
}
