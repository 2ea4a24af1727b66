// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Web API consts
//!

/// Largest `window` (past & future events) a client may ask for
pub const MAX_LIMIT_PAST_FUTURE: usize = 50;
