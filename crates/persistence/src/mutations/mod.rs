// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `catalog`: buses, routes, assignments and pre-informs
//! - `performances`: weekly performance upserts and report persistence

pub mod catalog;
pub mod performances;
