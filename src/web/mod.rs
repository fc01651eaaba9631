// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod api;
pub mod format;
pub mod pages;
pub mod refresh;
#[cfg(feature = "ssr")]
pub mod server;
pub mod service;
#[cfg(feature = "ssr")]
pub mod state;
pub mod stats;
pub mod ticket_form;
pub mod ticket_list;
