// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use leptos::prelude::*;

/// Tells the views that show ticket data that it changed on the service and needs fetching again.
///
/// Views call [RefreshSignal::track] in the fetcher of the resource holding their data; every
/// [RefreshSignal::notify] loads each such resource once more.
#[derive(Clone, Copy, Debug)]
pub struct RefreshSignal {
	generation: RwSignal<u64>,
}

impl RefreshSignal {
	pub fn new() -> Self {
		Self {
			generation: RwSignal::new(0),
		}
	}

	pub fn notify(&self) {
		self.generation.update(|generation| *generation = generation.wrapping_add(1));
	}

	/// Subscribes the running fetcher to refreshes.
	pub fn track(&self) {
		self.generation.track();
	}
}

impl Default for RefreshSignal {
	fn default() -> Self {
		Self::new()
	}
}
