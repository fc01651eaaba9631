// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::api::{ApiError, TicketApi};
use super::refresh::RefreshSignal;
use crate::model::Stats;
use leptos::logging::error;
use leptos::prelude::*;
use std::rc::Rc;

/// Loads the stats now and again on every refresh.
///
/// The resource holds [None] only if no fetch has succeeded yet; a failed fetch keeps the last
/// snapshot.
pub fn stats_resource(api: Rc<dyn TicketApi>, refresh: RefreshSignal) -> LocalResource<Option<Stats>> {
	let latest = StoredValue::new(None::<Stats>);
	LocalResource::new(move || {
		refresh.track();
		let api = Rc::clone(&api);
		async move {
			let stats = newest_stats(api.stats().await, latest.get_value());
			latest.set_value(stats.clone());
			stats
		}
	})
}

/// Picks the snapshot to show once a fetch finishes.
pub fn newest_stats(result: Result<Stats, ApiError>, previous: Option<Stats>) -> Option<Stats> {
	match result {
		Ok(stats) => Some(stats),
		Err(fetch_error) => {
			error!("Error fetching stats: {}", fetch_error);
			previous
		}
	}
}

/// Formats the average number of tickets per day the same way the service reports it
/// (`2.5` stays `2.5`, `3.0` becomes `3`).
pub fn format_average(average: f64) -> String {
	format!("{}", average)
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::model::Breakdown;
	use crate::web::api::fake::server_error;

	pub fn sample_stats(total_tickets: u64) -> Stats {
		Stats {
			total_tickets,
			open_tickets: 4,
			avg_tickets_per_day: 2.5,
			priority_breakdown: [(String::from("low"), 3), (String::from("high"), 1)].into_iter().collect(),
			category_breakdown: [(String::from("general"), total_tickets)].into_iter().collect(),
		}
	}

	#[test]
	fn successful_fetch_replaces_snapshot() {
		let stats = newest_stats(Ok(sample_stats(11)), Some(sample_stats(10)));
		assert_eq!(stats, Some(sample_stats(11)));
	}

	#[test]
	fn failed_fetch_keeps_previous_snapshot() {
		assert_eq!(newest_stats(Err(server_error()), Some(sample_stats(10))), Some(sample_stats(10)));
		assert_eq!(newest_stats(Err(server_error()), None), None);
	}

	#[test]
	fn breakdowns_keep_their_order() {
		let stats = sample_stats(10);
		let priorities: Vec<(&str, u64)> = stats.priority_breakdown.iter().collect();
		assert_eq!(priorities, vec![("low", 3), ("high", 1)]);
		assert_eq!(stats.category_breakdown, Breakdown::from_iter([(String::from("general"), 10)]));
	}

	#[test]
	fn average_formatting() {
		assert_eq!(format_average(2.5), "2.5");
		assert_eq!(format_average(3.0), "3");
		assert_eq!(format_average(0.33), "0.33");
	}

	#[cfg(not(feature = "ssr"))]
	mod resource {
		use super::*;
		use crate::web::api::fake::{ApiCall, FakeTicketApi, settle};
		use any_spawner::Executor;
		use tokio::task::LocalSet;

		#[tokio::test]
		async fn loads_on_creation_and_on_each_refresh() {
			_ = Executor::init_tokio();
			let owner = Owner::new();
			owner.set();

			LocalSet::new()
				.run_until(async {
					let api = Rc::new(FakeTicketApi::default());
					*api.stats.borrow_mut() = Some(sample_stats(10));
					let refresh = RefreshSignal::new();
					let stats = stats_resource(api.clone(), refresh);

					settle().await;
					assert_eq!(api.calls(), vec![ApiCall::Stats]);
					assert_eq!(stats.get_untracked().flatten(), Some(sample_stats(10)));

					*api.stats.borrow_mut() = None;
					refresh.notify();
					settle().await;
					assert_eq!(api.calls(), vec![ApiCall::Stats, ApiCall::Stats]);
					assert_eq!(stats.get_untracked().flatten(), Some(sample_stats(10)));
				})
				.await;
		}
	}
}
