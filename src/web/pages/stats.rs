// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::{Breakdown, Stats};
use crate::web::refresh::RefreshSignal;
use crate::web::service::TicketService;
use crate::web::stats::{format_average, stats_resource};
use leptos::prelude::*;

#[component]
pub fn StatsDashboard(refresh: RefreshSignal) -> impl IntoView {
	let service: TicketService = expect_context();
	let stats = stats_resource(service.api(), refresh);

	view! {
		<Transition fallback=|| view! { <div class="stats-loading">"Loading stats..."</div> }>
			{
				move || stats.get().flatten().map(|stats| view! { <StatsPanel stats /> })
			}
		</Transition>
	}
}

#[component]
fn StatsPanel(stats: Stats) -> impl IntoView {
	view! {
		<div class="dashboard">
			<div class="stats-grid main-stats">
				<StatCard title="Total Tickets" value={stats.total_tickets.to_string()} />
				<StatCard title="Open Tickets" value={stats.open_tickets.to_string()} />
				<StatCard title="Avg / Day" value={format_average(stats.avg_tickets_per_day)} />
			</div>
			<div class="stats-grid breakdowns">
				<BreakdownCard title="Priority" breakdown={stats.priority_breakdown} label_class_prefix="priority" />
				<BreakdownCard title="Category" breakdown={stats.category_breakdown} />
			</div>
		</div>
	}
}

#[component]
fn StatCard(title: &'static str, value: String) -> impl IntoView {
	view! {
		<div class="stat-card">
			<h3>{title}</h3>
			<div class="value">{value}</div>
		</div>
	}
}

/// Lists the counts of a breakdown. With `label_class_prefix`, each label is also given the class
/// `{prefix}-{key}`.
#[component]
fn BreakdownCard(
	title: &'static str,
	breakdown: Breakdown,
	#[prop(optional)] label_class_prefix: Option<&'static str>,
) -> impl IntoView {
	view! {
		<div class="breakdown-card">
			<h3>{title}</h3>
			<div class="breakdown-list">
				{
					breakdown.iter().map(|(key, count)| {
						let label_class = match label_class_prefix {
							Some(prefix) => format!("label {}-{}", prefix, key),
							None => String::from("label"),
						};
						view! {
							<div class="breakdown-item">
								<span class={label_class}>{key.to_string()}</span>
								<span class="count">{count}</span>
							</div>
						}
					}).collect::<Vec<_>>()
				}
			</div>
		</div>
	}
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
	use super::*;
	use crate::web::stats::tests::sample_stats;

	fn render(stats: Stats) -> String {
		view! { <StatsPanel stats /> }.to_html().replace("<!>", "")
	}

	#[test]
	fn panel_shows_counters() {
		let html = render(sample_stats(10));
		assert!(html.contains(r#"<h3>Total Tickets</h3><div class="value">10</div>"#));
		assert!(html.contains(r#"<h3>Open Tickets</h3><div class="value">4</div>"#));
		assert!(html.contains(r#"<h3>Avg / Day</h3><div class="value">2.5</div>"#));
	}

	#[test]
	fn breakdowns_render_in_service_order() {
		let html = render(sample_stats(10));
		let low = html.find(r#"<span class="label priority-low">low</span><span class="count">3</span>"#);
		let high = html.find(r#"<span class="label priority-high">high</span><span class="count">1</span>"#);
		assert!(low.is_some());
		assert!(high.is_some());
		assert!(low < high);
		assert!(html.contains(r#"<span class="label">general</span><span class="count">10</span>"#));
		assert!(html.find("Priority") < html.find("Category"));
	}
}
