// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::{Status, Ticket, TicketAttribute, TicketId};
use crate::web::format::{format_created_date, truncate_description};
use chrono::Local;
use leptos::prelude::*;

#[component]
pub fn TicketCard(ticket: Ticket, on_status_change: Callback<(TicketId, Status)>) -> impl IntoView {
	let id = ticket.id;
	let current_status = ticket.status;

	view! {
		<div class={format!("ticket-card border-{}", ticket.priority.as_str())}>
			<div class="ticket-header">
				<h3>{ticket.title.clone()}</h3>
				<span class={format!("badge status-{}", current_status.as_str())}>
					{current_status.badge_text()}
				</span>
			</div>
			<p class="ticket-desc">{truncate_description(&ticket.description).into_owned()}</p>
			<div class="ticket-meta">
				<span class="badge category">{ticket.category.as_str()}</span>
				<span class={format!("badge priority-{}", ticket.priority.as_str())}>{ticket.priority.as_str()}</span>
				<small>{format_created_date(&ticket.created_at, &Local)}</small>
			</div>
			<div class="ticket-actions">
				<label>"Update Status:"</label>
				<select
					class="status-select"
					prop:value={current_status.as_str()}
					on:change=move |event| {
						let value = event_target_value(&event);
						match value.parse::<Status>() {
							Ok(status) if status != current_status => on_status_change.run((id, status)),
							Ok(_) => (),
							Err(parse_error) => leptos::logging::warn!("{}", parse_error),
						}
					}
				>
					{
						Status::ALL.iter().map(|status| view! {
							<option value={status.as_str()} selected={*status == current_status}>
								{status.label()}
							</option>
						}).collect::<Vec<_>>()
					}
				</select>
			</div>
		</div>
	}
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
	use super::*;
	use crate::model::{Category, Priority};
	use chrono::{TimeZone, Utc};

	fn long_ticket() -> Ticket {
		Ticket {
			id: 4,
			title: String::from("Printer jam"),
			description: "x".repeat(95) + "abcdefghij",
			category: Category::Technical,
			priority: Priority::High,
			status: Status::InProgress,
			created_at: Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap(),
		}
	}

	fn render(ticket: Ticket) -> String {
		Owner::new().with(|| {
			let on_status_change = Callback::new(|_: (TicketId, Status)| ());
			view! { <TicketCard ticket on_status_change /> }.to_html().replace("<!>", "")
		})
	}

	#[test]
	fn card_shows_status_and_priority_classes() {
		let html = render(long_ticket());
		assert!(html.contains(r#"class="ticket-card border-high""#));
		assert!(html.contains(r#"<span class="badge status-in_progress">in progress</span>"#));
		assert!(html.contains(r#"<span class="badge category">technical</span>"#));
		assert!(html.contains(r#"<span class="badge priority-high">high</span>"#));
		assert!(html.contains("<h3>Printer jam</h3>"));
	}

	#[test]
	fn card_truncates_long_description() {
		let ticket = long_ticket();
		let created = format_created_date(&ticket.created_at, &Local);
		let html = render(ticket);
		let shown = "x".repeat(95) + "abcde...";
		assert!(html.contains(&format!(r#"<p class="ticket-desc">{}</p>"#, shown)));
		assert!(!html.contains("abcdef"));
		assert!(html.contains(&format!("<small>{}</small>", created)));
	}

	#[test]
	fn status_options_cover_every_status() {
		let html = render(long_ticket());
		for status in Status::ALL {
			assert!(html.contains(&format!(r#"value="{}""#, status.as_str())));
		}
	}
}
