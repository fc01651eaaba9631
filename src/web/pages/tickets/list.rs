// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::card::TicketCard;
use super::utils::attribute_options;
use crate::model::{Category, Priority, Status, TicketAttribute, TicketFilters, TicketFiltersStoreFields, TicketId};
use crate::web::refresh::RefreshSignal;
use crate::web::service::TicketService;
use crate::web::ticket_list::{TicketListResource, change_ticket_status};
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

#[component]
pub fn TicketList(refresh: RefreshSignal) -> impl IntoView {
	let service: TicketService = expect_context();
	let filters = Store::new(TicketFilters::default());
	let list = TicketListResource::new(service.api(), filters, refresh);

	let status_change = Callback::new(move |(id, status): (TicketId, Status)| {
		spawn_local(async move {
			change_ticket_status(service.api().as_ref(), &list, id, status, alert_user).await;
		});
	});

	view! {
		<div class="ticket-list-container">
			<div class="filters">
				<input
					type="text"
					name="search"
					placeholder="Search items..."
					class="search-input"
					prop:value=move || filters.search().get()
					on:input=move |event| filters.search().set(event_target_value(&event))
				/>
				<FilterSelect
					name="category"
					all_label="All Categories"
					options={attribute_options(Category::ALL)}
					value={Signal::derive(move || filters.category().get())}
					on_change={Callback::new(move |value| filters.category().set(value))}
				/>
				<FilterSelect
					name="priority"
					all_label="All Priorities"
					options={attribute_options(Priority::ALL)}
					value={Signal::derive(move || filters.priority().get())}
					on_change={Callback::new(move |value| filters.priority().set(value))}
				/>
				<FilterSelect
					name="status"
					all_label="All Statuses"
					options={attribute_options(Status::ALL)}
					value={Signal::derive(move || filters.status().get())}
					on_change={Callback::new(move |value| filters.status().set(value))}
				/>
			</div>
			<Suspense fallback=|| view! { <p>"Loading tickets..."</p> }>
				{
					move || match list.get() {
						Some(tickets) if !tickets.is_empty() => view! {
							<div class="ticket-grid">
								{
									tickets.into_iter().map(|ticket| view! {
										<TicketCard ticket on_status_change={status_change} />
									}).collect::<Vec<_>>()
								}
							</div>
						}.into_any(),
						_ => view! {
							<div class="ticket-grid">
								<p>"No tickets found matching your filters."</p>
							</div>
						}.into_any(),
					}
				}
			</Suspense>
		</div>
	}
}

/// A select for one of the list filters. The empty value stands for "no filter".
#[component]
fn FilterSelect(
	name: &'static str,
	all_label: &'static str,
	options: Vec<(&'static str, &'static str)>,
	value: Signal<String>,
	on_change: Callback<String>,
) -> impl IntoView {
	view! {
		<select
			name={name}
			prop:value=move || value.get()
			on:change=move |event| on_change.run(event_target_value(&event))
		>
			<option value="">{all_label}</option>
			{
				options.into_iter().map(|(option_value, label)| view! {
					<option value={option_value}>{label}</option>
				}).collect::<Vec<_>>()
			}
		</select>
	}
}

fn alert_user(message: &str) {
	if let Err(alert_error) = window().alert_with_message(message) {
		error!("Failed to show alert: {:?}", alert_error);
	}
}
