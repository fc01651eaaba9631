// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::{Category, Priority, TicketAttribute};
use crate::web::service::TicketService;
use crate::web::ticket_form::{TITLE_MAX_LENGTH, TicketDraft, submit_ticket, suggest_classification};
use leptos::ev::{FocusEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Form for opening a new ticket. Calls `on_ticket_created` once the service has created it.
#[component]
pub fn TicketForm(on_ticket_created: Callback<()>) -> impl IntoView {
	let service: TicketService = expect_context();
	let (title, set_title) = signal(String::new());
	let (description, set_description) = signal(String::new());
	let category = RwSignal::new(Category::default());
	let priority = RwSignal::new(Priority::default());
	let (submit_errors, set_submit_errors): (ReadSignal<Vec<String>>, WriteSignal<Vec<String>>) = signal(Vec::new());
	let submitting = RwSignal::new(false);
	let classifying = RwSignal::new(false);
	let suggested = RwSignal::new(false);

	let current_draft = move || TicketDraft {
		title: title.get_untracked(),
		description: description.get_untracked(),
		category: category.get_untracked(),
		priority: priority.get_untracked(),
	};

	let reset_form = move || {
		let defaults = TicketDraft::default();
		set_title.set(defaults.title);
		set_description.set(defaults.description);
		category.set(defaults.category);
		priority.set(defaults.priority);
		suggested.set(false);
	};

	let description_blur = move |_: FocusEvent| {
		let text = description.get_untracked();
		if text.trim().is_empty() {
			return;
		}
		classifying.set(true);
		let requested_with = current_draft();
		spawn_local(async move {
			if let Some(classification) = suggest_classification(service.api().as_ref(), &text).await {
				let mut draft = current_draft();
				if draft.apply_classification(&classification, &requested_with) {
					category.set(draft.category);
					priority.set(draft.priority);
					suggested.set(true);
				}
			}
			classifying.set(false);
		});
	};

	let form_submit = move |event: SubmitEvent| {
		event.prevent_default();
		if submitting.get_untracked() {
			return;
		}
		set_submit_errors.set(Vec::new());
		submitting.set(true);

		let draft = current_draft();
		spawn_local(async move {
			match submit_ticket(service.api().as_ref(), &draft).await {
				Ok(_) => {
					reset_form();
					on_ticket_created.run(());
				}
				Err(errors) => set_submit_errors.set(errors),
			}
			submitting.set(false);
		});
	};

	view! {
		<form class="ticket-form" on:submit=form_submit>
			<h2>"Submit a Ticket"</h2>
			<div class="ticket-form-errors">
				<ul>
					<For
						each=move || submit_errors.get()
						key=|error| error.clone()
						let(error)
					>
						<li>{error}</li>
					</For>
				</ul>
			</div>
			<label>
				<span class="ticket-form-label">"Title"</span>
				<input
					type="text"
					name="title"
					maxlength={TITLE_MAX_LENGTH.to_string()}
					bind:value=(title, set_title)
				/>
			</label>
			<label>
				<span class="ticket-form-label">"Description"</span>
				<textarea
					name="description"
					rows="4"
					prop:value=move || description.get()
					on:input=move |event| set_description.set(event_target_value(&event))
					on:blur=description_blur
				></textarea>
			</label>
			<Show when=move || classifying.get()>
				<div class="ticket-form-hint">"Suggesting category and priority..."</div>
			</Show>
			<Show when=move || suggested.get()>
				<div class="ticket-form-hint">"Category and priority were suggested from the description."</div>
			</Show>
			<div class="ticket-form-row">
				<label>
					<span class="ticket-form-label">"Category"</span>
					<select
						name="category"
						prop:value=move || category.get().as_str()
						on:change=move |event| {
							if let Ok(value) = event_target_value(&event).parse() {
								category.set(value);
							}
						}
					>
						{
							Category::ALL.iter().map(|&choice| view! {
								<option value={choice.as_str()} selected=move || category.get() == choice>
									{choice.label()}
								</option>
							}).collect::<Vec<_>>()
						}
					</select>
				</label>
				<label>
					<span class="ticket-form-label">"Priority"</span>
					<select
						name="priority"
						prop:value=move || priority.get().as_str()
						on:change=move |event| {
							if let Ok(value) = event_target_value(&event).parse() {
								priority.set(value);
							}
						}
					>
						{
							Priority::ALL.iter().map(|&choice| view! {
								<option value={choice.as_str()} selected=move || priority.get() == choice>
									{choice.label()}
								</option>
							}).collect::<Vec<_>>()
						}
					</select>
				</label>
			</div>
			<button type="submit" disabled=move || submitting.get()>
				{move || if submitting.get() { "Submitting..." } else { "Submit Ticket" }}
			</button>
		</form>
	}
}
