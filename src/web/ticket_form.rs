// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::api::TicketApi;
use crate::model::{Category, Classification, NewTicket, Priority, Ticket};
use leptos::logging::error;

pub const TITLE_MAX_LENGTH: usize = 200;
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create ticket";

/// What the user has entered into the new ticket form so far.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TicketDraft {
	pub title: String,
	pub description: String,
	pub category: Category,
	pub priority: Priority,
}

impl TicketDraft {
	/// Checks the draft, returning a message for each problem found.
	pub fn validate(&self) -> Vec<String> {
		let mut errors = Vec::new();
		let title = self.title.trim();
		if title.is_empty() {
			errors.push(String::from("Ticket must have a title"));
		} else if title.chars().count() > TITLE_MAX_LENGTH {
			errors.push(format!("Title must be at most {} characters", TITLE_MAX_LENGTH));
		}
		if self.description.trim().is_empty() {
			errors.push(String::from("Ticket must have a description"));
		}
		errors
	}

	pub fn to_new_ticket(&self) -> NewTicket {
		NewTicket {
			title: self.title.trim().to_string(),
			description: self.description.trim().to_string(),
			category: self.category,
			priority: self.priority,
		}
	}

	/// Takes on what the service suggested, given `requested_with`, the draft as it was when the
	/// suggestion was asked for. A field the user has changed since then keeps the user's choice.
	/// Returns whether anything was taken on.
	pub fn apply_classification(&mut self, classification: &Classification, requested_with: &TicketDraft) -> bool {
		let mut applied = false;
		if let Some(category) = classification.suggested_category {
			if self.category == requested_with.category {
				self.category = category;
				applied = true;
			}
		}
		if let Some(priority) = classification.suggested_priority {
			if self.priority == requested_with.priority {
				self.priority = priority;
				applied = true;
			}
		}
		applied
	}
}

/// Submits a draft to the ticket service. Returns the messages to show the user if it wasn't created.
pub async fn submit_ticket<A: TicketApi + ?Sized>(api: &A, draft: &TicketDraft) -> Result<Ticket, Vec<String>> {
	let errors = draft.validate();
	if !errors.is_empty() {
		return Err(errors);
	}

	match api.create_ticket(&draft.to_new_ticket()).await {
		Ok(ticket) => Ok(ticket),
		Err(create_error) => {
			error!("Error creating ticket: {}", create_error);
			Err(vec![String::from(CREATE_FAILED_MESSAGE)])
		}
	}
}

/// Asks the service to classify a description. Blank descriptions aren't sent.
pub async fn suggest_classification<A: TicketApi + ?Sized>(api: &A, description: &str) -> Option<Classification> {
	let description = description.trim();
	if description.is_empty() {
		return None;
	}
	match api.classify(description).await {
		Ok(classification) => Some(classification),
		Err(classify_error) => {
			error!("Error classifying ticket: {}", classify_error);
			None
		}
	}
}
