// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::api::{ApiError, TicketApi};
use super::refresh::RefreshSignal;
use crate::model::{Status, Ticket, TicketFilters, TicketId};
use leptos::logging::error;
use leptos::prelude::*;
use reactive_stores::Store;
use std::collections::HashMap;
use std::rc::Rc;

pub const STATUS_UPDATE_FAILED_MESSAGE: &str = "Failed to update status";

/// Status changes shown before the service has confirmed them, by ticket ID.
#[derive(Clone, Debug, Default)]
pub struct PendingStatuses(HashMap<TicketId, Status>);

impl PendingStatuses {
	pub fn insert(&mut self, id: TicketId, status: Status) {
		self.0.insert(id, status);
	}

	/// Removes a pending change if it's still the most recent one for the ticket. Returns whether
	/// it was.
	pub fn settle(&mut self, id: TicketId, status: Status) -> bool {
		match self.0.get(&id) {
			Some(pending) if *pending == status => {
				self.0.remove(&id);
				true
			}
			_ => false,
		}
	}

	/// Shows every pending change in `tickets`.
	pub fn apply(&self, tickets: &mut [Ticket]) {
		for (id, status) in &self.0 {
			set_status(tickets, *id, *status);
		}
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

fn set_status(tickets: &mut [Ticket], id: TicketId, status: Status) {
	for ticket in tickets.iter_mut().filter(|ticket| ticket.id == id) {
		ticket.status = status;
	}
}

/// Works out the list to show once a fetch finishes. A failed fetch keeps `previous`; pending
/// status changes are shown on top either way.
pub fn loaded_tickets(
	result: Result<Vec<Ticket>, ApiError>,
	previous: Vec<Ticket>,
	pending: &PendingStatuses,
) -> Vec<Ticket> {
	let mut tickets = match result {
		Ok(tickets) => tickets,
		Err(fetch_error) => {
			error!("Error fetching tickets: {}", fetch_error);
			previous
		}
	};
	pending.apply(&mut tickets);
	tickets
}

/// Where the ticket list view keeps what it shows.
pub trait TicketListStorage {
	/// Changes the tickets on screen. Does nothing before the first load finishes.
	fn update_tickets(&self, update: impl FnOnce(&mut Vec<Ticket>));

	/// Returns [None] if the view is gone.
	fn update_pending<R>(&self, update: impl FnOnce(&mut PendingStatuses) -> R) -> Option<R>;

	/// Loads the list again with the filters selected now.
	fn reload(&self);
}

/// The ticket list for the selected filters, loaded again whenever the filters change or the page
/// is refreshed.
#[derive(Clone, Copy)]
pub struct TicketListResource {
	tickets: LocalResource<Vec<Ticket>>,
	/// What's on screen, for when a reload fails.
	shown: StoredValue<Vec<Ticket>>,
	pending: StoredValue<PendingStatuses>,
}

impl TicketListResource {
	pub fn new(api: Rc<dyn TicketApi>, filters: Store<TicketFilters>, refresh: RefreshSignal) -> Self {
		let shown = StoredValue::new(Vec::new());
		let pending = StoredValue::new(PendingStatuses::default());
		let tickets = LocalResource::new(move || {
			let filters = filters.get();
			refresh.track();
			let api = Rc::clone(&api);
			async move {
				let result = api.list_tickets(&filters).await;
				let tickets = pending.with_value(|pending| loaded_tickets(result, shown.get_value(), pending));
				shown.set_value(tickets.clone());
				tickets
			}
		});

		Self {
			tickets,
			shown,
			pending,
		}
	}

	/// The loaded tickets. Reading this inside `<Suspense>` shows its fallback while a load runs.
	pub fn get(&self) -> Option<Vec<Ticket>> {
		self.tickets.get()
	}
}

impl TicketListStorage for TicketListResource {
	fn update_tickets(&self, update: impl FnOnce(&mut Vec<Ticket>)) {
		self.tickets.update(|tickets| {
			if let Some(tickets) = tickets {
				update(tickets);
				self.shown.set_value(tickets.clone());
			}
		});
	}

	fn update_pending<R>(&self, update: impl FnOnce(&mut PendingStatuses) -> R) -> Option<R> {
		self.pending.try_update_value(update)
	}

	fn reload(&self) {
		self.tickets.refetch();
	}
}

/// Changes a ticket's status, showing the change immediately.
///
/// If the service rejects the change, `alert` is called and the list is loaded again.
pub async fn change_ticket_status<A, S>(api: &A, list: &S, id: TicketId, status: Status, alert: impl FnOnce(&str))
where
	A: TicketApi + ?Sized,
	S: TicketListStorage,
{
	if list.update_pending(|pending| pending.insert(id, status)).is_none() {
		return;
	}
	list.update_tickets(|tickets| set_status(tickets, id, status));

	match api.update_status(id, status).await {
		Ok(update) => {
			let latest = list.update_pending(|pending| pending.settle(id, status)).unwrap_or(false);
			// The service's answer replaces what we showed, unless the user has changed it again since.
			if let (true, Some(confirmed_status)) = (latest, update.status) {
				list.update_tickets(|tickets| set_status(tickets, id, confirmed_status));
			}
		}
		Err(update_error) => {
			error!("Error updating ticket status: {}", update_error);
			list.update_pending(|pending| pending.settle(id, status));
			alert(STATUS_UPDATE_FAILED_MESSAGE);
			list.reload();
		}
	}
}
