// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the ticket service's REST API.
//!
//! The same client is used from the browser (compiled to WASM) and natively in tests; nothing here
//! depends on which side it runs on.

use crate::model::{Classification, NewTicket, Stats, Status, StatusUpdate, Ticket, TicketFilters, TicketId};
use async_trait::async_trait;
use leptos::logging::warn;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// The API base URL used when `TICKET_API_URL` isn't set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Gets the API base URL this build talks to.
pub fn api_base_url() -> &'static str {
	match option_env!("TICKET_API_URL") {
		Some(url) if !url.is_empty() => url,
		_ => DEFAULT_API_URL,
	}
}

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("ticket service responded with status {status}")]
	UnexpectedStatus { status: u16 },

	#[error("invalid API URL '{url}': {reason}")]
	InvalidUrl { url: String, reason: String },
}

/// The operations the UI performs against the ticket service.
#[async_trait(?Send)]
pub trait TicketApi {
	/// Gets the tickets matching the given filters.
	async fn list_tickets(&self, filters: &TicketFilters) -> Result<Vec<Ticket>, ApiError>;

	/// Sets the status of a single ticket.
	async fn update_status(&self, id: TicketId, status: Status) -> Result<StatusUpdate, ApiError>;

	async fn stats(&self) -> Result<Stats, ApiError>;

	async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ApiError>;

	/// Asks the service to suggest a category and priority for a ticket description.
	async fn classify(&self, description: &str) -> Result<Classification, ApiError>;
}

/// [TicketApi] implementation over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTicketApi {
	client: Client,
	base_url: String,
}

impl HttpTicketApi {
	pub fn new(base_url: &str) -> Self {
		Self {
			client: Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	/// Makes a client for the API base URL this build was configured with.
	pub fn from_env() -> Self {
		Self::new(api_base_url())
	}

	fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
		endpoint_url(&self.base_url, path)
	}
}

#[async_trait(?Send)]
impl TicketApi for HttpTicketApi {
	async fn list_tickets(&self, filters: &TicketFilters) -> Result<Vec<Ticket>, ApiError> {
		let url = tickets_url(&self.base_url, filters)?;
		let tickets: Vec<serde_json::Value> = receive_json(self.client.get(url)).await?;
		Ok(readable_tickets(tickets))
	}

	async fn update_status(&self, id: TicketId, status: Status) -> Result<StatusUpdate, ApiError> {
		#[derive(Serialize)]
		struct StatusBody {
			status: Status,
		}

		let url = self.endpoint(&format!("/api/tickets/{}/", id))?;
		let response = send(self.client.patch(url).json(&StatusBody { status })).await?;

		// The response body only refines the optimistic state, so a body we can't read isn't a failure.
		let body = response.text().await.unwrap_or_default();
		Ok(serde_json::from_str(&body).unwrap_or_default())
	}

	async fn stats(&self) -> Result<Stats, ApiError> {
		let url = self.endpoint("/api/tickets/stats/")?;
		receive_json(self.client.get(url)).await
	}

	async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ApiError> {
		let url = self.endpoint("/api/tickets/")?;
		receive_json(self.client.post(url).json(ticket)).await
	}

	async fn classify(&self, description: &str) -> Result<Classification, ApiError> {
		#[derive(Serialize)]
		struct ClassifyBody<'a> {
			description: &'a str,
		}

		let url = self.endpoint("/api/tickets/classify/")?;
		receive_json(self.client.post(url).json(&ClassifyBody { description })).await
	}
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
	let response = request.send().await?;
	let status = response.status();
	if !status.is_success() {
		return Err(ApiError::UnexpectedStatus {
			status: status.as_u16(),
		});
	}
	Ok(response)
}

async fn receive_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
	let response = send(request).await?;
	Ok(response.json().await?)
}

fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ApiError> {
	let url = format!("{}{}", base_url.trim_end_matches('/'), path);
	Url::parse(&url).map_err(|error| ApiError::InvalidUrl {
		url,
		reason: error.to_string(),
	})
}

/// Reads each ticket of a list on its own, so one ticket the UI can't understand doesn't hide the
/// rest. Tickets that can't be read are logged and left out.
pub fn readable_tickets(tickets: Vec<serde_json::Value>) -> Vec<Ticket> {
	tickets
		.into_iter()
		.filter_map(|ticket| match serde_json::from_value(ticket) {
			Ok(ticket) => Some(ticket),
			Err(parse_error) => {
				warn!("Skipping ticket that couldn't be read: {}", parse_error);
				None
			}
		})
		.collect()
}

/// Builds the ticket list URL. Filters that aren't set are left out of the query string entirely.
pub fn tickets_url(base_url: &str, filters: &TicketFilters) -> Result<Url, ApiError> {
	let mut url = endpoint_url(base_url, "/api/tickets/")?;
	let pairs = filters.query_pairs();
	if !pairs.is_empty() {
		url.query_pairs_mut().extend_pairs(pairs);
	}
	Ok(url)
}

#[cfg(test)]
pub(crate) mod fake {
	use super::{ApiError, TicketApi};
	use crate::model::{
		Category, Classification, NewTicket, Priority, Stats, Status, StatusUpdate, Ticket, TicketFilters, TicketId,
	};
	use async_trait::async_trait;
	use chrono::{TimeZone, Utc};
	use std::cell::{Cell, RefCell};

	#[derive(Clone, Debug, PartialEq)]
	pub enum ApiCall {
		List(TicketFilters),
		UpdateStatus(TicketId, Status),
		Stats,
		Create(NewTicket),
		Classify(String),
	}

	/// In-memory stand-in for the ticket service that records every call made to it.
	#[derive(Default)]
	pub struct FakeTicketApi {
		pub tickets: RefCell<Vec<Ticket>>,
		pub stats: RefCell<Option<Stats>>,
		pub classification: Cell<Classification>,
		pub fail_lists: Cell<bool>,
		pub fail_updates: Cell<bool>,
		pub fail_creates: Cell<bool>,
		pub echo_status: Cell<Option<Status>>,
		pub calls: RefCell<Vec<ApiCall>>,
	}

	impl FakeTicketApi {
		pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
			Self {
				tickets: RefCell::new(tickets),
				..Self::default()
			}
		}

		pub fn calls(&self) -> Vec<ApiCall> {
			self.calls.borrow().clone()
		}

		fn record(&self, call: ApiCall) {
			self.calls.borrow_mut().push(call);
		}
	}

	/// Lets spawned resource loads run until they finish.
	#[cfg(not(feature = "ssr"))]
	pub async fn settle() {
		for _ in 0..8 {
			leptos::task::tick().await;
		}
	}

	pub fn server_error() -> ApiError {
		ApiError::UnexpectedStatus { status: 500 }
	}

	pub fn ticket(id: TicketId, status: Status) -> Ticket {
		Ticket {
			id,
			title: format!("Ticket {}", id),
			description: String::from("Something is broken"),
			category: Category::Technical,
			priority: Priority::Medium,
			status,
			created_at: Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap(),
		}
	}

	#[async_trait(?Send)]
	impl TicketApi for FakeTicketApi {
		async fn list_tickets(&self, filters: &TicketFilters) -> Result<Vec<Ticket>, ApiError> {
			self.record(ApiCall::List(filters.clone()));
			if self.fail_lists.get() {
				return Err(server_error());
			}
			Ok(self.tickets.borrow().clone())
		}

		async fn update_status(&self, id: TicketId, status: Status) -> Result<StatusUpdate, ApiError> {
			self.record(ApiCall::UpdateStatus(id, status));
			if self.fail_updates.get() {
				return Err(server_error());
			}
			for ticket in self.tickets.borrow_mut().iter_mut().filter(|ticket| ticket.id == id) {
				ticket.status = status;
			}
			Ok(StatusUpdate {
				status: self.echo_status.get(),
			})
		}

		async fn stats(&self) -> Result<Stats, ApiError> {
			self.record(ApiCall::Stats);
			self.stats.borrow().clone().ok_or_else(server_error)
		}

		async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ApiError> {
			self.record(ApiCall::Create(ticket.clone()));
			if self.fail_creates.get() {
				return Err(server_error());
			}
			let mut tickets = self.tickets.borrow_mut();
			let created = Ticket {
				id: tickets.len() as TicketId + 1,
				title: ticket.title.clone(),
				description: ticket.description.clone(),
				category: ticket.category,
				priority: ticket.priority,
				status: Status::Open,
				created_at: Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap(),
			};
			tickets.push(created.clone());
			Ok(created)
		}

		async fn classify(&self, description: &str) -> Result<Classification, ApiError> {
			self.record(ApiCall::Classify(description.to_string()));
			Ok(self.classification.get())
		}
	}
}
