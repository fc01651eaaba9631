// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::api::TicketApi;
use leptos::prelude::*;
use std::rc::Rc;

/// Handle to the ticket service client shared by every view on the page.
///
/// The page root provides it as context, so all views send their requests through one client. The
/// client itself stays on the thread that created it.
#[derive(Clone, Copy)]
pub struct TicketService(StoredValue<Rc<dyn TicketApi>, LocalStorage>);

impl TicketService {
	/// Stores the client and provides the handle to the current owner and its children.
	pub fn provide(api: Rc<dyn TicketApi>) -> Self {
		let service = Self(StoredValue::new_local(api));
		provide_context(service);
		service
	}

	pub fn api(&self) -> Rc<dyn TicketApi> {
		self.0.get_value()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::web::api::fake::{ApiCall, FakeTicketApi};

	#[tokio::test]
	async fn views_share_the_provided_client() {
		let owner = Owner::new();
		owner.set();

		let api = Rc::new(FakeTicketApi::default());
		TicketService::provide(api.clone());

		let service: TicketService = expect_context();
		let _ = service.api().stats().await;
		let _ = expect_context::<TicketService>().api().stats().await;

		assert_eq!(api.calls(), vec![ApiCall::Stats, ApiCall::Stats]);
	}
}
