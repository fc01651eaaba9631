// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::errors::not_found::NotFound;
use super::header::PageHeader;
use super::stats::StatsDashboard;
use super::tickets::{TicketForm, TicketList};
use crate::web::api::HttpTicketApi;
use crate::web::refresh::RefreshSignal;
use crate::web::service::TicketService;
use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Stylesheet href="/pkg/ticket-desk.css" />
		<Title text="Support Ticket System" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=TicketDesk />
			</Routes>
		</Router>
	}
}

/// The ticket desk page. Creating a ticket refreshes both the dashboard and the list.
#[component]
fn TicketDesk() -> impl IntoView {
	TicketService::provide(Rc::new(HttpTicketApi::from_env()));
	let refresh = RefreshSignal::new();
	let on_ticket_created = Callback::new(move |()| refresh.notify());

	view! {
		<div class="container">
			<PageHeader />
			<main>
				<TicketForm on_ticket_created />
				<hr class="divider" />
				<StatsDashboard refresh />
				<TicketList refresh />
			</main>
		</div>
	}
}

#[cfg(all(test, not(feature = "ssr")))]
mod tests {
	use super::*;
	use crate::model::{Status, TicketFilters};
	use crate::web::api::fake::{ApiCall, FakeTicketApi, settle, ticket};
	use crate::web::stats::tests::sample_stats;
	use any_spawner::Executor;
	use tokio::task::LocalSet;

	fn count_calls(api: &FakeTicketApi) -> (usize, usize) {
		let calls = api.calls();
		let stats = calls.iter().filter(|call| matches!(call, ApiCall::Stats)).count();
		let lists = calls.iter().filter(|call| matches!(call, ApiCall::List(_))).count();
		(stats, lists)
	}

	#[tokio::test]
	async fn refresh_fetches_stats_and_list_once_each() {
		_ = Executor::init_tokio();
		let owner = Owner::new();
		owner.set();

		LocalSet::new()
			.run_until(async {
				let api = Rc::new(FakeTicketApi::with_tickets(vec![ticket(1, Status::Open)]));
				*api.stats.borrow_mut() = Some(sample_stats(1));
				TicketService::provide(api.clone());
				let refresh = RefreshSignal::new();

				let _dashboard = view! {
					<StatsDashboard refresh />
					<TicketList refresh />
				};
				settle().await;
				assert_eq!(count_calls(&api), (1, 1));

				refresh.notify();
				settle().await;
				assert_eq!(count_calls(&api), (2, 2));
				assert!(api.calls().contains(&ApiCall::List(TicketFilters::default())));
			})
			.await;
	}
}
