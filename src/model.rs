// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, NaiveDateTime, Utc};
use reactive_stores::Store;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub type TicketId = u64;

/// A ticket as returned by the ticket service.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ticket {
	pub id: TicketId,
	pub title: String,
	pub description: String,
	pub category: Category,
	pub priority: Priority,
	pub status: Status,
	#[serde(deserialize_with = "deserialize_timestamp")]
	pub created_at: DateTime<Utc>,
}

/// Reads a timestamp with or without a UTC offset. One without an offset is taken to be in UTC.
fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
	let value = String::deserialize(deserializer)?;
	parse_timestamp(&value).map_err(serde::de::Error::custom)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
	match DateTime::parse_from_rfc3339(value) {
		Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
		Err(_) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|timestamp| timestamp.and_utc()),
	}
}

/// Shared behavior of the fixed-choice ticket attributes (category, priority, status).
pub trait TicketAttribute: Copy + Sized + 'static {
	/// Every value, in display order.
	const ALL: &'static [Self];

	/// The wire value, as sent to and received from the ticket service.
	fn as_str(self) -> &'static str;

	/// The human-readable name used in selects.
	fn label(self) -> &'static str;
}

/// Returned when a string doesn't name a value of a ticket attribute.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown {attribute} value '{value}'")]
pub struct UnknownAttributeValue {
	pub attribute: &'static str,
	pub value: String,
}

fn parse_attribute<T: TicketAttribute>(attribute: &'static str, value: &str) -> Result<T, UnknownAttributeValue> {
	T::ALL
		.iter()
		.copied()
		.find(|candidate| candidate.as_str() == value)
		.ok_or_else(|| UnknownAttributeValue {
			attribute,
			value: value.to_string(),
		})
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	Billing,
	Technical,
	Account,
	#[default]
	General,
}

impl TicketAttribute for Category {
	const ALL: &'static [Self] = &[Self::Billing, Self::Technical, Self::Account, Self::General];

	fn as_str(self) -> &'static str {
		match self {
			Self::Billing => "billing",
			Self::Technical => "technical",
			Self::Account => "account",
			Self::General => "general",
		}
	}

	fn label(self) -> &'static str {
		match self {
			Self::Billing => "Billing",
			Self::Technical => "Technical",
			Self::Account => "Account",
			Self::General => "General",
		}
	}
}

impl FromStr for Category {
	type Err = UnknownAttributeValue;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		parse_attribute("category", value)
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
	Low,
	#[default]
	Medium,
	High,
	Critical,
}

impl TicketAttribute for Priority {
	const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];

	fn as_str(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
			Self::Critical => "critical",
		}
	}

	fn label(self) -> &'static str {
		match self {
			Self::Low => "Low",
			Self::Medium => "Medium",
			Self::High => "High",
			Self::Critical => "Critical",
		}
	}
}

impl FromStr for Priority {
	type Err = UnknownAttributeValue;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		parse_attribute("priority", value)
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
	Open,
	InProgress,
	Resolved,
	Closed,
}

impl Status {
	/// Text for the status badge on a ticket card
	pub fn badge_text(self) -> String {
		self.as_str().replace('_', " ")
	}
}

impl TicketAttribute for Status {
	const ALL: &'static [Self] = &[Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

	fn as_str(self) -> &'static str {
		match self {
			Self::Open => "open",
			Self::InProgress => "in_progress",
			Self::Resolved => "resolved",
			Self::Closed => "closed",
		}
	}

	fn label(self) -> &'static str {
		match self {
			Self::Open => "Open",
			Self::InProgress => "In Progress",
			Self::Resolved => "Resolved",
			Self::Closed => "Closed",
		}
	}
}

impl FromStr for Status {
	type Err = UnknownAttributeValue;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		parse_attribute("status", value)
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The filters applied to the ticket list.
///
/// Each field holds the raw input value; an empty string means the filter isn't applied.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, Store)]
pub struct TicketFilters {
	pub category: String,
	pub priority: String,
	pub status: String,
	pub search: String,
}

impl TicketFilters {
	/// The filters that are set, as query parameter pairs in a fixed order.
	pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
		[
			("category", self.category.as_str()),
			("priority", self.priority.as_str()),
			("status", self.status.as_str()),
			("search", self.search.as_str()),
		]
		.into_iter()
		.filter(|(_, value)| !value.is_empty())
		.collect()
	}
}

/// Aggregate counters computed by the ticket service.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Stats {
	pub total_tickets: u64,
	pub open_tickets: u64,
	pub avg_tickets_per_day: f64,
	pub priority_breakdown: Breakdown,
	pub category_breakdown: Breakdown,
}

/// Ticket counts per attribute value, in the order the service sent them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Breakdown(Vec<(String, u64)>);

impl Breakdown {
	pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
		self.0.iter().map(|(key, count)| (key.as_str(), *count))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<(String, u64)> for Breakdown {
	fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl Serialize for Breakdown {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_map(self.0.iter().map(|(key, count)| (key, count)))
	}
}

impl<'de> Deserialize<'de> for Breakdown {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct BreakdownVisitor;

		impl<'de> Visitor<'de> for BreakdownVisitor {
			type Value = Breakdown;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("a map of names to counts")
			}

			fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
				let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
				while let Some(entry) = map.next_entry::<String, u64>()? {
					entries.push(entry);
				}
				Ok(Breakdown(entries))
			}
		}

		deserializer.deserialize_map(BreakdownVisitor)
	}
}

/// The body of a ticket creation request.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewTicket {
	pub title: String,
	pub description: String,
	pub category: Category,
	pub priority: Priority,
}

/// The service's suggestion for how a ticket description should be filed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Classification {
	pub suggested_category: Option<Category>,
	pub suggested_priority: Option<Priority>,
}

/// Whatever a status update response tells us about the ticket's new status.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct StatusUpdate {
	#[serde(default)]
	pub status: Option<Status>,
}
