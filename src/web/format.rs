// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, TimeZone, Utc};
use std::borrow::Cow;
use std::fmt::Display;

/// Number of characters of a description shown on a ticket card.
pub const DESCRIPTION_PREVIEW_LENGTH: usize = 100;

/// Cuts a description down to [DESCRIPTION_PREVIEW_LENGTH] characters, marking the cut with `...`.
/// The cut is made at exactly that character, regardless of word boundaries.
pub fn truncate_description(description: &str) -> Cow<'_, str> {
	match description.char_indices().nth(DESCRIPTION_PREVIEW_LENGTH) {
		Some((cut, _)) => Cow::Owned(format!("{}...", &description[..cut])),
		None => Cow::Borrowed(description),
	}
}

/// Formats the date a ticket was created in the given time zone.
pub fn format_created_date<Tz>(created_at: &DateTime<Utc>, time_zone: &Tz) -> String
where
	Tz: TimeZone,
	Tz::Offset: Display,
{
	created_at.with_timezone(time_zone).format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::FixedOffset;

	#[test]
	fn short_descriptions_are_unchanged() {
		assert_eq!(truncate_description("Printer on fire"), "Printer on fire");
		let exact = "x".repeat(DESCRIPTION_PREVIEW_LENGTH);
		assert_eq!(truncate_description(&exact), exact.as_str());
		assert!(matches!(truncate_description(&exact), Cow::Borrowed(_)));
	}

	#[test]
	fn long_descriptions_are_cut_at_the_limit() {
		let long = "y".repeat(DESCRIPTION_PREVIEW_LENGTH + 1);
		let expected = format!("{}...", "y".repeat(DESCRIPTION_PREVIEW_LENGTH));
		assert_eq!(truncate_description(&long), expected.as_str());
	}

	#[test]
	fn cut_ignores_word_boundaries() {
		let words = "word ".repeat(30);
		let truncated = truncate_description(&words);
		assert_eq!(truncated.chars().count(), DESCRIPTION_PREVIEW_LENGTH + 3);
		assert!(truncated.starts_with(&words[..DESCRIPTION_PREVIEW_LENGTH]));
	}

	#[test]
	fn cut_counts_characters_not_bytes() {
		let accented = "é".repeat(DESCRIPTION_PREVIEW_LENGTH + 5);
		let truncated = truncate_description(&accented);
		assert_eq!(truncated, format!("{}...", "é".repeat(DESCRIPTION_PREVIEW_LENGTH)));
	}

	#[test]
	fn created_date_uses_time_zone() {
		let created_at = Utc.with_ymd_and_hms(2025, 1, 15, 23, 30, 0).unwrap();
		assert_eq!(format_created_date(&created_at, &Utc), "1/15/2025");
		let ahead = FixedOffset::east_opt(2 * 3600).unwrap();
		assert_eq!(format_created_date(&created_at, &ahead), "1/16/2025");
	}
}
