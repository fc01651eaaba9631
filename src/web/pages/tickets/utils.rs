// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::TicketAttribute;

/// Makes `(value, label)` pairs for select options of a ticket attribute
pub fn attribute_options<T: TicketAttribute>(values: &[T]) -> Vec<(&'static str, &'static str)> {
	values.iter().map(|value| (value.as_str(), value.label())).collect()
}
