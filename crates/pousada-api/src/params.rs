// SPDX-License-Identifier: Apache-2.0

use pousada_model::{
    FeatureKey, OrderBy, OrderDirection, RoomFilter, DEFAULT_LIMIT, DEFAULT_PAGE,
};
use std::collections::BTreeMap;

/// Hard ceiling on the page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Parses raw query parameters into a typed filter.
///
/// All parameters are optional. Malformed numeric values are dropped rather
/// than rejected, feature flags require the literal string `"true"`, and
/// unrecognized keys are ignored entirely. `page` and `limit` fall back to
/// their defaults when absent, zero or unparseable.
#[must_use]
pub fn parse_room_query(query: &BTreeMap<String, String>) -> RoomFilter {
    let mut filter = RoomFilter::default();

    if let Some(name) = query.get("name") {
        if !name.is_empty() {
            filter.name = Some(name.clone());
        }
    }
    filter.price_min = query.get("priceMin").and_then(|raw| parse_price(raw));
    filter.price_max = query.get("priceMax").and_then(|raw| parse_price(raw));
    filter.capacity = query
        .get("capacity")
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|v| *v > 0);

    for (key, value) in query {
        if let Some(feature) = FeatureKey::parse(key) {
            if value == "true" {
                filter.features.insert(feature);
            }
        }
    }

    filter.favorite_only = query
        .get("favoriteOnly")
        .is_some_and(|v| v == "true");

    if let Some(raw) = query.get("orderBy") {
        filter.order_by = OrderBy::parse(raw);
    }
    if filter.order_by != OrderBy::None {
        if let Some(raw) = query.get("orderDirection") {
            filter.direction = OrderDirection::parse(raw);
        }
    }

    filter.page = query
        .get("page")
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_PAGE);
    filter.limit = query
        .get("limit")
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT);

    filter
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}
