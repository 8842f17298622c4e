// SPDX-License-Identifier: Apache-2.0

use pousada_model::{OrderBy, RoomFilter, DEFAULT_LIMIT, DEFAULT_PAGE, FEATURE_KEYS};
use std::collections::BTreeMap;
use std::fmt::Write;

/// The canonical serialization of a filter: fixed key order, defaults
/// omitted. This one string is both the response cache key and the URL query
/// string content, which keeps the two representations in lockstep by
/// construction. Two logically identical requests always map to the same
/// cache key regardless of how the caller ordered its query parameters.
///
/// Omission rules: empty/absent fields are skipped, feature keys appear only
/// when requested, `favoriteOnly` only when true, `orderBy`/`orderDirection`
/// only together and only when a sort column is set, `page` when it is not 1
/// and `limit` when it is not 10.
///
/// The delimiter characters `%`, `&` and `=` are percent-escaped inside
/// values, so a literal `&` in a name can never read as a pair separator and
/// two distinct filters can never share a signature.
#[must_use]
pub fn canonical_query(filter: &RoomFilter) -> String {
    let mut out = String::new();
    if let Some(name) = &filter.name {
        if !name.is_empty() {
            push_pair(&mut out, "name", name);
        }
    }
    if let Some(min) = filter.price_min {
        push_pair(&mut out, "priceMin", &format_number(min));
    }
    if let Some(max) = filter.price_max {
        push_pair(&mut out, "priceMax", &format_number(max));
    }
    if let Some(capacity) = filter.capacity {
        push_pair(&mut out, "capacity", &capacity.to_string());
    }
    for key in FEATURE_KEYS {
        if filter.features.contains(&key) {
            push_pair(&mut out, key.as_str(), "true");
        }
    }
    if filter.favorite_only {
        push_pair(&mut out, "favoriteOnly", "true");
    }
    if filter.order_by != OrderBy::None {
        push_pair(&mut out, "orderBy", filter.order_by.as_str());
        push_pair(&mut out, "orderDirection", filter.direction.as_str());
    }
    if filter.page != DEFAULT_PAGE {
        push_pair(&mut out, "page", &filter.page.to_string());
    }
    if filter.limit != DEFAULT_LIMIT {
        push_pair(&mut out, "limit", &filter.limit.to_string());
    }
    out
}

/// Splits a raw query string into key/value pairs and percent-decodes each
/// side. Duplicate keys keep the last occurrence; pairs without `=` are
/// treated as empty values; malformed escape sequences pass through as
/// literals.
#[must_use]
pub fn parse_query_pairs(query: &str) -> BTreeMap<String, String> {
    let trimmed = query.strip_prefix('?').unwrap_or(query);
    let mut pairs = BTreeMap::new();
    for piece in trimmed.split('&') {
        if piece.is_empty() {
            continue;
        }
        match piece.split_once('=') {
            Some((key, value)) => pairs.insert(percent_decode(key), percent_decode(value)),
            None => pairs.insert(percent_decode(piece), String::new()),
        };
    }
    pairs
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    let _ = write!(out, "{key}={}", escape_component(value));
}

fn escape_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn format_number(value: f64) -> String {
    // f64 Display is shortest-round-trip, so "100" stays "100".
    format!("{value}")
}
