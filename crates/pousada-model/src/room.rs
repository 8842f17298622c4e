// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// A catalog room, annotated with its full resolved feature-name list.
/// Seeded at initialization time and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub capacity: u32,
    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_rooms: u64,
    pub limit: u32,
}

impl Pagination {
    /// Builds the pagination envelope for a filtered result of `total_rooms`
    /// records. A result set that fits in one page always reports exactly one
    /// total page, i.e. `total_pages = max(1, ceil(total_rooms / limit))`.
    #[must_use]
    pub fn for_total(total_rooms: u64, current_page: u32, limit: u32) -> Self {
        let total_pages = if total_rooms <= u64::from(limit) {
            1
        } else {
            total_rooms
                .div_ceil(u64::from(limit.max(1)))
                .try_into()
                .unwrap_or(u32::MAX)
        };
        Self {
            current_page,
            total_pages,
            total_rooms,
            limit,
        }
    }
}
