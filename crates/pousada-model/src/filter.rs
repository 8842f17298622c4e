// SPDX-License-Identifier: Apache-2.0

use crate::feature::FeatureKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Sort column for a room search. `None` falls back to `id` ascending, which
/// keeps the default ordering deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    None,
    Name,
    Price,
    Capacity,
}

impl OrderBy {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "name" => Self::Name,
            "price" => Self::Price,
            "capacity" => Self::Capacity,
            _ => Self::None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Name => "name",
            Self::Price => "price",
            Self::Capacity => "capacity",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl Display for OrderDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The typed FilterParameters record. Every predicate is optional and
/// AND-combined; `features` carries only the amenities requested as true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomFilter {
    pub name: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub capacity: Option<u32>,
    pub features: BTreeSet<FeatureKey>,
    pub favorite_only: bool,
    pub order_by: OrderBy,
    pub direction: OrderDirection,
    /// 1-based page index.
    pub page: u32,
    pub limit: u32,
}

impl Default for RoomFilter {
    fn default() -> Self {
        Self {
            name: None,
            price_min: None,
            price_max: None,
            capacity: None,
            features: BTreeSet::new(),
            favorite_only: false,
            order_by: OrderBy::None,
            direction: OrderDirection::Asc,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl RoomFilter {
    /// True when every field still holds its initial value.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
