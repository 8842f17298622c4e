// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fixed amenity enumeration. The variant keys are the query-string spelling
/// used on the wire and in the URL; the labels are the display names stored
/// in the `features` table. Not user-editable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKey {
    Wifi,
    Ac,
    Varanda,
    Piscina,
    #[serde(rename = "vistaMar")]
    VistaMar,
    Cozinha,
    Banheira,
    Lareira,
    Cafe,
}

/// All feature keys in their canonical serialization order.
pub const FEATURE_KEYS: [FeatureKey; 9] = [
    FeatureKey::Wifi,
    FeatureKey::Ac,
    FeatureKey::Varanda,
    FeatureKey::Piscina,
    FeatureKey::VistaMar,
    FeatureKey::Cozinha,
    FeatureKey::Banheira,
    FeatureKey::Lareira,
    FeatureKey::Cafe,
];

impl FeatureKey {
    /// Parses a query-string key. Unrecognized keys yield `None` and are
    /// ignored by callers.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "wifi" => Some(Self::Wifi),
            "ac" => Some(Self::Ac),
            "varanda" => Some(Self::Varanda),
            "piscina" => Some(Self::Piscina),
            "vistaMar" => Some(Self::VistaMar),
            "cozinha" => Some(Self::Cozinha),
            "banheira" => Some(Self::Banheira),
            "lareira" => Some(Self::Lareira),
            "cafe" => Some(Self::Cafe),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wifi => "wifi",
            Self::Ac => "ac",
            Self::Varanda => "varanda",
            Self::Piscina => "piscina",
            Self::VistaMar => "vistaMar",
            Self::Cozinha => "cozinha",
            Self::Banheira => "banheira",
            Self::Lareira => "lareira",
            Self::Cafe => "cafe",
        }
    }

    /// Display label as stored in the `features` table.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wifi => "Wi-Fi",
            Self::Ac => "Ar-condicionado",
            Self::Varanda => "Varanda",
            Self::Piscina => "Piscina Privativa",
            Self::VistaMar => "Vista para o Mar",
            Self::Cozinha => "Cozinha Compacta",
            Self::Banheira => "Banheira",
            Self::Lareira => "Lareira",
            Self::Cafe => "Café da Manhã",
        }
    }
}

impl Display for FeatureKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
