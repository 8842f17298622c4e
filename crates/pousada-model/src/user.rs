// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Public user identity. The password hash never leaves the storage layer
/// and is deliberately absent from this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}
