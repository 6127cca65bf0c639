//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Wire names are camelCase to match the web client.

use serde::{Deserialize, Deserializer};

pub mod category;
pub mod overlay_asset;
pub mod overlay_set;
pub mod purchase;
pub mod usage_stat;
pub mod user;

/// Deserialize a clearable field of an update DTO.
///
/// Use with `#[serde(default, deserialize_with = "clearable")]` on an
/// `Option<Option<T>>`: an absent key stays `None` (keep the column), an
/// explicit `null` becomes `Some(None)` (clear it).
pub(crate) fn clearable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
