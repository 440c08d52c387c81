pub mod gig;
pub mod session;
pub mod set;
pub mod set_item;
pub mod track;
pub mod usage;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Deserialize a field into `Some(value)` even when the JSON value is `null`.
///
/// Combined with `#[serde(default)]` this gives tri-state PATCH semantics:
/// absent -> `None` (leave unchanged), `null` -> `Some(None)` (clear),
/// value -> `Some(Some(v))` (replace).
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
