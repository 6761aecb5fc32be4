use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` the same as a missing key.
///
/// The profile endpoint sends `null` for anything the user never filled in,
/// nested objects and plain text fields alike.
pub mod null_as_default {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
