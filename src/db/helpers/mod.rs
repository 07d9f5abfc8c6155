use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use serde::{de::DeserializeOwned, Serialize};

pub fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

pub fn to_u64(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("{field} contains negative value {value}"))
}

/// Nested collections (profile points, photos) live in TEXT columns as JSON.
pub fn to_json<T: Serialize>(value: &T, field: &str) -> Result<String> {
    serde_json::to_string(value).with_context(|| format!("failed to encode {field}"))
}

pub fn from_json<T: DeserializeOwned>(raw: &str, field: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("failed to parse {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Photo;

    #[test]
    fn rejects_out_of_range_integers() {
        assert!(to_i64(u64::MAX).is_err());
        assert_eq!(to_i64(42).unwrap(), 42);
        assert!(to_u64(-1, "duration_sec").is_err());
    }

    #[test]
    fn json_columns_round_trip_photos() {
        let photos = vec![Photo {
            uri: "file:///ridge.jpg".into(),
            timestamp: 7,
        }];
        let raw = to_json(&photos, "photos").unwrap();
        assert!(raw.contains("\"uri\""));
        let back: Vec<Photo> = from_json(&raw, "photos").unwrap();
        assert_eq!(back, photos);
        assert!(from_json::<Vec<Photo>>("not json", "photos").is_err());
    }
}
