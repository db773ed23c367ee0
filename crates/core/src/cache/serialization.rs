//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! Cache values are stored as JSON so they stay human-readable when
//! debugging a live cache.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CacheError, Result};

/// Serializes a value to JSON bytes for cache storage.
pub fn to_cache_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes JSON bytes read back from the cache.
pub fn from_cache_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{City, Venue};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn fixed_timestamp() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_round_trip_city() {
        let city = City::new("Madrid", "madrid")
            .with_id(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap())
            .with_updated_at(fixed_timestamp());

        let bytes = to_cache_bytes(&city).expect("serialize should succeed");
        let back: City = from_cache_bytes(&bytes).expect("deserialize should succeed");

        assert_eq!(city, back);
    }

    #[test]
    fn test_round_trip_venue_vec() {
        let city_id = Uuid::new_v4();
        let venues = vec![
            Venue::new(city_id, "La Tasca", "la-tasca", "Calle Mayor 1")
                .with_updated_at(fixed_timestamp()),
            Venue::new(city_id, "Casa Paco", "casa-paco", "Plaza Real 2")
                .with_updated_at(fixed_timestamp()),
        ];

        let bytes = to_cache_bytes(&venues).expect("serialize should succeed");
        let back: Vec<Venue> = from_cache_bytes(&bytes).expect("deserialize should succeed");

        assert_eq!(venues, back);
    }

    #[test]
    fn test_malformed_bytes_error() {
        let result: Result<City> = from_cache_bytes(b"not valid json");
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_empty_vec_serializes_to_json_array() {
        let venues: Vec<Venue> = vec![];
        let bytes = to_cache_bytes(&venues).expect("serialize should succeed");
        assert_eq!(bytes, b"[]");
    }
}
