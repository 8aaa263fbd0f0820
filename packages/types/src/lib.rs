pub use anyhow::{Context, Error, Result, anyhow, bail, ensure};
pub use serde_json::Value;

pub use rand;

pub mod json {
    pub use serde_json::{
        Map, Number, Value, from_slice, from_str, from_value, json, to_string, to_string_pretty,
        to_value, to_vec,
    };
}

/// Collision-resistant id for database rows.
pub fn create_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_url_safe() {
        let a = create_id();
        let b = create_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
