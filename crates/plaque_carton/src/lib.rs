//! Carton - The curator's toolbox for Plaque.
//!
//! This crate provides the small shared utilities the documentation pipeline
//! and the command-line front end both lean on, much like a carton (artist's
//! portfolio case) holds the tools an artist carries from room to room.
//!
//! # Modules
//!
//! - **case**: kebab-case conversion used for slugs and CSS custom properties
//! - **naming**: collision-free name allocation with numeric suffixes
//! - **hash**: content hashing for change detection
//!
//! # Example
//!
//! ```
//! use plaque_carton::{kebab_case, NameRegistry};
//!
//! let mut names = NameRegistry::default();
//! assert_eq!(names.claim(&kebab_case("Primary Button")), "primary-button");
//! assert_eq!(names.claim("primary-button"), "primary-button-2");
//! ```

pub mod case;
pub mod general;
pub mod hash;
pub mod naming;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

/// String-keyed map that keeps insertion order, including through serde.
pub type OrderedMap<V> = indexmap::IndexMap<String, V, FxBuildHasher>;

// Re-export shared utilities
pub use case::*;
pub use general::*;
pub use hash::{content_hash, hash_str};
pub use naming::NameRegistry;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_map_keeps_document_order() {
        let map: OrderedMap<u32> =
            serde_json::from_str(r#"{ "zeta": 1, "alpha": 2, "mid": 3 }"#).unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }
}
