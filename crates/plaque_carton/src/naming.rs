//! Collision-free name allocation.
//!
//! A [`NameRegistry`] is a short-lived context object: create one per batch,
//! claim names through it, and drop it when the batch is done. Nothing is
//! shared between registries.

use rustc_hash::FxHashSet;

/// Tracks names already handed out and derives free variants on collision.
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    taken: FxHashSet<String>,
}

impl NameRegistry {
    /// Create an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has already been claimed.
    #[inline]
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Claim `base`, or the first free `base-2`, `base-3`, ... when taken.
    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }

        let mut n = 2usize;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Number of names claimed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Whether nothing has been claimed yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_suffixes() {
        let mut names = NameRegistry::new();
        assert_eq!(names.claim("label"), "label");
        assert_eq!(names.claim("label"), "label-2");
        assert_eq!(names.claim("label"), "label-3");
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_claim_skips_existing_suffix() {
        let mut names = NameRegistry::new();
        names.claim("label-2");
        names.claim("label");
        assert_eq!(names.claim("label"), "label-3");
        assert!(names.is_taken("label-2"));
    }
}
