//! # Reactive Cells
//!
//! Records expose derived attributes (rendered previews, formatted dates,
//! tag weights) that must stay consistent with the fields they are computed
//! from. Rather than recomputing on every read, or caching once and going
//! stale, each derived value is paired with the versioned cell it depends on:
//!
//! - [`Source<T>`] is a writable cell. Every write bumps its version.
//! - [`Derived<T>`] caches a computed value stamped with the source version
//!   it was computed from, and recomputes only when the stamp is stale.
//!
//! The guarantee: a derived value recomputes exactly when its source has
//! been written since the last read. This is the only consistency contract
//! the data layer makes.

use std::cell::RefCell;

/// A writable field with a version counter.
#[derive(Debug, Clone)]
pub struct Source<T> {
    value: T,
    version: u64,
}

impl<T> Source<T> {
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Write a new value, invalidating every derived cell stamped against
    /// the previous version.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.version += 1;
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

impl<T: PartialEq> Source<T> {
    /// Write only when the value actually differs, so merges from a
    /// re-fetch don't invalidate derived values spuriously.
    pub fn set_if_changed(&mut self, value: T) {
        if self.value != value {
            self.set(value);
        }
    }
}

/// A cached value computed from a [`Source`], recomputed when stale.
#[derive(Debug, Default)]
pub struct Derived<T> {
    cached: RefCell<Option<(u64, T)>>,
}

impl<T: Clone> Derived<T> {
    pub fn new() -> Self {
        Self {
            cached: RefCell::new(None),
        }
    }

    /// Return the cached value if it was computed from the source's current
    /// version; otherwise recompute, restamp, and return it.
    pub fn get<S>(&self, source: &Source<S>, compute: impl FnOnce(&S) -> T) -> T {
        let mut slot = self.cached.borrow_mut();
        if let Some((stamp, value)) = slot.as_ref() {
            if *stamp == source.version() {
                return value.clone();
            }
        }
        let value = compute(source.get());
        *slot = Some((source.version(), value.clone()));
        value
    }
}

impl<T: Clone> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            cached: RefCell::new(self.cached.borrow().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_computes_on_first_read() {
        let source = Source::new(3);
        let derived = Derived::new();
        assert_eq!(derived.get(&source, |n| n * 2), 6);
    }

    #[test]
    fn test_derived_caches_until_write() {
        let source = Source::new("hi".to_string());
        let derived = Derived::new();
        let mut calls = 0;
        for _ in 0..3 {
            derived.get(&source, |s| {
                calls += 1;
                s.to_uppercase()
            });
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_write_invalidates() {
        let mut source = Source::new(1);
        let derived = Derived::new();
        assert_eq!(derived.get(&source, |n| n + 1), 2);
        source.set(10);
        assert_eq!(derived.get(&source, |n| n + 1), 11);
    }

    #[test]
    fn test_write_recomputes_even_with_equal_value() {
        let mut source = Source::new(5);
        let derived = Derived::new();
        let mut calls = 0;
        derived.get(&source, |n| {
            calls += 1;
            *n
        });
        // A plain set is a write, whether or not the value changed.
        source.set(5);
        derived.get(&source, |n| {
            calls += 1;
            *n
        });
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_set_if_changed_skips_equal_value() {
        let mut source = Source::new(5);
        let before = source.version();
        source.set_if_changed(5);
        assert_eq!(source.version(), before);
        source.set_if_changed(6);
        assert_eq!(source.version(), before + 1);
    }
}
