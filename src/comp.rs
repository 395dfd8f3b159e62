//! Tools for comparing sort keys
//!
//! The order is by domain, then port, scheme, path, query and fragment.
//! Strings compare byte by byte, and a missing port is less than any port.
//!
//! ```
//! use urlsort::comp::Comp;
//! use urlsort::key::KeyMaker;
//! use urlsort::port::StaticServices;
//! use std::cmp::Ordering;
//! let maker = KeyMaker::with_services(StaticServices::empty());
//! let a = maker.extract("http://example.com:80");
//! let b = maker.extract("https://example.com");
//! assert_eq!(Comp::new().comp(&a, &b), Ordering::Less);
//! assert_eq!(Comp::reversed().comp(&a, &b), Ordering::Greater);
//! ```

use crate::key::SortKey;
use std::cmp::Ordering;

/// Compare two keys, field by field
pub fn comp_keys(left: &SortKey, right: &SortKey) -> Ordering {
    left.domain
        .cmp(&right.domain)
        .then_with(|| left.port.cmp(&right.port))
        .then_with(|| left.scheme.cmp(&right.scheme))
        .then_with(|| left.path.cmp(&right.path))
        .then_with(|| left.query.cmp(&right.query))
        .then_with(|| left.fragment.cmp(&right.fragment))
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        comp_keys(self, other)
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Settings for comparing keys
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Comp {
    /// reverse comparison?
    pub reverse: bool,
}

impl Comp {
    /// new, ascending
    #[must_use]
    pub const fn new() -> Self {
        Self { reverse: false }
    }
    /// new, descending
    #[must_use]
    pub const fn reversed() -> Self {
        Self { reverse: true }
    }
    /// reverse the ordering if self.reverse is set
    #[must_use]
    pub const fn reverse(&self, x: Ordering) -> Ordering {
        if self.reverse { x.reverse() } else { x }
    }
    /// Compare two keys
    #[must_use]
    pub fn comp(&self, left: &SortKey, right: &SortKey) -> Ordering {
        self.reverse(comp_keys(left, right))
    }
    /// Compare two keys for equality
    #[must_use]
    pub fn equal(&self, left: &SortKey, right: &SortKey) -> bool {
        left == right
    }
    /// Is this pair of adjacent keys in order?
    /// If `unique`, equal keys are out of order.
    #[must_use]
    pub fn in_order(&self, prev: &SortKey, curr: &SortKey, unique: bool) -> bool {
        match self.comp(prev, curr) {
            Ordering::Less => true,
            Ordering::Equal => !unique,
            Ordering::Greater => false,
        }
    }
}

/// Return the index of the first key that is out of order with respect to its predecessor
pub fn comp_check(keys: &[SortKey], comp: &Comp, unique: bool) -> Option<usize> {
    keys.windows(2)
        .position(|w| !comp.in_order(&w[0], &w[1], unique))
        .map(|pos| pos + 1)
}
