//! Handler-method deny-list.
//!
//! Handler messages from connection pool accounting, constructors and
//! buffered-read helpers carry no request lifecycle information.

use std::collections::HashSet;

/// Closed, exact-match set of method names to drop.
#[derive(Debug, Clone, Default)]
pub struct DenyList {
    methods: HashSet<String>,
}

impl DenyList {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-sensitive exact match.
    pub fn is_ignored(&self, method_name: &str) -> bool {
        self.methods.contains(method_name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
