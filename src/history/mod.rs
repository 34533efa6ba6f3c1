//! Search history list
//!
//! An ordered list of unique, non-empty IP address strings. Insertion order
//! is preserved; entries only leave through explicit removal or clearing.
//! Serializes as a plain JSON array of strings.

use serde::{Deserialize, Serialize};

/// Previously searched addresses, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList {
    entries: Vec<String>,
}

impl HistoryList {
    /// Build a list from existing entries, kept as given
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Append an address unless it is empty or already present
    ///
    /// Returns true if the list changed.
    pub fn add(&mut self, ip: &str) -> bool {
        if ip.is_empty() || self.contains(ip) {
            return false;
        }
        self.entries.push(ip.to_string());
        true
    }

    /// Remove every entry equal to `ip`, keeping the order of the rest
    ///
    /// Returns the number of entries removed.
    pub fn remove(&mut self, ip: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != ip);
        before - self.entries.len()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check whether an address is present
    pub fn contains(&self, ip: &str) -> bool {
        self.entries.iter().any(|entry| entry == ip)
    }

    /// Get all entries
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the list, returning its entries
    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}
