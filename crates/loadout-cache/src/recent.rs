//! Bounded most-recently-used index of presets.

use loadout_types::PresetSummary;

/// Recency-ordered list of preset summaries, front = most recent.
///
/// Ids are unique. Promoting an id already present moves it to the front
/// (with the new summary) instead of inserting a second copy. Growing past
/// `capacity` evicts from the back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentIndex {
    entries: Vec<PresetSummary>,
    capacity: usize,
}

impl RecentIndex {
    /// Empty index. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuild from persisted entries, dropping later duplicates.
    ///
    /// Entries beyond `capacity` are kept until the next promotion evicts
    /// them, so their bodies are pruned through the normal eviction path.
    pub fn from_entries(entries: Vec<PresetSummary>, capacity: usize) -> Self {
        let mut index = Self::new(capacity);
        for entry in entries {
            if !index.contains(&entry.preset_id) {
                index.entries.push(entry);
            }
        }
        index
    }

    /// Move `summary` to the front. Returns the entries evicted to stay
    /// within capacity, least recent last.
    pub fn promote(&mut self, summary: PresetSummary) -> Vec<PresetSummary> {
        self.entries.retain(|e| e.preset_id != summary.preset_id);
        self.entries.insert(0, summary);
        if self.entries.len() > self.capacity {
            self.entries.split_off(self.capacity)
        } else {
            Vec::new()
        }
    }

    /// Remove an id. Returns the removed entry, if any.
    pub fn remove(&mut self, preset_id: &str) -> Option<PresetSummary> {
        let pos = self.entries.iter().position(|e| e.preset_id == preset_id)?;
        Some(self.entries.remove(pos))
    }

    pub fn contains(&self, preset_id: &str) -> bool {
        self.entries.iter().any(|e| e.preset_id == preset_id)
    }

    /// Entries, most recent first, limited to capacity.
    pub fn entries(&self) -> &[PresetSummary] {
        &self.entries[..self.entries.len().min(self.capacity)]
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored entries, including any over capacity.
    pub fn as_slice(&self) -> &[PresetSummary] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_types::PresetSource;

    fn summary(id: &str) -> PresetSummary {
        PresetSummary::new(id, format!("name-{id}"), PresetSource::Cloud)
    }

    fn ids(index: &RecentIndex) -> Vec<&str> {
        index.entries().iter().map(|e| e.preset_id.as_str()).collect()
    }

    #[test]
    fn promote_orders_most_recent_first() {
        let mut index = RecentIndex::new(5);
        index.promote(summary("a"));
        index.promote(summary("b"));
        index.promote(summary("c"));
        assert_eq!(ids(&index), ["c", "b", "a"]);
    }

    #[test]
    fn promote_existing_moves_to_front() {
        let mut index = RecentIndex::new(5);
        index.promote(summary("a"));
        index.promote(summary("b"));
        let renamed = PresetSummary::new("a", "renamed", PresetSource::Cloud);
        assert!(index.promote(renamed).is_empty());
        assert_eq!(ids(&index), ["a", "b"]);
        assert_eq!(index.entries()[0].preset_name, "renamed");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn overflow_evicts_least_recent() {
        let mut index = RecentIndex::new(2);
        index.promote(summary("a"));
        index.promote(summary("b"));
        let evicted = index.promote(summary("c"));
        assert_eq!(evicted, vec![summary("a")]);
        assert_eq!(ids(&index), ["c", "b"]);
    }

    #[test]
    fn from_entries_dedups_and_trims_on_next_promote() {
        let index = RecentIndex::from_entries(
            vec![summary("a"), summary("b"), summary("a"), summary("c")],
            2,
        );
        assert_eq!(index.len(), 3);
        assert_eq!(ids(&index), ["a", "b"]);
        let mut index = index;
        let evicted = index.promote(summary("d"));
        assert_eq!(evicted, vec![summary("b"), summary("c")]);
        assert_eq!(ids(&index), ["d", "a"]);
    }

    #[test]
    fn remove_entry() {
        let mut index = RecentIndex::new(3);
        index.promote(summary("a"));
        assert_eq!(index.remove("a"), Some(summary("a")));
        assert_eq!(index.remove("a"), None);
        assert!(index.is_empty());
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut index = RecentIndex::new(0);
        index.promote(summary("a"));
        index.promote(summary("b"));
        assert_eq!(index.capacity(), 1);
        assert_eq!(ids(&index), ["b"]);
    }
}
