//! Ordering and source-file bookkeeping shared by every record shape.

use std::collections::BTreeMap;

use crate::{EncounterEntry, Record, TrainerEntry};

/// Common view over records that remember where they came from and where
/// they sort within that file.
pub trait Provenance {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
    fn source_file(&self) -> Option<&str>;
    fn set_source_file(&mut self, file: Option<String>);
    /// Key that must be unique within one collection.
    fn identity_key(&self) -> String;
}

impl Provenance for Record {
    fn order(&self) -> usize {
        self.order
    }
    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
    fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }
    fn set_source_file(&mut self, file: Option<String>) {
        self.source_file = file;
    }
    fn identity_key(&self) -> String {
        self.id.clone()
    }
}

impl Provenance for EncounterEntry {
    fn order(&self) -> usize {
        self.order
    }
    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
    fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }
    fn set_source_file(&mut self, file: Option<String>) {
        self.source_file = file;
    }
    fn identity_key(&self) -> String {
        format!("{},{}", self.id, self.version)
    }
}

impl Provenance for TrainerEntry {
    fn order(&self) -> usize {
        self.order
    }
    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
    fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }
    fn set_source_file(&mut self, file: Option<String>) {
        self.source_file = file;
    }
    fn identity_key(&self) -> String {
        format!("{},{},{}", self.id, self.name, self.version)
    }
}

/// Slice indices grouped by source file, each group sorted by current order.
///
/// Records without a source file share the `None` group. Ties keep slice order.
fn grouped_indices<T: Provenance>(records: &[T]) -> BTreeMap<Option<&str>, Vec<usize>> {
    let mut groups: BTreeMap<Option<&str>, Vec<usize>> = BTreeMap::new();
    for (idx, rec) in records.iter().enumerate() {
        groups.entry(rec.source_file()).or_default().push(idx);
    }
    for indices in groups.values_mut() {
        indices.sort_by_key(|&i| records[i].order());
    }
    groups
}

/// Make every source-file group's `order` values dense `0..n-1`, keeping
/// relative order.
pub fn renumber<T: Provenance>(records: &mut [T]) {
    let plan: Vec<(usize, usize)> = grouped_indices(records)
        .into_values()
        .flat_map(|indices| indices.into_iter().enumerate().map(|(pos, idx)| (idx, pos)))
        .collect();
    for (idx, pos) in plan {
        records[idx].set_order(pos);
    }
}

/// Move the record at slice position `index` to `new_position` inside its own
/// source-file group, then renumber that group densely.
///
/// `new_position` past the end of the group moves the record last. Returns
/// `false` when `index` is out of range.
pub fn move_record<T: Provenance>(records: &mut [T], index: usize, new_position: usize) -> bool {
    let Some(target) = records.get(index) else {
        return false;
    };
    let group_key = target.source_file().map(str::to_string);
    let mut members: Vec<usize> = (0..records.len())
        .filter(|&i| records[i].source_file() == group_key.as_deref())
        .collect();
    members.sort_by_key(|&i| records[i].order());
    members.retain(|&i| i != index);
    let slot = new_position.min(members.len());
    members.insert(slot, index);
    for (pos, idx) in members.into_iter().enumerate() {
        records[idx].set_order(pos);
    }
    true
}

/// Return the records sorted by `order` (stable for ties).
pub fn sorted_by_order<T: Provenance>(records: &[T]) -> Vec<&T> {
    let mut out: Vec<&T> = records.iter().collect();
    out.sort_by_key(|r| r.order());
    out
}
