//! Record Types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Roll number identifying a student.
///
/// Serialized as a JSON number in values and as its decimal string when used
/// as an object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollNumber(pub u64);

impl fmt::Display for RollNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One student's record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Trimmed display name (letters and spaces)
    pub name: String,
    /// Score in [0, 100]
    pub marks: f64,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, marks: f64) -> Self {
        Self {
            name: name.into(),
            marks,
        }
    }
}

/// In-memory mapping of roll number to record.
///
/// Ordered by roll number. Insertion policy (uniqueness) belongs to the
/// caller; `insert` simply replaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordStore {
    records: BTreeMap<RollNumber, StudentRecord>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the record for `roll_no`
    pub fn insert(&mut self, roll_no: RollNumber, record: StudentRecord) -> Option<StudentRecord> {
        self.records.insert(roll_no, record)
    }

    /// Remove the record for `roll_no`; absent keys are a no-op
    pub fn remove(&mut self, roll_no: RollNumber) -> Option<StudentRecord> {
        self.records.remove(&roll_no)
    }

    pub fn get(&self, roll_no: RollNumber) -> Option<&StudentRecord> {
        self.records.get(&roll_no)
    }

    pub fn get_mut(&mut self, roll_no: RollNumber) -> Option<&mut StudentRecord> {
        self.records.get_mut(&roll_no)
    }

    pub fn contains(&self, roll_no: RollNumber) -> bool {
        self.records.contains_key(&roll_no)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in roll number order
    pub fn iter(&self) -> impl Iterator<Item = (RollNumber, &StudentRecord)> {
        self.records.iter().map(|(roll_no, record)| (*roll_no, record))
    }
}

impl FromIterator<(RollNumber, StudentRecord)> for RecordStore {
    fn from_iter<T: IntoIterator<Item = (RollNumber, StudentRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = RecordStore::new();
        store.insert(RollNumber(1), StudentRecord::new("Alice", 85.0));

        let record = store.get(RollNumber(1)).unwrap();
        assert_eq!(record.name, "Alice");
        assert_eq!(record.marks, 85.0);
        assert!(store.get(RollNumber(2)).is_none());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut store = RecordStore::new();
        store.insert(RollNumber(1), StudentRecord::new("Alice", 85.0));
        let previous = store.insert(RollNumber(1), StudentRecord::new("Alina", 90.0));

        assert_eq!(previous.unwrap().name, "Alice");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(RollNumber(1)).unwrap().name, "Alina");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store: RecordStore =
            [(RollNumber(4), StudentRecord::new("Dana", 70.0))].into_iter().collect();
        let before = store.clone();

        assert!(store.remove(RollNumber(99)).is_none());
        assert_eq!(store, before);

        assert!(store.remove(RollNumber(4)).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_iter_ordered_by_roll_number() {
        let store: RecordStore = [
            (RollNumber(10), StudentRecord::new("Jay", 40.0)),
            (RollNumber(2), StudentRecord::new("Bob", 50.0)),
            (RollNumber(7), StudentRecord::new("Gus", 60.0)),
        ]
        .into_iter()
        .collect();

        let rolls: Vec<u64> = store.iter().map(|(r, _)| r.0).collect();
        assert_eq!(rolls, vec![2, 7, 10]);
    }

    #[test]
    fn test_json_keys_are_decimal_strings() {
        let store: RecordStore =
            [(RollNumber(1), StudentRecord::new("Alice", 85.0))].into_iter().collect();

        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(value, serde_json::json!({"1": {"name": "Alice", "marks": 85.0}}));
    }
}
