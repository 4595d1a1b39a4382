use crate::error::CollectionError;
use crate::record::{CanonicalRecord, RawRecord, RecordField, VerificationKind, VerificationRecord};

/// Ordered, index-addressed list of verification records.
///
/// Indices are the identity used by edits. Removing a record shifts every
/// later index down by one, so callers must not hold indices across a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationCollection {
    records: Vec<VerificationRecord>,
}

impl VerificationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize stored records in order.
    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        raw.into_iter().map(VerificationRecord::normalize).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VerificationRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VerificationRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[VerificationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VerificationRecord> {
        self.records
    }

    /// Add an empty `Value` record at the end and return its index.
    pub fn append(&mut self) -> usize {
        self.push(VerificationRecord::default())
    }

    /// Add `record` at the end and return its index.
    pub fn push(&mut self, record: VerificationRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Overwrite one text field of the record at `index`.
    pub fn edit_field(
        &mut self,
        index: usize,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<(), CollectionError> {
        self.get_mut(index)?.set_field(field, value);
        Ok(())
    }

    /// Switch the active payload of the record at `index`.
    pub fn set_kind(&mut self, index: usize, kind: VerificationKind) -> Result<(), CollectionError> {
        self.get_mut(index)?.set_kind(kind);
        Ok(())
    }

    /// Remove and return the record at `index`; later records move up by one.
    ///
    /// The collection is untouched when `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Result<VerificationRecord, CollectionError> {
        self.check(index)?;
        Ok(self.records.remove(index))
    }

    /// Canonical form of every record, in order.
    pub fn canonicalize(&self) -> Vec<CanonicalRecord> {
        self.records.iter().map(VerificationRecord::canonicalize).collect()
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut VerificationRecord, CollectionError> {
        self.check(index)?;
        Ok(&mut self.records[index])
    }

    fn check(&self, index: usize) -> Result<(), CollectionError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(CollectionError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }
}

impl FromIterator<VerificationRecord> for VerificationCollection {
    fn from_iter<T: IntoIterator<Item = VerificationRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<VerificationRecord>> for VerificationCollection {
    fn from(records: Vec<VerificationRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a VerificationCollection {
    type Item = &'a VerificationRecord;
    type IntoIter = std::slice::Iter<'a, VerificationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for VerificationCollection {
    type Item = VerificationRecord;
    type IntoIter = std::vec::IntoIter<VerificationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
