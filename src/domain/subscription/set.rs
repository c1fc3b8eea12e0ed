//! Identity-keyed collection of subscription records.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::domain::foundation::{Identity, Timestamp};

use super::SubscriptionRecord;

/// The full set of subscription records, at most one per identity.
///
/// Iteration and serialization are ordered by identity, so two sets with
/// the same contents always serialize to the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionSet {
    records: BTreeMap<Identity, SubscriptionRecord>,
}

impl SubscriptionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list of records.
    ///
    /// If an identity appears more than once, the first occurrence wins.
    pub fn from_records(records: impl IntoIterator<Item = SubscriptionRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.records.entry(record.identity.clone()).or_insert(record);
        }
        set
    }

    /// Looks up a record by identity.
    pub fn get(&self, identity: &Identity) -> Option<&SubscriptionRecord> {
        self.records.get(identity)
    }

    /// Looks up a record by its raw identity string.
    pub fn find(&self, identity: &str) -> Option<&SubscriptionRecord> {
        self.records.values().find(|r| r.identity.as_str() == identity)
    }

    pub(crate) fn get_mut(&mut self, identity: &Identity) -> Option<&mut SubscriptionRecord> {
        self.records.get_mut(identity)
    }

    /// Inserts a record, replacing any existing record for the same identity.
    pub fn insert(&mut self, record: SubscriptionRecord) -> Option<SubscriptionRecord> {
        self.records.insert(record.identity.clone(), record)
    }

    /// Removes the record for a raw identity string, if present.
    pub fn remove(&mut self, identity: &str) -> Option<SubscriptionRecord> {
        let key = self.find(identity)?.identity.clone();
        self.records.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &SubscriptionRecord> {
        self.records.values()
    }

    /// Consumes the set, returning records in identity order.
    pub fn into_records(self) -> Vec<SubscriptionRecord> {
        self.records.into_values().collect()
    }

    /// Flip every lapsed active record to inactive.
    ///
    /// Returns the identities that changed. Calling this again with the
    /// same `today` returns an empty list.
    pub fn expire_lapsed(&mut self, today: NaiveDate, now: Timestamp) -> Vec<Identity> {
        self.records
            .values_mut()
            .filter_map(|record| {
                record
                    .expire_if_lapsed(today, now)
                    .then(|| record.identity.clone())
            })
            .collect()
    }
}

impl Serialize for SubscriptionSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.records.values())
    }
}

impl<'de> Deserialize<'de> for SubscriptionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<SubscriptionRecord>::deserialize(deserializer).map(Self::from_records)
    }
}
