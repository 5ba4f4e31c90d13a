//! Equality filters over a record set.
//!
//! Filtering never touches the records themselves: a [`RecordView`] borrows
//! the records that pass, in their original order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{EvaluationRecord, TraineeKey};

/// The filter values chosen by the caller. Both filters are optional and
/// combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub trainee: Option<TraineeKey>,
    #[serde(default)]
    pub competency: Option<String>,
}

impl FilterSelection {
    /// A selection with no filters; applying it keeps every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_trainee(mut self, trainee: TraineeKey) -> Self {
        self.trainee = Some(trainee);
        self
    }

    pub fn with_competency(mut self, competency: impl Into<String>) -> Self {
        self.competency = Some(competency.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.trainee.is_none() && self.competency.is_none()
    }

    pub fn matches(&self, record: &EvaluationRecord) -> bool {
        let trainee_ok = self
            .trainee
            .as_ref()
            .map_or(true, |t| record.belongs_to(t));
        let competency_ok = self
            .competency
            .as_ref()
            .map_or(true, |c| record.competency == *c);
        trainee_ok && competency_ok
    }

    /// Project `records` down to the ones this selection matches.
    pub fn apply<'a, I>(&self, records: I) -> RecordView<'a>
    where
        I: IntoIterator<Item = &'a EvaluationRecord>,
    {
        RecordView {
            records: records.into_iter().filter(|r| self.matches(r)).collect(),
        }
    }
}

/// Convenience wrapper for [`FilterSelection::apply`] with optional values.
pub fn filter<'a, I>(
    records: I,
    trainee: Option<&TraineeKey>,
    competency: Option<&str>,
) -> RecordView<'a>
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    FilterSelection {
        trainee: trainee.cloned(),
        competency: competency.map(str::to_string),
    }
    .apply(records)
}

/// An ordered, borrowed subset of a record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordView<'a> {
    records: Vec<&'a EvaluationRecord>,
}

impl<'a> RecordView<'a> {
    /// A view over every record, in order.
    pub fn of(records: &'a [EvaluationRecord]) -> Self {
        Self {
            records: records.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a EvaluationRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a EvaluationRecord] {
        &self.records
    }
}

impl<'v, 'a> IntoIterator for &'v RecordView<'a> {
    type Item = &'a EvaluationRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a EvaluationRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}

impl<'a> FromIterator<&'a EvaluationRecord> for RecordView<'a> {
    fn from_iter<T: IntoIterator<Item = &'a EvaluationRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Distinct trainees, sorted by full name, for a trainee picker.
pub fn trainee_options<'a, I>(records: I) -> Vec<TraineeKey>
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let unique: BTreeSet<(String, TraineeKey)> = records
        .into_iter()
        .map(|r| {
            let key = r.trainee();
            (key.full_name(), key)
        })
        .collect();
    unique.into_iter().map(|(_, key)| key).collect()
}

/// Distinct competencies, sorted, for a competency picker.
///
/// Pass the trainee-filtered view so the choices follow the trainee selection.
pub fn competency_options<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let unique: BTreeSet<&str> = records.into_iter().map(|r| r.competency.as_str()).collect();
    unique.into_iter().map(str::to_string).collect()
}

/// Every distinct trainee whose full name matches `full_name`, in order of
/// first appearance.
///
/// Matching trims, collapses inner whitespace and ignores case, so a typed
/// name can match keys that split first and last names differently.
pub fn matching_trainees<'a, I>(records: I, full_name: &str) -> Vec<TraineeKey>
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let wanted = normalize_name(full_name);
    let mut matches: Vec<TraineeKey> = Vec::new();
    for record in records {
        let key = record.trainee();
        if normalize_name(&key.full_name()) == wanted && !matches.contains(&key) {
            matches.push(key);
        }
    }
    matches
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
