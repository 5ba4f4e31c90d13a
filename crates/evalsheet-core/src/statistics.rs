//! Judgment tallies over record views.
//!
//! Everything here is a pure function of its input: the same view always
//! produces the same result, and nothing is cached between calls.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{EvaluationRecord, JudgmentCategory, TraineeKey};

/// Judgment counts over one record view.
///
/// Categories that do not occur are omitted from `counts_by_judgment`; use
/// [`AggregationResult::count`] to read them as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub total: usize,
    pub counts_by_judgment: BTreeMap<JudgmentCategory, usize>,
}

impl AggregationResult {
    pub fn count(&self, category: JudgmentCategory) -> usize {
        self.counts_by_judgment.get(&category).copied().unwrap_or(0)
    }

    /// Percentage of the view in `category` (0.0 for an empty view).
    pub fn share(&self, category: JudgmentCategory) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(category) as f64 * 100.0 / self.total as f64
    }
}

/// Tally every record's judgment category.
pub fn aggregate<'a, I>(records: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let mut result = AggregationResult::default();
    for record in records {
        *result
            .counts_by_judgment
            .entry(record.judgment.category())
            .or_insert(0) += 1;
        result.total += 1;
    }
    result
}

/// Per-trainee judgment counts.
///
/// `total == pending + approved + not_approved + other` for every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraineeSummaryRow {
    pub trainee: TraineeKey,
    pub pending: usize,
    pub approved: usize,
    pub not_approved: usize,
    /// Records whose judgment is not one of the three tracked values.
    pub other: usize,
    pub total: usize,
}

impl TraineeSummaryRow {
    fn new(trainee: TraineeKey) -> Self {
        Self {
            trainee,
            pending: 0,
            approved: 0,
            not_approved: 0,
            other: 0,
            total: 0,
        }
    }

    fn add(&mut self, category: JudgmentCategory) {
        match category {
            JudgmentCategory::Pending => self.pending += 1,
            JudgmentCategory::Approved => self.approved += 1,
            JudgmentCategory::NotApproved => self.not_approved += 1,
            JudgmentCategory::Other => self.other += 1,
        }
        self.total += 1;
    }
}

/// Group records by trainee, one row per distinct trainee.
///
/// Rows are in first-appearance order: a trainee's row sits where that
/// trainee's first record sits in the input.
pub fn summarize_by_trainee<'a, I>(records: I) -> Vec<TraineeSummaryRow>
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let mut rows: Vec<TraineeSummaryRow> = Vec::new();
    let mut positions: HashMap<(&'a str, &'a str), usize> = HashMap::new();

    for record in records {
        let key = (record.first_name.as_str(), record.last_name.as_str());
        let position = *positions.entry(key).or_insert_with(|| {
            rows.push(TraineeSummaryRow::new(record.trainee()));
            rows.len() - 1
        });
        rows[position].add(record.judgment.category());
    }

    rows
}

/// Group records by trainee, keeping each group's records in input order.
///
/// Groups follow the same first-appearance order as [`summarize_by_trainee`].
pub fn group_by_trainee<'a, I>(records: I) -> Vec<(TraineeKey, Vec<&'a EvaluationRecord>)>
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let mut groups: Vec<(TraineeKey, Vec<&'a EvaluationRecord>)> = Vec::new();
    let mut positions: HashMap<(&'a str, &'a str), usize> = HashMap::new();

    for record in records {
        let key = (record.first_name.as_str(), record.last_name.as_str());
        let position = *positions.entry(key).or_insert_with(|| {
            groups.push((record.trainee(), Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(record);
    }

    groups
}

/// What is still waiting for a judgment in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOverview<'a> {
    /// Pending records in view order.
    pub records: Vec<&'a EvaluationRecord>,
    /// Distinct trainees with at least one pending record.
    pub trainees: usize,
    /// Distinct competencies with at least one pending record.
    pub competencies: usize,
    /// Records in the view that already have a judgment.
    pub completed: usize,
}

pub fn pending_overview<'a, I>(records: I) -> PendingOverview<'a>
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let mut pending = Vec::new();
    let mut completed = 0usize;
    for record in records {
        if record.judgment.is_pending() {
            pending.push(record);
        } else {
            completed += 1;
        }
    }

    let trainees: HashSet<(&str, &str)> = pending
        .iter()
        .map(|r| (r.first_name.as_str(), r.last_name.as_str()))
        .collect();
    let competencies: HashSet<&str> = pending.iter().map(|r| r.competency.as_str()).collect();

    PendingOverview {
        trainees: trainees.len(),
        competencies: competencies.len(),
        records: pending,
        completed,
    }
}

/// Headline counts for a whole record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortOverview {
    pub records: usize,
    pub trainees: usize,
    pub competencies: usize,
}

pub fn cohort_overview<'a, I>(records: I) -> CohortOverview
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let mut count = 0usize;
    let mut trainees: HashSet<(&str, &str)> = HashSet::new();
    let mut competencies: HashSet<&str> = HashSet::new();
    for record in records {
        count += 1;
        trainees.insert((record.first_name.as_str(), record.last_name.as_str()));
        competencies.insert(record.competency.as_str());
    }
    CohortOverview {
        records: count,
        trainees: trainees.len(),
        competencies: competencies.len(),
    }
}
