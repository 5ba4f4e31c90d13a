//! Core data model types for evalsheet.
//!
//! These types describe one uploaded cohort sheet: its metadata header and
//! the evaluation records below it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cohort information read from the fixed-position header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortMetadata {
    /// Cohort identifier ("ficha").
    pub cohort_id: String,
    /// Training program name ("denominación").
    pub program_name: String,
    /// Free-text cohort status as exported.
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CohortMetadata {
    /// Classify the free-text status.
    pub fn status_kind(&self) -> CohortStatus {
        CohortStatus::classify(&self.status)
    }
}

/// Coarse classification of a cohort status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CohortStatus {
    Active,
    Finished,
    Other,
}

impl CohortStatus {
    pub fn classify(status: &str) -> Self {
        let upper = status.to_uppercase();
        if upper.contains("ACTIV") {
            CohortStatus::Active
        } else if upper.contains("TERMIN") {
            CohortStatus::Finished
        } else {
            CohortStatus::Other
        }
    }
}

impl fmt::Display for CohortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CohortStatus::Active => write!(f, "active"),
            CohortStatus::Finished => write!(f, "finished"),
            CohortStatus::Other => write!(f, "other"),
        }
    }
}

/// The tracked judgment categories, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JudgmentCategory {
    Pending,
    Approved,
    NotApproved,
    Other,
}

impl JudgmentCategory {
    pub const ALL: [JudgmentCategory; 4] = [
        JudgmentCategory::Pending,
        JudgmentCategory::Approved,
        JudgmentCategory::NotApproved,
        JudgmentCategory::Other,
    ];

    /// Column label used in summary tables.
    pub fn label(self) -> &'static str {
        match self {
            JudgmentCategory::Pending => "Pending",
            JudgmentCategory::Approved => "Approved",
            JudgmentCategory::NotApproved => "NotApproved",
            JudgmentCategory::Other => "Other",
        }
    }
}

impl fmt::Display for JudgmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The evaluation outcome of one competency for one trainee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "label", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Judgment {
    /// `POR EVALUAR`
    Pending,
    /// `APROBADO`
    Approved,
    /// `NO APROBADO`
    NotApproved,
    /// Any other value, with the raw label as exported.
    Other(String),
}

impl Judgment {
    /// Parse an exported judgment value.
    ///
    /// Recognised values match regardless of case and spacing and are
    /// normalised: `aprobado` reads back as `APROBADO` from [`Judgment::label`].
    /// Unrecognised values are kept as [`Judgment::Other`] with their trimmed
    /// raw text so the record still counts toward totals.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_uppercase().as_str() {
            "POR EVALUAR" => Judgment::Pending,
            "APROBADO" => Judgment::Approved,
            "NO APROBADO" => Judgment::NotApproved,
            _ => Judgment::Other(raw.trim().to_string()),
        }
    }

    pub fn category(&self) -> JudgmentCategory {
        match self {
            Judgment::Pending => JudgmentCategory::Pending,
            Judgment::Approved => JudgmentCategory::Approved,
            Judgment::NotApproved => JudgmentCategory::NotApproved,
            Judgment::Other(_) => JudgmentCategory::Other,
        }
    }

    /// The label shown in detail reports.
    pub fn label(&self) -> &str {
        match self {
            Judgment::Pending => "POR EVALUAR",
            Judgment::Approved => "APROBADO",
            Judgment::NotApproved => "NO APROBADO",
            Judgment::Other(raw) => raw,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Judgment::Pending)
    }
}

impl fmt::Display for Judgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trainee identity: the `(first name, last name)` pair.
///
/// Distinct people sharing a full name are not disambiguated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraineeKey {
    pub first_name: String,
    pub last_name: String,
}

impl TraineeKey {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// `"<first name> <last name>"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for TraineeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// One row of the evaluation export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub first_name: String,
    pub last_name: String,
    pub competency: String,
    pub learning_outcome: String,
    pub judgment: Judgment,
}

impl EvaluationRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        competency: impl Into<String>,
        learning_outcome: impl Into<String>,
        judgment: Judgment,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            competency: competency.into(),
            learning_outcome: learning_outcome.into(),
            judgment,
        }
    }

    pub fn trainee(&self) -> TraineeKey {
        TraineeKey::new(&self.first_name, &self.last_name)
    }

    /// Compare identity without allocating a [`TraineeKey`].
    pub fn belongs_to(&self, trainee: &TraineeKey) -> bool {
        self.first_name == trainee.first_name && self.last_name == trainee.last_name
    }
}
