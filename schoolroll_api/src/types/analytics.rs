//! Payloads of the `/analytics` endpoints.

use serde::{Deserialize, Serialize};

use super::ClassRecord;

/// Response of `GET /analytics/class/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClassAnalytics {
    /// The class with teacher and students populated.
    pub class: ClassRecord,
    pub gender_distribution: GenderDistribution,
}

/// Head count of enrolled students per gender.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderDistribution {
    #[serde(default)]
    pub male: i64,
    #[serde(default)]
    pub female: i64,
}

/// Response of `GET /analytics/financials`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct FinancialSummary {
    /// Total salary expense over the period.
    pub expenses: f64,
    /// Total fee income over the period.
    pub income: f64,
}

impl FinancialSummary {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}
