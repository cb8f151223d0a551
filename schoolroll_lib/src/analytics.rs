//! Class and financial analytics views.

use chrono::{Datelike, NaiveDate};
use schoolroll_api::types::{ClassAnalytics, FinancialSummary};
use schoolroll_api::{FinancialPeriod, FinancialQuery};

use crate::error::SchoolError;
use crate::source::AnalyticsSource;

/// First year offered by the financial year picker.
pub const FIRST_YEAR: i32 = 2020;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Years selectable in the financial view, oldest first.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (FIRST_YEAR..=current_year).collect()
}

/// English name of a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

fn check_month(month: u32) -> Result<(), SchoolError> {
    match month_name(month) {
        Some(_) => Ok(()),
        None => Err(SchoolError::InvalidInput(format!(
            "month must be between 1 and 12, got {}",
            month
        ))),
    }
}

/// Summary and gender breakdown of one class.
pub struct ClassAnalyticsView<S> {
    source: S,
    class_id: String,
    data: Option<ClassAnalytics>,
    loading: bool,
    error: Option<String>,
}

impl<S: AnalyticsSource> ClassAnalyticsView<S> {
    pub fn new(source: S, class_id: &str) -> Self {
        Self {
            source,
            class_id: class_id.to_string(),
            data: None,
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), SchoolError> {
        self.loading = true;
        let result = self.source.class_analytics(&self.class_id).await;
        self.loading = false;

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Class analytics for {} failed: {}", self.class_id, e);
                self.error = Some("Error fetching class analytics".to_string());
                Err(e.into())
            }
        }
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn data(&self) -> Option<&ClassAnalytics> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bars of the gender chart, male first.
    pub fn gender_series(&self) -> Vec<(&'static str, i64)> {
        match &self.data {
            Some(data) => vec![
                ("Male", data.gender_distribution.male),
                ("Female", data.gender_distribution.female),
            ],
            None => Vec::new(),
        }
    }

    /// Name of the class teacher, when one is assigned.
    pub fn teacher_name(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.class.teacher.as_ref())
            .map(|t| t.label())
    }

    pub fn student_names(&self) -> Vec<&str> {
        self.data
            .as_ref()
            .map(|d| d.class.students.iter().map(|s| s.label()).collect())
            .unwrap_or_default()
    }
}

/// Expense and income totals for a month or a year.
pub struct FinancialView<S> {
    source: S,
    period: FinancialPeriod,
    year: i32,
    month: u32,
    summary: Option<FinancialSummary>,
    loading: bool,
    error: Option<String>,
}

impl<S: AnalyticsSource> FinancialView<S> {
    /// Monthly view of `today`'s month. Nothing is fetched yet.
    pub fn new(source: S, today: NaiveDate) -> Self {
        Self {
            source,
            period: FinancialPeriod::Monthly,
            year: today.year(),
            month: today.month(),
            summary: None,
            loading: false,
            error: None,
        }
    }

    pub fn period(&self) -> FinancialPeriod {
        self.period
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn summary(&self) -> Option<&FinancialSummary> {
        self.summary.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The query the next fetch will send. The month goes along even for the
    /// yearly view; the backend ignores it there.
    pub fn query(&self) -> FinancialQuery {
        FinancialQuery::new(self.period, self.year, self.month)
    }

    /// Changes the whole selection at once without fetching.
    pub fn select(
        &mut self,
        period: FinancialPeriod,
        year: i32,
        month: u32,
    ) -> Result<(), SchoolError> {
        check_month(month)?;
        self.period = period;
        self.year = year;
        self.month = month;
        Ok(())
    }

    pub async fn set_view(&mut self, period: FinancialPeriod) -> Result<(), SchoolError> {
        self.period = period;
        self.fetch().await
    }

    pub async fn set_year(&mut self, year: i32) -> Result<(), SchoolError> {
        self.year = year;
        self.fetch().await
    }

    /// Rejects anything outside 1..=12 without fetching.
    pub async fn set_month(&mut self, month: u32) -> Result<(), SchoolError> {
        check_month(month)?;
        self.month = month;
        self.fetch().await
    }

    pub async fn fetch(&mut self) -> Result<(), SchoolError> {
        let query = self.query();
        self.loading = true;
        let result = self.source.financials(&query).await;
        self.loading = false;

        match result {
            Ok(summary) => {
                self.summary = Some(summary);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    "Financial analytics for {} {} failed: {}",
                    query.period,
                    query.year,
                    e
                );
                self.error = Some("Error fetching financial data".to_string());
                Err(e.into())
            }
        }
    }
}
