use std::str::FromStr;

use url::Url;

/// Aggregation period of the financial summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FinancialPeriod {
    #[default]
    Monthly,
    Yearly,
}
impl std::fmt::Display for FinancialPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FinancialPeriod::Monthly => "monthly",
                FinancialPeriod::Yearly => "yearly",
            }
        )
    }
}
impl FromStr for FinancialPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(FinancialPeriod::Monthly),
            "yearly" | "year" | "y" => Ok(FinancialPeriod::Yearly),
            _ => Err(format!(
                "unknown period '{}'. Valid values: monthly, yearly",
                s
            )),
        }
    }
}

/// Parameters of `GET /analytics/financials`.
///
/// `month` is sent for yearly summaries too; the backend ignores it there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinancialQuery {
    pub period: FinancialPeriod,
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
}

impl FinancialQuery {
    pub fn new(period: FinancialPeriod, year: i32, month: u32) -> Self {
        Self {
            period,
            year,
            month,
        }
    }

    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("type", &self.period.to_string())
            .append_pair("year", &self.year.to_string())
            .append_pair("month", &self.month.to_string());
        url
    }
}
