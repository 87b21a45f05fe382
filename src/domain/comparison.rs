//! Side-by-side comparison of strategy value series.

use super::strategy::{StrategyResult, ValuePoint};

#[derive(Debug, Clone, PartialEq)]
pub struct StrategySummary {
    pub name: String,
    pub teams: Vec<String>,
    pub final_value: f64,
    /// `(last - first) / first * 100`.
    pub percent_return: f64,
    /// Mean week-over-week change, in percent.
    pub average_weekly_return: f64,
    /// Largest fall from a running peak, as a fraction.
    pub max_drawdown: f64,
    pub max_drawdown_weeks: u32,
}

impl StrategySummary {
    pub fn compute(result: &StrategyResult) -> Self {
        let (max_drawdown, max_drawdown_weeks) = compute_drawdown(&result.values);
        StrategySummary {
            name: result.name.clone(),
            teams: result.teams.clone(),
            final_value: result.last_value().unwrap_or(0.0),
            percent_return: percent_return(&result.values),
            average_weekly_return: average_weekly_return(&result.values),
            max_drawdown,
            max_drawdown_weeks,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub results: Vec<StrategyResult>,
    pub summaries: Vec<StrategySummary>,
}

impl ComparisonReport {
    pub fn new(results: Vec<StrategyResult>) -> Self {
        let summaries = results.iter().map(StrategySummary::compute).collect();
        ComparisonReport { results, summaries }
    }

    /// Summaries ordered by average weekly return, lowest first.
    pub fn ranked(&self) -> Vec<&StrategySummary> {
        let mut ranked: Vec<&StrategySummary> = self.summaries.iter().collect();
        ranked.sort_by(|a, b| a.average_weekly_return.total_cmp(&b.average_weekly_return));
        ranked
    }

    pub fn best(&self) -> Option<&StrategySummary> {
        self.ranked().last().copied()
    }

    /// Weeks covered by the longest value series.
    pub fn weeks(&self) -> Vec<u32> {
        self.results
            .iter()
            .max_by_key(|r| r.values.len())
            .map(|r| r.values.iter().map(|p| p.week).collect())
            .unwrap_or_default()
    }
}

pub fn percent_return(values: &[ValuePoint]) -> f64 {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) if first.value > 0.0 => {
            (last.value - first.value) / first.value * 100.0
        }
        _ => 0.0,
    }
}

pub fn average_weekly_return(values: &[ValuePoint]) -> f64 {
    let changes: Vec<f64> = values
        .windows(2)
        .filter(|w| w[0].value > 0.0)
        .map(|w| (w[1].value - w[0].value) / w[0].value)
        .collect();
    if changes.is_empty() {
        return 0.0;
    }
    changes.iter().sum::<f64>() / changes.len() as f64 * 100.0
}

fn compute_drawdown(values: &[ValuePoint]) -> (f64, u32) {
    let Some(first) = values.first() else {
        return (0.0, 0);
    };

    let mut peak = first.value;
    let mut max_dd = 0.0_f64;
    let mut max_dd_weeks = 0u32;
    let mut current_dd_weeks = 0u32;

    for point in values {
        if point.value >= peak {
            peak = point.value;
            current_dd_weeks = 0;
        } else if peak > 0.0 {
            let dd = (peak - point.value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
            current_dd_weeks += 1;
            if current_dd_weeks > max_dd_weeks {
                max_dd_weeks = current_dd_weeks;
            }
        }
    }

    (max_dd, max_dd_weeks)
}
