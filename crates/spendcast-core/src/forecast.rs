//! Next-month expense forecast
//!
//! For each category, expenses are summed per calendar month and a straight
//! line is fitted through `(month index, monthly total)` by ordinary least
//! squares. The forecast is that line evaluated one index past the last
//! observed month. Months are indexed by order of appearance, so gaps in the
//! history are not counted.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Category, Expense};
use crate::report::distinct_categories;

/// Fewest distinct months needed before a trend is fitted
pub const MIN_MONTHS_FOR_TREND: usize = 2;

/// A fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares fit through `points`
///
/// Returns `None` for fewer than two points or when every x is the same.
pub fn fit_line(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in points {
        covariance += (x - mean_x) * (y - mean_y);
        variance += (x - mean_x) * (x - mean_x);
    }

    if variance == 0.0 {
        return None;
    }

    let slope = covariance / variance;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Spend in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Month as `YYYY-MM`
    pub month: String,
    pub amount: f64,
}

/// Predicted spend for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryForecast {
    pub category: Category,
    /// Predicted amount for next month; may be negative on a falling trend
    pub amount: f64,
    pub months_observed: usize,
}

/// Forecast for every category with recorded expenses
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub predictions: Vec<CategoryForecast>,
    /// Sum of all predictions
    pub total: f64,
}

impl Forecast {
    pub fn prediction_for(&self, category: Category) -> Option<f64> {
        self.predictions
            .iter()
            .find(|p| p.category == category)
            .map(|p| p.amount)
    }
}

/// Monthly totals for one category, in chronological order
pub fn monthly_totals(records: &[Expense], category: Category) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for expense in records.iter().filter(|e| e.category == category) {
        *by_month
            .entry((expense.date.year(), expense.date.month()))
            .or_insert(0.0) += expense.amount;
    }

    by_month
        .into_iter()
        .map(|((year, month), amount)| MonthlyTotal {
            month: format!("{:04}-{:02}", year, month),
            amount,
        })
        .collect()
}

/// Predict next month's spend for each category found in `records`
///
/// Categories come from the full record set in the order they were first
/// recorded. A category with fewer than [`MIN_MONTHS_FOR_TREND`] months of
/// history forecasts 0.
pub fn forecast_next_month(records: &[Expense]) -> Forecast {
    let mut predictions = Vec::new();

    for category in distinct_categories(records) {
        let months = monthly_totals(records, category);

        let amount = if months.len() < MIN_MONTHS_FOR_TREND {
            0.0
        } else {
            let points: Vec<(f64, f64)> = months
                .iter()
                .enumerate()
                .map(|(index, m)| (index as f64, m.amount))
                .collect();
            fit_line(&points)
                .map(|fit| fit.predict(months.len() as f64))
                .unwrap_or(0.0)
        };

        predictions.push(CategoryForecast {
            category,
            amount,
            months_observed: months.len(),
        });
    }

    // Float `sum` of nothing is -0.0, which renders as "-0.00"
    let total = predictions.iter().fold(0.0, |acc, p| acc + p.amount);
    debug!(categories = predictions.len(), total, "Forecast computed");

    Forecast { predictions, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(date: &str, category: Category, amount: f64) -> Expense {
        Expense {
            id: 0,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category,
            amount,
        }
    }

    #[test]
    fn test_fit_line_perfect_line() {
        let fit = fit_line(&[(0.0, 100.0), (1.0, 200.0), (2.0, 300.0)]).unwrap();
        assert!((fit.slope - 100.0).abs() < 1e-9);
        assert!((fit.intercept - 100.0).abs() < 1e-9);
        assert!((fit.predict(3.0) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_line_degenerate_inputs() {
        assert!(fit_line(&[]).is_none());
        assert!(fit_line(&[(0.0, 5.0)]).is_none());
        assert!(fit_line(&[(1.0, 5.0), (1.0, 7.0)]).is_none());
    }

    #[test]
    fn test_fit_line_least_squares() {
        let fit = fit_line(&[(0.0, 2.0), (1.0, 2.0), (2.0, 6.0), (3.0, 6.0)]).unwrap();
        assert!((fit.slope - 1.6).abs() < 1e-9);
        assert!((fit.intercept - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_totals_grouped_and_sorted() {
        let records = vec![
            expense("2024-03-02", Category::Food, 10.0),
            expense("2024-01-15", Category::Food, 5.0),
            expense("2024-01-20", Category::Food, 7.0),
            expense("2024-03-30", Category::Transport, 99.0),
        ];
        let months = monthly_totals(&records, Category::Food);
        assert_eq!(
            months,
            vec![
                MonthlyTotal {
                    month: "2024-01".to_string(),
                    amount: 12.0
                },
                MonthlyTotal {
                    month: "2024-03".to_string(),
                    amount: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_linear_trend_forecast() {
        let records = vec![
            expense("2024-01-05", Category::Food, 60.0),
            expense("2024-01-25", Category::Food, 40.0),
            expense("2024-02-10", Category::Food, 200.0),
            expense("2024-03-10", Category::Food, 300.0),
        ];
        let forecast = forecast_next_month(&records);
        assert_eq!(forecast.predictions.len(), 1);
        assert_eq!(forecast.predictions[0].months_observed, 3);
        assert!((forecast.prediction_for(Category::Food).unwrap() - 400.0).abs() < 1e-9);
        assert!((forecast.total - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_month_forecasts_zero() {
        let records = vec![
            expense("2024-05-01", Category::Health, 120.0),
            expense("2024-05-28", Category::Health, 80.0),
        ];
        let forecast = forecast_next_month(&records);
        assert_eq!(forecast.prediction_for(Category::Health), Some(0.0));
        assert_eq!(forecast.predictions[0].months_observed, 1);
        assert_eq!(forecast.total, 0.0);
    }

    #[test]
    fn test_empty_records_forecast() {
        let forecast = forecast_next_month(&[]);
        assert!(forecast.predictions.is_empty());
        assert_eq!(forecast.total, 0.0);
        assert!(forecast.total.is_sign_positive());
        assert_eq!(format!("{:.2}", forecast.total), "0.00");
    }

    #[test]
    fn test_falling_trend_is_not_clamped() {
        let records = vec![
            expense("2024-01-01", Category::Entertainment, 300.0),
            expense("2024-02-01", Category::Entertainment, 100.0),
        ];
        let forecast = forecast_next_month(&records);
        assert!((forecast.prediction_for(Category::Entertainment).unwrap() + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_month_gaps_use_sequential_indices() {
        // January and June are indices 0 and 1, not 0 and 5
        let records = vec![
            expense("2024-01-10", Category::Technology, 100.0),
            expense("2024-06-10", Category::Technology, 200.0),
        ];
        let forecast = forecast_next_month(&records);
        assert!((forecast.prediction_for(Category::Technology).unwrap() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_includes_every_category() {
        let records = vec![
            expense("2024-01-10", Category::Food, 100.0),
            expense("2024-02-10", Category::Food, 200.0),
            expense("2024-02-11", Category::Other, 999.0),
            expense("2024-01-11", Category::Transport, 50.0),
            expense("2024-02-11", Category::Transport, 50.0),
        ];
        let forecast = forecast_next_month(&records);

        let categories: Vec<Category> = forecast.predictions.iter().map(|p| p.category).collect();
        assert_eq!(
            categories,
            vec![Category::Food, Category::Other, Category::Transport]
        );
        assert!((forecast.prediction_for(Category::Food).unwrap() - 300.0).abs() < 1e-9);
        assert_eq!(forecast.prediction_for(Category::Other), Some(0.0));
        assert!((forecast.prediction_for(Category::Transport).unwrap() - 50.0).abs() < 1e-9);
        assert!((forecast.total - 350.0).abs() < 1e-9);
    }
}
