//! Filtered expense reports
//!
//! A report is built from the full list of expenses and a filter (inclusive
//! date range plus a set of categories). It carries the matching rows, the
//! total and average amount, and per-category totals with their share of the
//! filtered spend for the category chart.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Expense};

/// Date range and category selection applied to the expense list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub categories: Vec<Category>,
}

impl ReportFilter {
    /// Filter covering everything recorded: earliest to latest date and every
    /// category present (in the order first recorded)
    ///
    /// Returns `None` when there are no records, in which case there is
    /// nothing to report on.
    pub fn defaults_for(records: &[Expense]) -> Option<Self> {
        let start = records.iter().map(|e| e.date).min()?;
        let end = records.iter().map(|e| e.date).max()?;

        Some(Self {
            start,
            end,
            categories: distinct_categories(records),
        })
    }

    /// Defaults for `records` with any explicitly chosen bounds applied on top
    pub fn with_overrides(
        records: &[Expense],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        categories: Option<Vec<Category>>,
    ) -> Option<Self> {
        let defaults = Self::defaults_for(records)?;
        Some(Self {
            start: start.unwrap_or(defaults.start),
            end: end.unwrap_or(defaults.end),
            categories: categories.unwrap_or(defaults.categories),
        })
    }

    /// Whether an expense falls inside the range and category selection
    pub fn matches(&self, expense: &Expense) -> bool {
        expense.date >= self.start
            && expense.date <= self.end
            && self.categories.contains(&expense.category)
    }
}

/// Spend for one category within a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
    /// Fraction of the report total (0.0 - 1.0)
    pub share: f64,
    /// `share` expressed as a percentage
    pub percentage: f64,
}

/// Result of applying a filter to the expense list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub expenses: Vec<Expense>,
    pub total: f64,
    pub average: f64,
    pub category_totals: Vec<CategoryTotal>,
}

impl Report {
    /// Total for a single category, if it appears in the report
    pub fn category_total(&self, category: Category) -> Option<f64> {
        self.category_totals
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
    }
}

/// Build a report over the expenses matching `filter`
///
/// Returns `None` when nothing matches; total and average are undefined for
/// an empty selection.
pub fn build_report(records: &[Expense], filter: &ReportFilter) -> Option<Report> {
    let expenses: Vec<Expense> = records
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();

    if expenses.is_empty() {
        return None;
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let average = total / expenses.len() as f64;

    let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
    for expense in &expenses {
        *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    let chart_total: f64 = by_category.values().sum();
    let category_totals = by_category
        .into_iter()
        .map(|(category, amount)| {
            let share = if chart_total != 0.0 {
                amount / chart_total
            } else {
                0.0
            };
            CategoryTotal {
                category,
                amount,
                share,
                percentage: share * 100.0,
            }
        })
        .collect();

    Some(Report {
        expenses,
        total,
        average,
        category_totals,
    })
}

/// Categories present in `records`, in the order they were first recorded
///
/// Order follows the lowest expense id per category, so a back-dated entry
/// does not move its category ahead of ones saved earlier. Ties keep the
/// order of `records`.
pub fn distinct_categories(records: &[Expense]) -> Vec<Category> {
    let mut seen: Vec<(i64, Category)> = Vec::new();
    for expense in records {
        match seen.iter_mut().find(|(_, c)| *c == expense.category) {
            Some(entry) => entry.0 = entry.0.min(expense.id),
            None => seen.push((expense.id, expense.category)),
        }
    }
    seen.sort_by_key(|(id, _)| *id);
    seen.into_iter().map(|(_, category)| category).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: i64, date: NaiveDate, category: Category, amount: f64) -> Expense {
        Expense {
            id,
            date,
            category,
            amount,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, date(2024, 1, 10), Category::Food, 50.0),
            expense(2, date(2024, 1, 20), Category::Transport, 20.0),
            expense(3, date(2024, 2, 5), Category::Food, 30.0),
            expense(4, date(2024, 3, 1), Category::Health, 200.0),
            expense(5, date(2024, 3, 31), Category::Entertainment, 60.0),
        ]
    }

    #[test]
    fn test_defaults_cover_all_records() {
        let filter = ReportFilter::defaults_for(&sample()).unwrap();
        assert_eq!(filter.start, date(2024, 1, 10));
        assert_eq!(filter.end, date(2024, 3, 31));
        assert_eq!(
            filter.categories,
            vec![
                Category::Food,
                Category::Transport,
                Category::Health,
                Category::Entertainment
            ]
        );

        let report = build_report(&sample(), &filter).unwrap();
        assert_eq!(report.expenses.len(), 5);
    }

    #[test]
    fn test_defaults_for_empty_records() {
        assert!(ReportFilter::defaults_for(&[]).is_none());
        assert!(ReportFilter::with_overrides(&[], Some(date(2024, 1, 1)), None, None).is_none());
    }

    #[test]
    fn test_with_overrides_keeps_unset_defaults() {
        let filter =
            ReportFilter::with_overrides(&sample(), Some(date(2024, 2, 1)), None, None).unwrap();
        assert_eq!(filter.start, date(2024, 2, 1));
        assert_eq!(filter.end, date(2024, 3, 31));
        assert_eq!(filter.categories.len(), 4);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = ReportFilter {
            start: date(2024, 1, 20),
            end: date(2024, 3, 1),
            categories: Category::ALL.to_vec(),
        };
        let report = build_report(&sample(), &filter).unwrap();
        let ids: Vec<i64> = report.expenses.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_filter_requires_both_predicates() {
        let records = sample();
        let filter = ReportFilter {
            start: date(2024, 1, 1),
            end: date(2024, 2, 28),
            categories: vec![Category::Food, Category::Health],
        };

        let report = build_report(&records, &filter).unwrap();
        let expected: Vec<Expense> = records
            .iter()
            .filter(|e| {
                e.date >= filter.start
                    && e.date <= filter.end
                    && filter.categories.contains(&e.category)
            })
            .cloned()
            .collect();
        assert_eq!(report.expenses, expected);
        assert_eq!(report.expenses.len(), 2);
    }

    #[test]
    fn test_no_match_returns_none() {
        let filter = ReportFilter {
            start: date(2025, 1, 1),
            end: date(2025, 12, 31),
            categories: Category::ALL.to_vec(),
        };
        assert!(build_report(&sample(), &filter).is_none());

        let filter = ReportFilter {
            start: date(2024, 1, 1),
            end: date(2024, 12, 31),
            categories: vec![],
        };
        assert!(build_report(&sample(), &filter).is_none());
    }

    #[test]
    fn test_total_and_average() {
        let filter = ReportFilter::defaults_for(&sample()).unwrap();
        let report = build_report(&sample(), &filter).unwrap();
        assert!((report.total - 360.0).abs() < 1e-9);
        assert!((report.average - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_totals_and_shares() {
        let records = vec![
            expense(1, date(2024, 1, 1), Category::Food, 50.0),
            expense(2, date(2024, 1, 2), Category::Food, 30.0),
            expense(3, date(2024, 1, 3), Category::Transport, 20.0),
        ];
        let filter = ReportFilter::defaults_for(&records).unwrap();
        let report = build_report(&records, &filter).unwrap();

        assert_eq!(report.category_totals.len(), 2);
        assert_eq!(report.category_total(Category::Food), Some(80.0));
        assert_eq!(report.category_total(Category::Transport), Some(20.0));
        assert_eq!(report.category_total(Category::Health), None);

        let food = &report.category_totals[0];
        assert_eq!(food.category, Category::Food);
        assert!((food.share - 0.8).abs() < 1e-9);
        assert!((food.percentage - 80.0).abs() < 1e-9);

        let transport = &report.category_totals[1];
        assert!((transport.share - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_distinct_categories_first_seen_order() {
        let records = vec![
            expense(1, date(2024, 1, 1), Category::Other, 1.0),
            expense(2, date(2024, 1, 2), Category::Food, 1.0),
            expense(3, date(2024, 1, 3), Category::Other, 1.0),
        ];
        assert_eq!(
            distinct_categories(&records),
            vec![Category::Other, Category::Food]
        );
    }

    #[test]
    fn test_distinct_categories_follow_insertion_order() {
        // Rows arrive sorted by date; the Health entry was saved first but
        // back-dated after the Food one
        let records = vec![
            expense(2, date(2024, 1, 1), Category::Food, 1.0),
            expense(1, date(2024, 2, 1), Category::Health, 1.0),
            expense(3, date(2024, 3, 1), Category::Food, 1.0),
        ];
        assert_eq!(
            distinct_categories(&records),
            vec![Category::Health, Category::Food]
        );

        let filter = ReportFilter::defaults_for(&records).unwrap();
        assert_eq!(filter.categories, vec![Category::Health, Category::Food]);
    }
}
