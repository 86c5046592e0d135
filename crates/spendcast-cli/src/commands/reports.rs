//! Report and forecast command implementations

use anyhow::Result;
use chrono::NaiveDate;
use spendcast_core::{build_report, forecast_next_month, Category, Database, ReportFilter};

/// Parse `--category` values; an empty list means every category present
fn parse_category_args(names: &[String]) -> Result<Option<Vec<Category>>> {
    if names.is_empty() {
        return Ok(None);
    }
    let mut categories = Vec::new();
    for name in names {
        let category: Category = name.parse()?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    Ok(Some(categories))
}

pub fn cmd_report(
    db: &Database,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    categories: &[String],
) -> Result<()> {
    let categories = parse_category_args(categories)?;
    let records = db.list_expenses()?;

    let Some(filter) = ReportFilter::with_overrides(&records, from, to, categories) else {
        println!("No expenses recorded yet.");
        return Ok(());
    };

    let names: Vec<&str> = filter.categories.iter().map(|c| c.as_str()).collect();
    println!();
    println!("📊 Expense Report");
    println!("   Period: {} to {}", filter.start, filter.end);
    println!("   Categories: {}", names.join(", "));
    println!("   ─────────────────────────────────────────────");

    let Some(report) = build_report(&records, &filter) else {
        println!("   No data matches the selected filters.");
        return Ok(());
    };

    println!("   Total Expenses: {:.2}", report.total);
    println!("   Average Expense: {:.2}", report.average);
    println!();
    println!("   {:13} │ {:>10} │ {:>6}", "Category", "Amount", "%");
    println!("   ──────────────┼────────────┼───────");
    for total in &report.category_totals {
        println!(
            "   {:13} │ {:>10.2} │ {:>5.1}%",
            total.category, total.amount, total.percentage
        );
    }
    println!();

    Ok(())
}

pub fn cmd_forecast(db: &Database) -> Result<()> {
    let records = db.list_expenses()?;
    let forecast = forecast_next_month(&records);

    println!();
    println!("🔮 Next Month Expense Prediction (Category-wise)");
    if forecast.predictions.is_empty() {
        println!("   No expenses recorded yet.");
    }
    for prediction in &forecast.predictions {
        println!(
            "   {:13} {:>10.2}   ({} months of history)",
            prediction.category, prediction.amount, prediction.months_observed
        );
    }
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Predicted Total Expenses for Next Month: {:.2}",
        forecast.total
    );
    println!();

    Ok(())
}
