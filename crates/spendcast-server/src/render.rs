//! HTML rendering for the expense page
//!
//! The markup is assembled by hand; every user-supplied string goes through
//! [`escape_html`].

use std::f64::consts::PI;

use chrono::NaiveDate;

use spendcast_core::{
    Category, CategoryTotal, Forecast, Report, ReportFilter, AMOUNT_STEP, MIN_AMOUNT,
};

/// One-shot message shown after a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Notice {
    Saved,
    Deleted,
}

impl Notice {
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "saved" => Some(Self::Saved),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Redirect target carrying this notice
    pub fn location(&self) -> &'static str {
        match self {
            Self::Saved => "/?notice=saved",
            Self::Deleted => "/?notice=deleted",
        }
    }
}

/// Everything the page needs, computed fresh per request
pub(crate) struct PageView {
    pub notice: Option<Notice>,
    /// Default for the entry form's date picker
    pub today: NaiveDate,
    /// Categories present in the store, offered by the filter
    pub available_categories: Vec<Category>,
    /// None when no expenses are recorded
    pub filter: Option<ReportFilter>,
    /// None when the filter matches nothing
    pub report: Option<Report>,
    pub forecast: Forecast,
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
h1 { font-size: 1.6rem; }
h2 { font-size: 1.2rem; margin-top: 2rem; }
label { display: block; margin: 0.6rem 0 0.2rem; }
input, select { padding: 0.3rem; }
button { margin-top: 0.8rem; padding: 0.4rem 0.9rem; cursor: pointer; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: 0.3rem 0.5rem; text-align: left; }
td.num, th.num { text-align: right; }
.banner { padding: 0.6rem 0.9rem; border-radius: 4px; margin: 0.6rem 0; }
.success { background: #e6f4ea; }
.warning { background: #fff4e5; }
.info { background: #e8f0fe; }
.error { background: #fdecea; }
.legend { list-style: none; padding: 0; }
.swatch { display: inline-block; width: 0.8rem; height: 0.8rem; margin-right: 0.4rem; }
"#;

/// Escape text for inclusion in HTML content or attribute values
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn category_color(category: Category) -> &'static str {
    match category {
        Category::Food => "#4e79a7",
        Category::Transport => "#f28e2b",
        Category::Entertainment => "#e15759",
        Category::Technology => "#76b7b2",
        Category::Health => "#59a14f",
        Category::Other => "#edc948",
    }
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Smart Expense Tracker</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        STYLE, body
    )
}

fn banner(kind: &str, message: &str) -> String {
    format!(
        "<div class=\"banner {}\">{}</div>\n",
        kind,
        escape_html(message)
    )
}

/// Render the full expense page
pub(crate) fn page(view: &PageView) -> String {
    let mut body = String::new();

    body.push_str("<h1>Smart Expense Tracker</h1>\n");
    body.push_str(
        "<p>Record your daily expenses, analyze them, and visualize your spending!</p>\n",
    );

    body.push_str(
        "<form method=\"post\" action=\"/expenses/delete-all\">\
         <button type=\"submit\">Delete All Expenses</button></form>\n",
    );
    match view.notice {
        Some(Notice::Deleted) => body.push_str(&banner("warning", "All expenses have been deleted!")),
        Some(Notice::Saved) => body.push_str(&banner("success", "Expense saved to database!")),
        None => {}
    }

    body.push_str(&entry_form(view.today));

    match (&view.filter, &view.report) {
        (None, _) => body.push_str(&banner("warning", "No expenses recorded yet.")),
        (Some(filter), report) => {
            body.push_str(&filter_form(filter, &view.available_categories));
            match report {
                Some(report) => body.push_str(&report_section(report)),
                None => body.push_str(&banner("warning", "No data matches the selected filters.")),
            }
        }
    }

    body.push_str(&forecast_section(&view.forecast));

    document(&body)
}

/// Render a page that only carries an error banner
pub(crate) fn error_page(message: &str) -> String {
    let mut body = String::new();
    body.push_str("<h1>Smart Expense Tracker</h1>\n");
    body.push_str(&banner("error", message));
    body.push_str("<p><a href=\"/\">Back to the tracker</a></p>\n");
    document(&body)
}

fn entry_form(today: NaiveDate) -> String {
    let mut html = String::new();
    html.push_str("<h2>Add a New Expense</h2>\n");
    html.push_str("<form method=\"post\" action=\"/expenses\">\n");

    html.push_str("<label for=\"category\">Expense Category</label>\n");
    html.push_str("<select id=\"category\" name=\"category\">\n");
    for category in Category::ALL {
        html.push_str(&format!(
            "<option value=\"{0}\">{0}</option>\n",
            category.as_str()
        ));
    }
    html.push_str("</select>\n");

    html.push_str(&format!(
        "<label for=\"amount\">Amount</label>\n\
         <input id=\"amount\" name=\"amount\" type=\"number\" min=\"{0}\" step=\"{1}\" value=\"{0}\" required>\n",
        MIN_AMOUNT, AMOUNT_STEP
    ));

    html.push_str(&format!(
        "<label for=\"date\">Date</label>\n\
         <input id=\"date\" name=\"date\" type=\"date\" value=\"{}\" required>\n",
        today.format("%Y-%m-%d")
    ));

    html.push_str("<button type=\"submit\">Save Expense</button>\n</form>\n");
    html
}

fn filter_form(filter: &ReportFilter, available: &[Category]) -> String {
    let mut html = String::new();
    html.push_str("<h2>Filter and Analyze</h2>\n");
    html.push_str("<form method=\"get\" action=\"/\">\n");
    html.push_str("<input type=\"hidden\" name=\"filtered\" value=\"1\">\n");

    html.push_str(&format!(
        "<label for=\"start\">Start Date</label>\n\
         <input id=\"start\" name=\"start\" type=\"date\" value=\"{}\">\n",
        filter.start.format("%Y-%m-%d")
    ));
    html.push_str(&format!(
        "<label for=\"end\">End Date</label>\n\
         <input id=\"end\" name=\"end\" type=\"date\" value=\"{}\">\n",
        filter.end.format("%Y-%m-%d")
    ));

    html.push_str("<label for=\"filter-categories\">Select Categories</label>\n");
    html.push_str(&format!(
        "<select id=\"filter-categories\" name=\"category\" multiple size=\"{}\">\n",
        available.len().max(1)
    ));
    for category in available {
        let selected = if filter.categories.contains(category) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            category.as_str(),
            selected
        ));
    }
    html.push_str("</select>\n");

    html.push_str("<button type=\"submit\">Apply</button>\n</form>\n");
    html
}

fn report_section(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("<h2>Expense List</h2>\n");
    html.push_str(
        "<table>\n<thead><tr><th>ID</th><th>Date</th><th>Category</th>\
         <th class=\"num\">Amount</th></tr></thead>\n<tbody>\n",
    );
    for expense in &report.expenses {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{:.2}</td></tr>\n",
            expense.id,
            expense.date.format("%Y-%m-%d"),
            expense.category,
            expense.amount
        ));
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str(&banner(
        "info",
        &format!("Total Expenses: {:.2}", report.total),
    ));
    html.push_str(&banner(
        "info",
        &format!("Average Expense: {:.2}", report.average),
    ));

    html.push_str(&pie_chart(&report.category_totals));
    html
}

fn point_on_circle(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

/// Pie chart of category shares as inline SVG, with a legend
pub(crate) fn pie_chart(totals: &[CategoryTotal]) -> String {
    const CX: f64 = 110.0;
    const CY: f64 = 110.0;
    const R: f64 = 100.0;

    let mut svg = String::new();
    svg.push_str("<h2>Filtered Expenses by Category</h2>\n");
    svg.push_str(
        "<svg width=\"220\" height=\"220\" viewBox=\"0 0 220 220\" role=\"img\" \
         aria-label=\"Filtered Expenses by Category\">\n",
    );

    // Start at twelve o'clock and go clockwise
    let mut angle = -PI / 2.0;
    for slice in totals.iter().filter(|s| s.share > 0.0) {
        let color = category_color(slice.category);
        let sweep = slice.share * 2.0 * PI;

        if slice.share >= 0.9999 {
            svg.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>\n",
                CX, CY, R, color
            ));
        } else {
            let (x1, y1) = point_on_circle(CX, CY, R, angle);
            let (x2, y2) = point_on_circle(CX, CY, R, angle + sweep);
            let large_arc = if sweep > PI { 1 } else { 0 };
            svg.push_str(&format!(
                "<path d=\"M {:.3} {:.3} L {:.3} {:.3} A {} {} 0 {} 1 {:.3} {:.3} Z\" fill=\"{}\"/>\n",
                CX, CY, x1, y1, R, R, large_arc, x2, y2, color
            ));
        }

        let (lx, ly) = point_on_circle(CX, CY, R * 0.6, angle + sweep / 2.0);
        svg.push_str(&format!(
            "<text x=\"{:.3}\" y=\"{:.3}\" font-size=\"11\" text-anchor=\"middle\">{:.1}%</text>\n",
            lx, ly, slice.percentage
        ));

        angle += sweep;
    }
    svg.push_str("</svg>\n");

    svg.push_str("<ul class=\"legend\">\n");
    for slice in totals {
        svg.push_str(&format!(
            "<li><span class=\"swatch\" style=\"background: {}\"></span>{}: {:.2} ({:.1}%)</li>\n",
            category_color(slice.category),
            slice.category,
            slice.amount,
            slice.percentage
        ));
    }
    svg.push_str("</ul>\n");
    svg
}

fn forecast_section(forecast: &Forecast) -> String {
    let mut html = String::new();
    html.push_str("<h2>Next Month Expense Prediction (Category-wise)</h2>\n");
    for prediction in &forecast.predictions {
        html.push_str(&banner(
            "info",
            &format!("{}: {:.2}", prediction.category, prediction.amount),
        ));
    }
    html.push_str(&banner(
        "success",
        &format!(
            "Predicted Total Expenses for Next Month: {:.2}",
            forecast.total
        ),
    ));
    html
}
