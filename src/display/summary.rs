//! Table rendering of the aggregates
//!
//! Produces terminal tables with tabled. Nothing here changes the data; the
//! empty category is only relabeled on screen.

use tabled::builder::Builder;
use tabled::settings::Style;

use super::report::{category_label, format_amount, format_bar, format_percentage};
use crate::reports::{ExpenseSummaryMatrix, OverviewReport, ParticipantBalances};

const BAR_WIDTH: usize = 20;

/// Category × participant table with row and column totals
pub fn format_matrix(matrix: &ExpenseSummaryMatrix, uncategorized_label: &str) -> String {
    let names: Vec<String> = matrix.names().into_iter().collect();

    let mut builder = Builder::default();

    let mut header = vec!["Category".to_string()];
    header.extend(names.iter().cloned());
    header.push("Total".to_string());
    builder.push_record(header);

    for row in matrix.rows() {
        let mut record = vec![category_label(&row.category, uncategorized_label).to_string()];
        record.extend(names.iter().map(|name| {
            row.amounts
                .get(name)
                .map(|amount| format_amount(*amount))
                .unwrap_or_else(|| "-".to_string())
        }));
        record.push(format_amount(row.total()));
        builder.push_record(record);
    }

    let mut footer = vec!["Total".to_string()];
    footer.extend(names.iter().map(|name| {
        let sum: f64 = matrix
            .rows()
            .iter()
            .filter_map(|row| row.amounts.get(name))
            .sum();
        format_amount(sum)
    }));
    footer.push(format_amount(matrix.totals_by_category().grand_total()));
    builder.push_record(footer);

    let mut table = builder.build();
    table.with(Style::rounded());
    format!("{} by category\n{}", matrix.amount_kind(), table)
}

/// Category totals with their share of the grand total
pub fn format_category_totals(matrix: &ExpenseSummaryMatrix, uncategorized_label: &str) -> String {
    let totals = matrix.totals_by_category();
    let grand_total = totals.grand_total();
    let scale = totals.iter().map(|(_, total)| total.abs()).fold(0.0, f64::max);

    let mut builder = Builder::default();
    builder.push_record(vec![
        "Category".to_string(),
        "Amount".to_string(),
        "Share".to_string(),
        String::new(),
    ]);

    for (category, total) in totals.iter() {
        let share = if grand_total != 0.0 {
            total / grand_total * 100.0
        } else {
            0.0
        };
        builder.push_record(vec![
            category_label(category, uncategorized_label).to_string(),
            format_amount(total),
            format_percentage(share),
            format_bar(total, scale, BAR_WIDTH),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Per-participant spent/paid/balance table
pub fn format_balances(balances: &ParticipantBalances) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec![
        "Name".to_string(),
        "Spent".to_string(),
        "Paid".to_string(),
        "Balance".to_string(),
    ]);

    for p in &balances.participants {
        builder.push_record(vec![
            p.name.clone(),
            format_amount(p.spent),
            format_amount(p.paid),
            format_amount(p.balance),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Per-transaction overview with spent and paid columns for each participant
pub fn format_overview(report: &OverviewReport) -> String {
    let mut builder = Builder::default();

    let mut header = vec![
        "Purpose".to_string(),
        "Amount".to_string(),
        "Date & Time".to_string(),
    ];
    header.extend(report.participants.iter().map(|n| format!("Spent {}", n)));
    header.extend(report.participants.iter().map(|n| format!("Paid {}", n)));
    header.push("Receipt".to_string());
    builder.push_record(header);

    for row in &report.rows {
        let mut record = vec![
            row.purpose.clone(),
            format_amount(row.total),
            row.date_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        ];
        record.extend(row.spent.iter().map(|a| format_amount(*a)));
        record.extend(row.paid.iter().map(|a| format_amount(*a)));
        record.push(row.receipt.clone().unwrap_or_default());
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
