use std::path::PathBuf;

use crate::analytics::CategoryReport;
use crate::cli::context::{usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{ExportService, SummaryService};
use crate::core::utils::PathResolver;
use crate::currency::{format_balance, format_currency, format_month, FormatSettings};
use crate::domain::{Displayable, TransactionKind};
use crate::errors::TrackerError;

const BAR_WIDTH: usize = 20;
const UNREGISTERED_MARK: &str = "*";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show balance and latest month totals",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "analytics",
            "Show category breakdown and monthly trend",
            "analytics [--json]",
            cmd_analytics,
        ),
        CommandEntry::new(
            "categories",
            "List registered categories",
            "categories [income|expense]",
            cmd_categories,
        ),
        CommandEntry::new(
            "export",
            "Write all transactions and categories to a JSON file",
            "export [path]",
            cmd_export,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let settings = context.format_settings();
    let stats = SummaryService::dashboard(&context.store);

    output::section("Summary");
    output::plain(format!("  Balance      : {}", format_balance(stats.balance, &settings)));
    match stats.latest_month {
        Some(month) => {
            output::plain(format!("  Latest month : {}", format_month(month)));
            output::plain(format!(
                "  Income       : {}",
                format_currency(stats.latest_income, &settings)
            ));
            output::plain(format!(
                "  Expenses     : {}",
                format_currency(stats.latest_expenses, &settings)
            ));
        }
        None => output::plain("  Latest month : none"),
    }
    output::plain(format!("  Transactions : {}", stats.transaction_count));
    Ok(())
}

fn cmd_analytics(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let analytics = SummaryService::analytics(&context.store);
    match args {
        [] => {}
        ["--json"] => {
            let json = serde_json::to_string_pretty(&analytics).map_err(TrackerError::from)?;
            output::plain(json);
            return Ok(());
        }
        _ => return Err(usage_error("analytics [--json]")),
    }

    let settings = context.format_settings();
    output::section("Totals");
    output::plain(format!("  Income   : {}", format_currency(analytics.total_income, &settings)));
    output::plain(format!("  Expenses : {}", format_currency(analytics.total_expenses, &settings)));
    output::plain(format!("  Balance  : {}", format_balance(analytics.balance, &settings)));

    output::section("By category");
    let report = CategoryReport::build(&analytics, &context.categories);
    if report.is_empty() {
        output::info("No data to display.");
    } else {
        output::plain(category_table(&report, &settings).render());
        if report.rows.iter().any(|row| !row.registered) {
            output::hint(format!("{UNREGISTERED_MARK} not a registered category"));
        }
    }

    output::section("Monthly trend");
    if analytics.monthly_trend.is_empty() {
        output::info("No data to display.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Month"),
            TableColumn::right("Income"),
            TableColumn::right("Expenses"),
            TableColumn::right("Net"),
        ]);
        for bucket in &analytics.monthly_trend {
            table.push(vec![
                format_month(bucket.month),
                format_currency(bucket.income, &settings),
                format_currency(bucket.expenses, &settings),
                format_balance(bucket.net(), &settings),
            ]);
        }
        output::plain(table.render());
    }
    Ok(())
}

fn category_table(report: &CategoryReport, settings: &FormatSettings) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Category").truncated(22),
        TableColumn::right("Amount"),
        TableColumn::left("Share"),
    ]);
    for row in &report.rows {
        let filled = (row.share / 100.0 * BAR_WIDTH as f64).round() as usize;
        let mark = if row.registered { "" } else { UNREGISTERED_MARK };
        table.push(vec![
            format!("{} {}{mark}", row.icon, row.name),
            format_currency(row.amount, settings),
            "#".repeat(filled.min(BAR_WIDTH)),
        ]);
    }
    table
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args {
        [] => None,
        [kind] => Some(kind.parse::<TransactionKind>()?),
        _ => return Err(usage_error("categories [income|expense]")),
    };

    output::section("Categories");
    for category in context
        .categories
        .all()
        .iter()
        .filter(|category| kind.map_or(true, |kind| category.kind == kind))
    {
        output::plain(format!("  {:<32} {}", category.display_label(), category.color));
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let file_name = ExportService::file_name(context.clock.today());
    let path = match args {
        [] => PathResolver::export_dir_in(context.config_manager.base()).join(file_name),
        [target] => {
            let target = PathBuf::from(*target);
            if target.is_dir() {
                target.join(file_name)
            } else {
                target
            }
        }
        _ => return Err(usage_error("export [path]")),
    };

    let snapshot = ExportService::snapshot(&context.store, &context.categories);
    ExportService::write_to(&snapshot, &path)?;
    output::success(format!(
        "Exported {} transactions to {}",
        snapshot.transactions.len(),
        path.display()
    ));
    Ok(())
}
