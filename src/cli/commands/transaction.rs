use crate::cli::context::{parse_date, usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::filter::{KindFilter, TransactionFilter};
use crate::core::services::TransactionService;
use crate::currency::{format_currency, format_date};
use crate::domain::{Amount, Transaction, TransactionDraft, TransactionKind};
use crate::storage::TransactionStore;

const ADD_USAGE: &str = "add <income|expense> <amount> <category> <description> [YYYY-MM-DD]";
const EDIT_USAGE: &str =
    "edit <id> <income|expense> <amount> <category> <description> <YYYY-MM-DD>";
const REMOVE_USAGE: &str = "remove <id>";
const LIST_USAGE: &str = "list [--search text] [--category name] [--type all|income|expense]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Replace a transaction's fields", EDIT_USAGE, cmd_edit),
        CommandEntry::new("remove", "Delete a transaction", REMOVE_USAGE, cmd_remove),
        CommandEntry::new("list", "List transactions, newest first", LIST_USAGE, cmd_list),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (fields, date) = match args {
        [kind, amount, category, description] => ([*kind, *amount, *category, *description], None),
        [kind, amount, category, description, date] => {
            ([*kind, *amount, *category, *description], Some(parse_date(date)?))
        }
        _ => return Err(usage_error(ADD_USAGE)),
    };
    let date = date.unwrap_or_else(|| context.clock.today());
    let draft = parse_draft(fields, date)?;
    warn_unregistered(context, &draft);

    let transaction =
        TransactionService::record(&mut context.store, draft, context.clock.as_ref())?;
    output::success(format!(
        "Recorded {} [{}]",
        describe(context, &transaction),
        short_id(&transaction)
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference, kind, amount, category, description, date] = args else {
        return Err(usage_error(EDIT_USAGE));
    };
    let id = TransactionService::resolve(&context.store, reference)?.id;
    let draft = parse_draft([*kind, *amount, *category, *description], parse_date(date)?)?;
    warn_unregistered(context, &draft);

    let transaction = TransactionService::edit(&mut context.store, id, draft)?;
    output::success(format!(
        "Updated {} [{}]",
        describe(context, &transaction),
        short_id(&transaction)
    ));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = args else {
        return Err(usage_error(REMOVE_USAGE));
    };
    let found = TransactionService::resolve(&context.store, reference)?;
    let (id, label) = (found.id, describe(context, found));

    if !context.confirm(&format!("Delete {label}?"))? {
        output::info("Nothing deleted.");
        return Ok(());
    }
    TransactionService::delete(&mut context.store, id)?;
    output::success(format!("Deleted {label}"));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = parse_filter(args)?;
    let matching = filter.apply(context.store.list());
    if matching.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }

    let settings = context.format_settings();
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Category").truncated(18),
        TableColumn::left("Description").truncated(28),
        TableColumn::right("Amount"),
    ]);
    for transaction in &matching {
        table.push(vec![
            short_id(transaction),
            format_date(transaction.date),
            transaction.kind.to_string(),
            format!(
                "{} {}",
                context.categories.icon_for(&transaction.category),
                transaction.category
            ),
            transaction.description.clone(),
            format!(
                "{}{}",
                transaction.kind.sign(),
                format_currency(transaction.amount, &settings)
            ),
        ]);
    }
    output::plain(table.render());
    output::info(format!(
        "{} of {} transactions",
        matching.len(),
        context.store.list().len()
    ));
    Ok(())
}

fn parse_draft(
    fields: [&str; 4],
    date: chrono::NaiveDate,
) -> Result<TransactionDraft, CommandError> {
    let [kind, amount, category, description] = fields;
    let kind: TransactionKind = kind.parse()?;
    let amount: Amount = amount.parse()?;
    Ok(TransactionDraft::new(
        kind,
        amount,
        category.trim(),
        description.trim(),
        date,
    ))
}

fn parse_filter(args: &[&str]) -> Result<TransactionFilter, CommandError> {
    let mut filter = TransactionFilter::new();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| CommandError::InvalidArguments(format!("`{flag}` needs a value")))?;
        filter = match *flag {
            "--search" => filter.with_search(*value),
            "--category" => filter.with_category(*value),
            "--type" => filter.with_kind(value.parse::<KindFilter>()?),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{other}`; usage: {LIST_USAGE}"
                )))
            }
        };
    }
    Ok(filter)
}

fn warn_unregistered(context: &ShellContext, draft: &TransactionDraft) {
    if !context.categories.accepts(draft.kind, &draft.category) {
        output::warning(format!(
            "`{}` is not a registered {} category; it will use the default icon and color.",
            draft.category, draft.kind
        ));
    }
}

fn describe(context: &ShellContext, transaction: &Transaction) -> String {
    format!(
        "{} {} {}{} on {}",
        transaction.kind,
        transaction.category,
        transaction.kind.sign(),
        format_currency(transaction.amount, &context.format_settings()),
        format_date(transaction.date)
    )
}

fn short_id(transaction: &Transaction) -> String {
    let mut short = transaction.id.simple().to_string();
    short.truncate(8);
    short
}
