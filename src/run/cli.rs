use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::Config;
use crate::db::Database;
use crate::models::{Category, TransactionType};
use crate::store::Store;

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "add" => cli_add(&args[2..], db),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "import" => cli_import(&args[2..], db, config),
        "balance" | "b" => cli_balance(db),
        "list" | "ls" => cli_list(db),
        "categories" => cli_categories(db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("cashflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("cashflow — income/outcome ledger");
    println!();
    println!("Usage: cashflow <command>");
    println!();
    println!("Commands:");
    println!("  add <title> <value> <income|outcome> <category>");
    println!("                                Record a transaction");
    println!("  delete <id>                   Delete a transaction");
    println!("  import <file.csv>             Import title,type,value,category rows");
    println!("                                (relative names resolve in the upload dir)");
    println!("  balance                       Print income, outcome and total");
    println!("  list                          List transactions with the balance");
    println!("  categories                    List categories");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  {:<30}Data directory override", crate::config::DATA_DIR_ENV);
    println!("  {:<30}Upload directory override", crate::config::UPLOAD_DIR_ENV);
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    let [title, value, kind, category, ..] = args else {
        anyhow::bail!("Usage: cashflow add <title> <value> <income|outcome> <category>");
    };

    let value = Decimal::from_str(value.trim())
        .with_context(|| format!("Failed to parse '{value}' as a value"))?;
    let kind = TransactionType::parse(kind)
        .ok_or_else(|| anyhow::anyhow!("Type must be 'income' or 'outcome', got '{kind}'"))?;

    let (txn, category) =
        crate::services::create_transaction_in_category(db, title, value, kind, category)?;
    println!(
        "Added #{} {} {} ${:.2} ({})",
        txn.id.unwrap_or(0),
        txn.kind,
        txn.title,
        txn.value,
        category.title
    );
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: cashflow delete <id>"))?;
    let id: i64 = raw
        .parse()
        .with_context(|| format!("Invalid transaction id: {raw}"))?;

    crate::services::delete_transaction(db, id)?;
    println!("Deleted transaction #{id}");
    Ok(())
}

fn cli_import(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let file_name = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: cashflow import <file.csv>"))?;

    let before = db.categories()?.len();
    let imported = crate::import::import_transactions(db, config, file_name)?;
    let created = db.categories()?.len() - before;

    println!(
        "Imported {} transactions ({created} new categories)",
        imported.len()
    );
    Ok(())
}

fn cli_balance(db: &Database) -> Result<()> {
    let balance = crate::services::get_balance(db)?;
    println!("  Income:   ${:.2}", balance.income);
    println!("  Outcome:  ${:.2}", balance.outcome);
    println!("  Total:    ${:.2}", balance.total);
    Ok(())
}

fn cli_list(db: &Database) -> Result<()> {
    let (txns, balance) = crate::services::list_transactions(db)?;
    let categories = db.categories()?;

    if txns.is_empty() {
        println!("No transactions");
    } else {
        println!(
            "{:<6} {:<24} {:<8} {:>12}  Category",
            "ID", "Title", "Type", "Value"
        );
        println!("{}", "─".repeat(64));
        for txn in &txns {
            let category = Category::find_by_id(&categories, txn.category_id)
                .map(|c| c.title.as_str())
                .unwrap_or("?");
            println!(
                "{:<6} {:<24} {:<8} {:>12.2}  {}",
                txn.id.unwrap_or(0),
                txn.title,
                txn.kind.as_str(),
                txn.signed_value(),
                category
            );
        }
    }

    println!();
    println!(
        "Income ${:.2}  Outcome ${:.2}  Total ${:.2}",
        balance.income, balance.outcome, balance.total
    );
    Ok(())
}

fn cli_categories(db: &Database) -> Result<()> {
    let categories = db.categories()?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!("{:<6} Title", "ID");
    println!("{}", "─".repeat(30));
    for cat in &categories {
        println!("{:<6} {}", cat.id.unwrap_or(0), cat.title);
    }
    Ok(())
}
