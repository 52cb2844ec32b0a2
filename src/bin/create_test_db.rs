use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Date, macros::date};

use expense_tracker::{Database, Expense, replace_expenses_for_date};

/// A utility for creating a test database for the expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let database = Database::new(output_path);
    database.initialize()?;

    println!("Creating test expenses...");

    for (expense_date, expenses) in sample_expenses() {
        let count = replace_expenses_for_date(expense_date, &expenses, &database)?;
        println!("Added {count} expenses for {expense_date}");
    }

    println!("Success!");

    Ok(())
}

fn sample_expenses() -> Vec<(Date, Vec<Expense>)> {
    let day = |expense_date: Date, rows: &[(f64, &str, Option<&str>)]| {
        let expenses = rows
            .iter()
            .map(|&(amount, category, notes)| {
                Expense::new(expense_date, amount, category).notes(notes)
            })
            .collect();

        (expense_date, expenses)
    };

    vec![
        day(
            date!(2024 - 08 - 01),
            &[
                (1200.0, "Rent", Some("Monthly rent payment")),
                (45.5, "Food", Some("Groceries")),
            ],
        ),
        day(
            date!(2024 - 08 - 02),
            &[
                (12.0, "Food", Some("Lunch")),
                (30.0, "Shopping", Some("New shirt")),
                (15.0, "Entertainment", Some("Movie ticket")),
                (8.5, "Food", Some("Coffee and snacks")),
                (60.0, "Other", Some("Phone bill")),
                (22.0, "Food", None),
            ],
        ),
        day(
            date!(2024 - 08 - 03),
            &[
                (75.0, "Shopping", Some("Shoes")),
                (18.0, "Food", Some("Dinner")),
            ],
        ),
        day(
            date!(2024 - 08 - 05),
            &[(40.0, "Entertainment", Some("Concert"))],
        ),
    ]
}
