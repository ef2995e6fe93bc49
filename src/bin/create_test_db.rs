use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use money_handler::{CategoryName, NewTransaction, create_transaction, initialize_db};

/// A utility for creating a test database for the JSON API server of money_handler.
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
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let transactions = [
        (2300.0, "salary", date!(2021 - 01 - 01)),
        (-100.0, "general", date!(2021 - 01 - 01)),
        (-300.0, "rent", date!(2021 - 01 - 03)),
        (-42.5, "food", date!(2021 - 01 - 15)),
        (2300.0, "salary", date!(2021 - 02 - 01)),
        (-300.0, "rent", date!(2021 - 02 - 03)),
        (-200.0, "general", date!(2021 - 02 - 14)),
    ];

    let sql_transaction = conn.unchecked_transaction()?;

    for (amount, category, transaction_at) in transactions {
        create_transaction(
            NewTransaction::new(amount, CategoryName::new(category)?, transaction_at),
            &sql_transaction,
        )?;
    }

    sql_transaction.commit()?;

    println!("Success!");

    Ok(())
}
