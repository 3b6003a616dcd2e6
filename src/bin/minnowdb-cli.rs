//! MinnowDB interactive shell
//!
//! Reads SQL statements from stdin (terminated by ';', possibly spanning
//! several lines) and dot-commands for catalog introspection, and renders
//! each result. All engine behavior lives in the library; this binary
//! only drives `Database` and formats output.

use minnowdb::types::{DataType, Value};
use minnowdb::{Database, QueryResult, Result, StorageError};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => interactive_mode(PathBuf::from("./minnowdb_data")),
        2 => match args[1].as_str() {
            "--version" | "-v" => {
                println!("MinnowDB v{}", VERSION);
                Ok(())
            }
            "--help" | "-h" => {
                print_help();
                Ok(())
            }
            path => interactive_mode(PathBuf::from(path)),
        },
        _ => {
            print_help();
            std::process::exit(2);
        }
    }
}

fn print_help() {
    println!(
        r#"
MinnowDB v{} - minimal embedded SQL engine

Usage:
  minnowdb-cli              Start the interactive shell (data dir: ./minnowdb_data)
  minnowdb-cli <data_dir>   Start the shell over the given data directory
  minnowdb-cli --version    Print version information
  minnowdb-cli --help       Print this help

Environment:
  RUST_LOG                  Engine log level (e.g. RUST_LOG=warn)
"#,
        VERSION
    );
}

fn interactive_mode(path: PathBuf) -> Result<()> {
    println!("MinnowDB v{}", VERSION);
    println!("Database: {}", path.display());
    println!("Type '.help' for help, '.exit' to quit\n");

    let mut db = Database::open(&path)?;

    let stdin = io::stdin();
    let mut buffer = String::new();
    let mut statement = String::new();

    loop {
        if statement.is_empty() {
            print!("minnowdb> ");
        } else {
            print!("       -> ");
        }
        io::stdout().flush().map_err(StorageError::Io)?;

        buffer.clear();
        let read = stdin
            .lock()
            .read_line(&mut buffer)
            .map_err(StorageError::Io)?;
        if read == 0 {
            break;
        }

        let input = buffer.trim();

        if input.starts_with('.') {
            if !statement.is_empty() {
                eprintln!("Warning: incomplete SQL statement discarded");
                statement.clear();
            }
            if !handle_meta_command(&db, input) {
                break;
            }
            continue;
        }

        if input.is_empty() {
            continue;
        }

        statement.push_str(input);
        statement.push(' ');

        if input.ends_with(';') {
            let result = db.execute(statement.trim());
            render_result(&result);
            statement.clear();
        }
    }

    Ok(())
}

/// Returns false when the shell should exit.
fn handle_meta_command(db: &Database, input: &str) -> bool {
    match input {
        ".exit" | ".quit" => {
            println!("Goodbye!");
            return false;
        }
        ".help" => print_interactive_help(),
        ".tables" => list_tables(db),
        ".describe" => eprintln!("Usage: .describe <table>"),
        cmd if cmd.starts_with(".describe ") => {
            describe_table(db, cmd[".describe ".len()..].trim());
        }
        _ => {
            eprintln!("Unknown command: {}", input);
            println!("Type '.help' for available commands");
        }
    }
    true
}

fn print_interactive_help() {
    println!(
        r#"
Commands:
  .help              Show this help
  .tables            List all tables
  .describe <table>  Show a table's schema and row count
  .exit, .quit       Exit the shell

SQL statements end with ';' and may span multiple lines:
  CREATE TABLE users (id INT, name VARCHAR(50), age INT);
  INSERT INTO users (id, name, age) VALUES (1, 'Alice', 30);
  SELECT name, age FROM users WHERE age > 26 AND id < 100;
"#
    );
}

fn list_tables(db: &Database) {
    let tables = db.list_tables();
    if tables.is_empty() {
        println!("No tables");
        return;
    }
    for table in tables {
        println!("  {}", table);
    }
}

fn describe_table(db: &Database, name: &str) {
    match db.describe_table(name) {
        Ok(info) => {
            println!("Table: {} ({} row(s))", info.name, info.row_count);
            let header = vec!["column".to_string(), "type".to_string()];
            let rows: Vec<Vec<String>> = info
                .columns
                .iter()
                .map(|column| {
                    let type_str = match (column.data_type, column.size) {
                        (DataType::Varchar, Some(size)) => format!("VARCHAR({})", size),
                        (data_type, _) => data_type.to_string(),
                    };
                    vec![column.name.clone(), type_str]
                })
                .collect();
            render_cells(&header, &rows);
        }
        Err(err) => eprintln!("Error: {}", err),
    }
}

fn render_result(result: &QueryResult) {
    if !result.success {
        // The message already reads "Error: <cause>".
        eprintln!("{}", result.message);
        return;
    }
    if result.columns.is_empty() {
        println!("{}", result.message);
        return;
    }

    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(Value::to_string).collect())
        .collect();
    render_cells(&result.columns, &rows);
    println!("{}", result.message);
}

/// Print a fixed-width table: header, separator, then one line per row.
fn render_cells(columns: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = columns.iter().map(|col| col.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    print_border(&widths, '┌', '┬', '┐');
    print_cells(columns, &widths);
    print_border(&widths, '├', '┼', '┤');
    for row in rows {
        print_cells(row, &widths);
    }
    print_border(&widths, '└', '┴', '┘');
}

fn print_border(widths: &[usize], left: char, mid: char, right: char) {
    print!("{}", left);
    for (i, width) in widths.iter().enumerate() {
        print!("{}", "─".repeat(width + 2));
        if i < widths.len() - 1 {
            print!("{}", mid);
        }
    }
    println!("{}", right);
}

fn print_cells(cells: &[String], widths: &[usize]) {
    print!("│");
    for (i, cell) in cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(10);
        print!(" {:width$} │", cell, width = width);
    }
    println!();
}
