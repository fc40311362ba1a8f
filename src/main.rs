use std::io;
use std::process;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use gudang::repl::{self, Control};
use gudang::storage::schema::Schema;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let Some(schema_path) = std::env::args().nth(1) else {
        println!("Must supply a database filename.");
        process::exit(1);
    };

    let mut schema = match Schema::open(&schema_path) {
        Ok(schema) => schema,
        Err(error) => {
            println!("Error opening schema: {error}");
            process::exit(1);
        }
    };

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(error) => {
            println!("Error initializing prompt: {error}");
            process::exit(1);
        }
    };

    loop {
        match editor.readline("db > ") {
            Ok(line) => {
                let _ = editor.add_history_entry(&line);
                match repl::process_line(&line, &mut schema, &mut io::stdout()) {
                    Ok(Control::Continue) => {}
                    Ok(Control::Exit) => shutdown(&mut schema),
                    Err(error) => {
                        println!("Error: {error}");
                        process::exit(1);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => shutdown(&mut schema),
            Err(error) => {
                println!("Error reading input: {error}");
                process::exit(1);
            }
        }
    }
}

/// Flush every table and leave. Only `.exit` (or end of input) reaches
/// disk; anything else loses unflushed pages.
fn shutdown(schema: &mut Schema) -> ! {
    if let Err(error) = schema.close() {
        println!("Error: {error}");
        process::exit(1);
    }
    process::exit(0);
}
