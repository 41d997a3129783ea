use std::io::{self, BufRead, Write};
use clap::{Parser, Subcommand};
use tracing::debug;
use vecsearch::{SearchResult, VecError, Vector, VectorStore};

/// One REPL line, parsed without a binary name.
#[derive(Debug, Parser)]
#[command(
    name = "vecsearch",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    Insert {
        #[arg(allow_hyphen_values = true)]
        id: String,
        #[arg(allow_hyphen_values = true)]
        metadata: String,
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<f32>,
    },
    Search {
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<f32>,
        #[arg(long = "k-top", allow_negative_numbers = true)]
        k_top: Option<i64>,
    },
    Get {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    List,
    Count,
}

/// Parse a command from the whitespace-separated words of a REPL line
pub fn parse_command_from_args(args: &[String]) -> Result<Command, VecError> {
    if args.is_empty() {
        return Err(VecError::InvalidArgument(
            "No command provided. Use: insert, search, get, list, count".to_string(),
        ));
    }

    let line = Line::try_parse_from(args)
        .map_err(|e| VecError::Parse(e.to_string().trim_end().to_string()))?;

    if let Command::Search { k_top: Some(k), .. } = line.command {
        if k < 0 {
            return Err(VecError::InvalidArgument(format!(
                "--k-top must not be negative, got {}", k
            )));
        }
    }

    Ok(line.command)
}

/// REPL mode - interactive session over an in-memory store
pub fn run_repl<R: BufRead, W: Write>(
    store: &mut VectorStore,
    default_top_k: usize,
    input: R,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "vecsearch - Exhaustive Vector Search")?;
    writeln!(out, "Type 'help' for commands, 'exit' or 'quit' to quit\n")?;

    let mut lines = input.lines();
    loop {
        write!(out, "vecsearch> ")?;
        out.flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(error)) => {
                eprintln!("Error reading input: {}", error);
                continue;
            }
            None => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "exit" || line == "quit" {
            writeln!(out, "Goodbye!")?;
            break;
        }

        if line == "help" {
            print_help(&mut out)?;
            continue;
        }

        let args: Vec<String> = line.split_whitespace().map(|s| s.to_string()).collect();

        let command = match parse_command_from_args(&args) {
            Ok(cmd) => cmd,
            Err(error) => {
                eprintln!("Error: {}", error);
                continue;
            }
        };

        execute_command(store, command, default_top_k, &mut out)?;
    }

    Ok(())
}

fn execute_command<W: Write>(
    store: &mut VectorStore,
    command: Command,
    default_top_k: usize,
    out: &mut W,
) -> io::Result<()> {
    debug!(?command, "execute");
    match command {
        Command::Get { id } => {
            match store.get(&id) {
                Some(vector) => writeln!(out, "Vector '{}' ({}): {:?}", id, vector.metadata, vector.values)?,
                None => eprintln!("Error: Vector '{}' not found", id),
            }
        }

        Command::List => {
            if store.is_empty() {
                writeln!(out, "Store is empty")?;
            } else {
                writeln!(out, "Stored vectors:")?;
                for vector in store.iter() {
                    writeln!(out, "  {} ({}): {:?}", vector.id, vector.metadata, vector.values)?;
                }
                writeln!(out, "Total: {} vectors", store.len())?;
            }
        }

        Command::Count => writeln!(out, "{}", store.len())?,

        Command::Insert { id, metadata, values } => {
            store.insert(Vector::new(id.clone(), values, metadata));
            writeln!(out, "Inserted vector with id: {}", id)?;
        }

        Command::Search { values, k_top } => {
            // Negative values were rejected while parsing
            let top_k = k_top.map_or(default_top_k, |k| usize::try_from(k).unwrap_or(0));
            let results = store.query(&values, top_k);
            if results.is_empty() {
                writeln!(out, "No results found")?;
            } else {
                print_results(out, &results)?;
            }
        }
    }

    Ok(())
}

/// Prints the ranking, one line per match under a fixed header.
pub fn print_results<W: Write>(out: &mut W, results: &[SearchResult]) -> io::Result<()> {
    writeln!(out, "Top Search Results:")?;
    for result in results {
        writeln!(out, "{}", result)?;
    }
    Ok(())
}

/// Demo mode - three toy "embeddings", queried for something like "Royalty"
pub fn run_demo<W: Write>(out: &mut W) -> io::Result<()> {
    let mut store = VectorStore::new();
    store.insert(Vector::new("1", vec![1.0, 0.1, 0.0], "King"));
    store.insert(Vector::new("2", vec![0.9, 0.2, 0.0], "Queen"));
    store.insert(Vector::new("3", vec![0.0, 0.8, 0.9], "Apple"));

    let matches = store.query(&[0.95, 0.15, 0.0], 2);
    print_results(out, &matches)
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Available commands:")?;
    writeln!(out, "  insert <id> <metadata> <v1> <v2> ... - Append a vector")?;
    writeln!(out, "  search <v1> <v2> ... [--k-top N]     - Search for similar vectors")?;
    writeln!(out, "  get <id>                             - Retrieve a vector by ID")?;
    writeln!(out, "  list                                 - List all vectors")?;
    writeln!(out, "  count                                - Show vector count")?;
    writeln!(out, "  help                                 - Show this help")?;
    writeln!(out, "  exit, quit                           - Exit the program")?;
    Ok(())
}
