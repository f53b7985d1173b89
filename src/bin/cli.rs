//! iqdb CLI Client
//!
//! Command-line interface for querying an iqdb server.

use std::fs::File;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use iqdb::{Client, Config, QueryFlags};

/// iqdb CLI
#[derive(Parser, Debug)]
#[command(name = "iqdb-cli")]
#[command(about = "CLI for the iqdb image-similarity database")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:5566")]
    server: String,

    /// Socket read timeout in milliseconds (0 disables)
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query a database for similar images
    Query {
        /// Database ID to query
        db_id: u32,

        /// Path of a local image to upload, or a filename known to the server
        file: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        max_results: u32,

        /// Upload the file contents instead of sending its name
        #[arg(short, long)]
        upload: bool,

        /// Query by sketch rather than photograph
        #[arg(long)]
        sketch: bool,

        /// Ignore color information
        #[arg(long)]
        grayscale: bool,
    },

    /// Number of images in a database
    Count {
        /// Database ID
        db_id: u32,
    },

    /// List the loaded databases
    DbList,

    /// Send a raw protocol line and print the coded reply
    Raw {
        /// The command line to send verbatim
        line: String,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder()
        .server_addr(args.server)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let mut client = Client::connect_with(&config)?;

    match args.command {
        Commands::Query {
            db_id,
            file,
            max_results,
            upload,
            sketch,
            grayscale,
        } => {
            let mut flags = QueryFlags::NONE;
            if sketch {
                flags |= QueryFlags::SKETCH;
            }
            if grayscale {
                flags |= QueryFlags::GRAYSCALE;
            }

            let results = if upload {
                let mut f = File::open(&file)?;
                let size = f.metadata()?.len();
                client.query_blob(db_id, flags, max_results, size, &mut f)?
            } else {
                client.query(db_id, flags, max_results, &file)?
            };

            if results.is_empty() {
                println!("no matches");
            }
            for r in results {
                println!(
                    "{:x}\tscore={:.2}\t{}x{}",
                    r.image_id, r.score, r.width, r.height
                );
            }
        }

        Commands::Count { db_id } => {
            println!("{}", client.count(db_id)?);
        }

        Commands::DbList => {
            for entry in client.db_list()? {
                println!("{}\t{}", entry.db_id, entry.filename);
            }
        }

        Commands::Raw { line } => {
            for response in client.cmd(&line)? {
                println!("{:03} {}", response.code, response.content);
            }
        }
    }

    client.quit();
    Ok(())
}
