//! Command-line front end: fetches or parses class search pages and prints
//! JSON to stdout. Logs go to stderr and respect `RUST_LOG`.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rs_ucscclasses::{
    extract_options, CatalogClient, ClientOptions, RegistrationStatus, SearchMethod,
    SearchOptions, DEFAULT_BASE_URL,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "ucscclasses", version, about = "UCSC class search scraper")]
struct Cli {
    /// Class search endpoint
    #[arg(global = true, long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(global = true, long, default_value_t = 5)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List terms, subjects and GE categories
    Options {
        /// Parse a saved landing page instead of fetching (`-` for stdin)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Search classes in a term
    Search {
        #[arg(long)]
        term: String,
        #[arg(long, default_value = "")]
        subject: String,
        /// Catalog number, e.g. 13S
        #[arg(long, default_value = "")]
        number: String,
        /// Match the catalog number as a substring
        #[arg(long)]
        contains: bool,
        /// Only classes with open seats
        #[arg(long)]
        open_only: bool,
        /// GE category code
        #[arg(long, default_value = "")]
        ge: String,
        /// Title keyword
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Show a class detail page
    Details {
        /// Detail link, absolute or relative to the base URL
        url: String,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

fn client(cli: &Cli) -> rs_ucscclasses::Result<CatalogClient> {
    CatalogClient::new(ClientOptions {
        base_url: cli.base_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        ..ClientOptions::default()
    })
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Options { file: Some(path) } => {
            let result = if path.as_os_str() == "-" {
                extract_options(&mut io::stdin().lock())?
            } else {
                let mut file = File::open(path)?;
                extract_options(&mut file)?
            };
            print_json(&result)
        }
        Commands::Options { file: None } => print_json(&client(cli)?.fixed_data()?),
        Commands::Search {
            term,
            subject,
            number,
            contains,
            open_only,
            ge,
            title,
        } => {
            let search = SearchOptions {
                term: term.clone(),
                subject: subject.clone(),
                number: number.clone(),
                number_search_method: if *contains {
                    SearchMethod::Contains
                } else {
                    SearchMethod::Equal
                },
                registration_status: if *open_only {
                    RegistrationStatus::Open
                } else {
                    RegistrationStatus::All
                },
                ge: ge.clone(),
                title: title.clone(),
            };
            print_json(&client(cli)?.search(&search)?)
        }
        Commands::Details { url } => print_json(&client(cli)?.class_details(url)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
