//! Stockroom CLI: inventory tracker for a small shop.

mod shell;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::{style, Term};
use tracing_subscriber::EnvFilter;

use stockroom_core::auth::StaticCredentials;
use stockroom_core::config::{InventoryConfig, Product};
use stockroom_core::error::AddOutcome;
use stockroom_core::output::format_listing;
use stockroom_core::session::Session;
use stockroom_core::store::ProductStore;

use shell::{run_shell, TermPrompt};

#[derive(Parser)]
#[command(
    name = "stockroom",
    about = "Stockroom - Keep track of stock, prices and categories for a small shop"
)]
struct Cli {
    /// Product file to read and write [default: products.json]
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Log store activity to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Login {
    /// Account to log in as
    #[arg(short, long)]
    username: String,

    /// Password; prompted for when omitted
    #[arg(short, long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive login screen
    Shell,

    /// Print every product
    List {
        #[command(flatten)]
        login: Login,

        /// Print JSON instead of listing lines
        #[arg(long)]
        json: bool,
    },

    /// Find products whose name or category contains the query
    Search {
        query: String,

        #[command(flatten)]
        login: Login,

        /// Print JSON instead of listing lines
        #[arg(long)]
        json: bool,
    },

    /// Add a product (admin only)
    Add {
        name: String,
        category: String,
        #[arg(allow_hyphen_values = true)]
        stock: String,
        #[arg(allow_hyphen_values = true)]
        price: String,

        #[command(flatten)]
        login: Login,
    },

    /// Remove every product with this name, ignoring case (admin only)
    Remove {
        name: String,

        #[command(flatten)]
        login: Login,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = InventoryConfig {
        products_path: cli
            .data
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| InventoryConfig::default().products_path),
        ..Default::default()
    };

    if let Err(e) = run(cli.command, &config) {
        eprintln!("{} {e}", style("error:").red().bold());
        std::process::exit(1);
    }
}

/// Route log records to stderr. `--verbose` wins over `RUST_LOG`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &InventoryConfig) -> CliResult {
    let store = ProductStore::from_config(config)?;
    let mut session = Session::new(StaticCredentials::builtin(), store);

    match command {
        Commands::Shell => {
            run_shell(&mut session, &mut TermPrompt::default())?;
        }
        Commands::List { login, json } => {
            log_in(&mut session, &login)?;
            print_products(session.products().iter().collect(), json)?;
        }
        Commands::Search { query, login, json } => {
            log_in(&mut session, &login)?;
            print_products(session.search(&query)?, json)?;
        }
        Commands::Add {
            name,
            category,
            stock,
            price,
            login,
        } => {
            log_in(&mut session, &login)?;
            match session.add(&name, &category, &stock, &price)? {
                AddOutcome::Added => {
                    println!("{} {name}", style("Added").green().bold());
                }
                rejected => return Err(rejected.to_string().into()),
            }
        }
        Commands::Remove { name, login } => {
            log_in(&mut session, &login)?;
            let outcome = session.remove(&name)?;
            if outcome.is_noop() {
                println!("No product named '{name}'");
            } else {
                println!(
                    "{} {} product(s) named '{name}'",
                    style("Removed").green().bold(),
                    outcome.removed
                );
            }
        }
    }
    Ok(())
}

fn log_in(session: &mut Session<StaticCredentials>, login: &Login) -> CliResult {
    let password = match &login.password {
        Some(password) => password.clone(),
        None => {
            let term = Term::stderr();
            term.write_str("Password: ")?;
            term.read_secure_line()?
        }
    };
    session.login(&login.username, &password)?;
    Ok(())
}

fn print_products(products: Vec<&Product>, json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
    } else {
        print!("{}", format_listing(products));
    }
    Ok(())
}
