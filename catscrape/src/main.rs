use clap::ArgMatches;
use catscrape_core::data::Database;
use catscrape_core::pipeline::{ScrapeOptions, execute_scrape, generate_scrape_report};
use catscrape_core::print_banner;
use colored::Colorize;
use commands::command_argument_builder;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    match chosen_command.subcommand() {
        Some(("init", primary_command)) => handle_init(primary_command),
        Some(("scrape", primary_command)) => handle_scrape(primary_command, quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

// Handler functions
fn handle_init(args: &ArgMatches) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Setting up catscrape...");

    let config_path = args.get_one::<String>("PATH").unwrap();
    let force = args.get_flag("force");
    let expanded_config_dir = shellexpand::tilde(config_path);
    let config_dir = Path::new(expanded_config_dir.as_ref());
    let db_loc = config_dir.join("catscrape.db");
    let db_path = db_loc.as_path();

    if Database::exists(db_path) && !force {
        spinner.println(format!(
            "[WARNING] A database already exists at {}",
            db_path.display()
        ));
        spinner.println("This operation will overwrite it.");
        spinner.println("Do you want to continue? [y/N]: ");
        io::stdout().flush().unwrap();

        let mut response = String::new();
        io::stdin().read_line(&mut response).unwrap();
        let response = response.trim().to_lowercase();

        if response != "y" && response != "yes" {
            spinner.finish_with_message("Initialization cancelled.");
            return;
        }
    }

    std::fs::create_dir_all(config_dir).expect("Failed to create config directory");
    if Database::exists(db_path) {
        spinner.set_message("Deleting existing database");
        Database::drop(db_path);
    }

    spinner.set_message(format!("Initializing database at: {}", db_path.display()));
    Database::new(db_path).expect("Failed to create database");

    spinner.finish_with_message(format!(
        r#"
    ✓ Catscrape initialization complete!
    ✓ Config directory: {}
    ✓ Database: {}
    "#,
        config_dir.display(),
        db_path.display()
    ));
}

async fn handle_scrape(sub_matches: &ArgMatches, quiet: bool) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<Url>("url").unwrap();
    let page_size = sub_matches.get_one::<usize>("page-size").unwrap();
    let database = sub_matches.get_one::<String>("database").unwrap();
    let output_dir = sub_matches.get_one::<PathBuf>("output-dir");
    let no_snapshots = sub_matches.get_flag("no-snapshots");

    let expanded_db = shellexpand::tilde(database);
    let db_path = PathBuf::from(expanded_db.as_ref());
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        eprintln!("✗ Cannot create {}: {}", parent.display(), e);
        std::process::exit(1);
    }

    let host = url.host_str().unwrap_or("unknown");
    if !quiet {
        println!("Scraping catalogue on {}", host.bold());
        println!("Page size: {}", page_size);
        println!("Database: {}\n", db_path.display());
    }

    let output_dir = if no_snapshots {
        None
    } else {
        Some(output_dir.cloned().unwrap_or_else(|| PathBuf::from(".")))
    };

    let options = ScrapeOptions {
        base_url: url.as_str().trim_end_matches('/').to_string(),
        page_size: *page_size,
        database: db_path,
        output_dir,
        show_progress_bars: !quiet,
    };

    match execute_scrape(options).await {
        Ok(summary) => {
            if !quiet {
                print!("\n{}", generate_scrape_report(&summary.records));
            }
            println!(
                "\n{} {} links, {} products scraped, {} rows written",
                "✓ Scrape complete!".green(),
                summary.links_found,
                summary.products_scraped(),
                summary.rows_written
            );
            if summary.products_scraped() < summary.links_found {
                println!(
                    "  {} {} product pages failed to fetch and were skipped",
                    "⚠".yellow(),
                    summary.links_found - summary.products_scraped()
                );
            }
        }
        Err(e) => {
            eprintln!("{} {}", "✗ Scrape failed:".red(), e);
            std::process::exit(1);
        }
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
