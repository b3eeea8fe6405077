use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::Level;
use wallboard_db::{
    InitReport, RunOutcome, SchemaInitializer, SmokeReport, SmokeTester, WallboardConfig,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// configuration file path, by default ./wallboard.toml is used if present
    #[clap(short, long)]
    config: Option<String>,

    /// Path to the SQL schema script (overrides config)
    #[clap(long)]
    schema: Option<PathBuf>,

    /// Path to the SQLite database file (overrides config)
    #[clap(long)]
    database: Option<PathBuf>,

    /// Apply the schema only, skip the smoke test
    #[clap(long)]
    skip_test: bool,

    /// Output the run summary as JSON
    #[clap(long)]
    json: bool,

    /// Print debug information
    #[clap(long)]
    debug: bool,
}

#[derive(Serialize)]
struct RunSummary {
    outcome: RunOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    init: Option<InitReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    smoke: Option<SmokeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_init_report(report: &InitReport) {
    println!("[ok] schema applied: {} active tiles", report.active_count);
    if !report.samples.is_empty() {
        println!("[info] sample tiles:");
        for tile in &report.samples {
            println!("   - {} ({}) [{}]", tile.title, tile.status, tile.tile_type);
        }
    }
}

fn print_smoke_report(report: &SmokeReport) {
    println!("[ok] smoke test passed:");
    println!("   - 1 tile added");
    println!("   - {} active tiles retrieved", report.retrieved);
    println!(
        "   - top priority tile: {} ({})",
        report.top_title, report.top_status
    );
}

fn print_next_steps() {
    println!();
    println!("[info] next steps:");
    println!("   1. Use the API endpoints to add/update tiles");
    println!("   2. Connect the frontend to fetch data from the database");
    println!("   3. Set up automated scripts to populate tile data");
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    }

    let config = match WallboardConfig::new(&cli.config) {
        Ok(c) => c.with_overrides(cli.schema, cli.database),
        Err(e) => {
            eprintln!("[error] {e}");
            std::process::exit(RunOutcome::Failed.exit_code());
        }
    };

    if !cli.json {
        println!("[info] setting up wallboard database...");
        println!("{}", config.summary());
        println!();
    }

    let init = match SchemaInitializer::new(&config).run() {
        Ok(report) => report,
        Err(e) => {
            let outcome = RunOutcome::Failed;
            if cli.json {
                print_summary_json(RunSummary {
                    outcome,
                    init: None,
                    smoke: None,
                    error: Some(e.to_string()),
                });
            } else {
                eprintln!("[error] {e}");
                eprintln!("[error] database setup failed");
            }
            std::process::exit(outcome.exit_code());
        }
    };

    if cli.skip_test {
        if cli.json {
            print_summary_json(RunSummary {
                outcome: RunOutcome::Success,
                init: Some(init),
                smoke: None,
                error: None,
            });
        } else {
            print_init_report(&init);
            println!("[ok] database setup complete (smoke test skipped)");
        }
        return;
    }

    match SmokeTester::new(&config).run() {
        Ok(smoke) => {
            if cli.json {
                print_summary_json(RunSummary {
                    outcome: RunOutcome::Success,
                    init: Some(init),
                    smoke: Some(smoke),
                    error: None,
                });
            } else {
                print_init_report(&init);
                print_smoke_report(&smoke);
                println!();
                println!("[ok] database setup complete");
                print_next_steps();
            }
        }
        Err(e) => {
            let outcome = RunOutcome::SchemaOnly;
            if cli.json {
                print_summary_json(RunSummary {
                    outcome,
                    init: Some(init),
                    smoke: None,
                    error: Some(e.to_string()),
                });
            } else {
                print_init_report(&init);
                eprintln!("[error] {e}");
                eprintln!("[error] database created but smoke test failed");
            }
            std::process::exit(outcome.exit_code());
        }
    }
}

fn print_summary_json(summary: RunSummary) {
    match serde_json::to_string_pretty(&summary) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("[error] failed to serialize run summary: {e}"),
    }
}
