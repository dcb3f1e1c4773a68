use clap::Parser;

use linkstat::checker::Checker;
use linkstat::cli::{Cli, cli_to_config};
use linkstat::config::Config;
use linkstat::csv_io::{self, RecordFile};
use linkstat::error::Result;
use linkstat::logging;
use linkstat::progress::ProgressReporter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.input.is_none() {
        eprintln!("Usage: linkstat <input.csv> [output.csv]");
        eprintln!("\nFor more information, try '--help'.");
        std::process::exit(1);
    }

    match run(&cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;
    config.validate()?;

    logging::init_logger(cli_config.verbose || config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    // Checked in main before run() is entered
    let input = cli.input.as_deref().unwrap_or_default();
    let output = cli.output.as_deref().unwrap_or(input);

    if !cli_config.quiet {
        println!("Reading from: {input}");
        println!("Writing to: {output}");
    }

    let parsed = csv_io::read_records(input)?;
    let total = parsed.records.len();
    logging::log_batch_info(total, input, output);

    let show_progress = !cli_config.quiet && !cli_config.no_progress;
    let mut progress = ProgressReporter::new(show_progress);

    let checker = Checker::with_config(&config)?;
    let records = checker
        .check_records(parsed.records, &config, Some(&mut progress))
        .await;

    let batch = RecordFile {
        records,
        extra_columns: parsed.extra_columns,
    };
    let include_nginx = config.secondary_probe.unwrap_or(false);
    if let Err(err) = csv_io::write_records(output, &batch, include_nginx) {
        logging::log_error(
            &format!("Could not write {total} processed record(s) to {output}"),
            Some(&err),
        );
        return Err(err);
    }

    if !cli_config.quiet {
        println!("Checked {total} URL(s)");
    }
    Ok(())
}

/// Load configuration from file or standard locations and merge with CLI
/// arguments (CLI takes precedence)
fn load_and_merge_config(cli_config: &linkstat::config::CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    config.merge_with_cli(cli_config);
    Ok(config)
}
