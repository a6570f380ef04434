use clap::Parser;
use dvhmetrics_core::cli::{Cli, OutputFormat};
use dvhmetrics_core::{DvhAnalyzer, Report, TextReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = match cli.analysis_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    info!("Reading report: {}", cli.file.display());
    let report = match Report::from_file(&cli.file) {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to load {}: {}", cli.file.display(), e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let analysis = DvhAnalyzer::analyze(&report, &config);
    info!("Analysis complete for patient {}", analysis.patient.id);

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(&analysis));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(&analysis) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
