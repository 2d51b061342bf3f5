use clap::Parser;
use tracing_subscriber::EnvFilter;

use validata::cli::{self, Cli, Commands};
use validata::impute::Imputer;
use validata::types::Result;
use validata::{output, report};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Detect { input, out } => {
            let detection = report::detect_file(
                &input.input,
                &input.read_options(),
                &input.sentinels(),
                input.columnar,
            )?;

            if let Some(out_path) = out {
                output::write_json_file(&detection, &out_path)?;
                eprintln!("Detection report written to: {}", out_path.display());
            } else {
                output::write_json_stdout(&detection)?;
            }
        }
        Commands::Impute {
            input,
            strategy,
            placeholder,
            fallback,
            precision,
            numeric_threshold,
            mark_imputed,
            out,
            report: report_path,
        } => {
            let columnar = input.columnar || mark_imputed.is_some();
            let options = cli::impute_options(
                &input,
                placeholder,
                fallback,
                precision,
                numeric_threshold,
                mark_imputed,
            );
            let imputer = Imputer::with_strategy_name(&strategy, options)?;

            let (table, summary) =
                report::impute_file(&input.input, &input.read_options(), &imputer, columnar)?;

            if let Some(out_path) = out {
                output::write_table_file(&table, &out_path)?;
                eprintln!("Imputed table written to: {}", out_path.display());
            } else {
                output::write_table_stdout(&table)?;
            }

            if let Some(report_path) = report_path {
                output::write_json_file(&summary, &report_path)?;
                eprintln!("Imputation report written to: {}", report_path.display());
            }
        }
    }

    Ok(())
}

/// Log to stderr; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
