//! Masala CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use miette::Diagnostic as _;

use masala_cli::{
    Args,
    error_adapter::{Reportable, diagnostics_to_reportables, to_reportables},
};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Masala");
    debug!(args:?; "Parsed arguments");

    let outcome = match masala_cli::run(&args) {
        Ok(outcome) => outcome,
        Err(err) => {
            for reportable in to_reportables(&err) {
                error!("{}", render(&reportable));
            }
            process::exit(1);
        }
    };

    for reportable in diagnostics_to_reportables(outcome.diagnostics()) {
        match reportable.severity() {
            Some(miette::Severity::Error) => error!("{}", render(&reportable)),
            _ => warn!("{}", render(&reportable)),
        }
    }

    if outcome.is_gated() {
        process::exit(1);
    }

    info!("Completed successfully");
}

fn render(reportable: &Reportable<'_>) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}
