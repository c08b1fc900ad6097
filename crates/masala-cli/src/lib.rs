//! Masala CLI library
//!
//! This module contains the core CLI logic for the Masala processor.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io};

use log::{debug, info};

use masala::{Diagnostic, MasalaError, Processor, report::View};

/// What a successful run produced.
#[derive(Debug)]
pub enum Outcome {
    /// The requested view was written. Carries any non-blocking diagnostics.
    Rendered { diagnostics: Vec<Diagnostic> },
    /// Error diagnostics blocked the view and the listing was written instead.
    Gated { diagnostics: Vec<Diagnostic> },
}

impl Outcome {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Outcome::Rendered { diagnostics } | Outcome::Gated { diagnostics } => diagnostics,
        }
    }

    pub fn is_gated(&self) -> bool {
        matches!(self, Outcome::Gated { .. })
    }
}

/// Run the Masala CLI application
///
/// Reads one document-change notification, processes it and writes the
/// selected view as pretty JSON, or the diagnostic listing when errors
/// block the view, to the output file or stdout.
///
/// # Errors
///
/// Returns `MasalaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Notifications or documents that cannot be deserialized
pub fn run(args: &Args) -> Result<Outcome, MasalaError> {
    info!(input_path = args.input; "Processing notification");

    let app_config = config::load_config(args.config.as_ref())?;
    let kind = args.view.unwrap_or(app_config.view().default_kind());
    debug!(view:% = kind; "View selected");

    let payload = fs::read_to_string(&args.input)?;

    let mut processor = Processor::new(app_config);
    let snapshot = processor.apply_json(&payload)?;
    let diagnostics = snapshot.diagnostics().to_vec();

    let (rendered, outcome) = match snapshot.view(kind) {
        View::Diagnostics(listing) => (listing.to_string(), Outcome::Gated { diagnostics }),
        View::Tree(tree) => (to_json(tree)?, Outcome::Rendered { diagnostics }),
        View::Graph(graph) => (to_json(graph)?, Outcome::Rendered { diagnostics }),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(output_file = path; "View written");
        }
        None => println!("{rendered}"),
    }

    Ok(outcome)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, MasalaError> {
    serde_json::to_string_pretty(value).map_err(|err| MasalaError::Io(io::Error::other(err)))
}
