//! Masala - semantic processing and visualization for a domain-model language.
//!
//! The language service pushes a [`DocumentChange`] on every edit. A
//! [`Processor`] turns each one into an immutable [`Snapshot`] holding the
//! merged diagnostics, the containment tree and the entity graph. Graph
//! positions chosen by the user survive from one snapshot to the next.

pub mod config;
pub mod layout;
pub mod report;
pub mod session;
pub mod structure;

mod error;

pub use masala_core::{geometry, identifier};
pub use masala_parser::{Diagnostic, DocumentChange, Severity};

pub use error::MasalaError;

use log::{debug, info, trace};

use masala_parser::{Document, normalize, validate_with};

use config::{AppConfig, ViewKind};
use layout::EntityGraph;
use report::{DiagnosticListing, View};
use session::{DragEvent, VisualizationSession};
use structure::{TreeNode, build_tree};

/// Everything derived from one document-change notification.
#[derive(Debug, Clone)]
pub struct Snapshot {
    document: Document,
    diagnostics: Vec<Diagnostic>,
    tree: TreeNode,
    graph: EntityGraph,
}

impl Snapshot {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The language service's diagnostics followed by the validator's.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn graph(&self) -> &EntityGraph {
        &self.graph
    }

    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        report::is_gated(&self.diagnostics)
    }

    /// The requested view, or a diagnostic listing if an error blocks it.
    ///
    /// # Examples
    ///
    /// ```
    /// use masala::{Processor, config::ViewKind};
    ///
    /// let notification = r#"{"content": "{\"$type\":\"Domainmodel\",\"elements\":[]}"}"#;
    ///
    /// let mut processor = Processor::default();
    /// let snapshot = processor.apply_json(notification).expect("Failed to process");
    /// assert!(!snapshot.view(ViewKind::Tree).is_gated());
    /// ```
    pub fn view(&self, kind: ViewKind) -> View<'_> {
        if self.has_errors() {
            return View::Diagnostics(DiagnosticListing::new(&self.diagnostics));
        }
        match kind {
            ViewKind::Tree => View::Tree(&self.tree),
            ViewKind::Graph => View::Graph(&self.graph),
        }
    }
}

/// Turns document-change notifications into snapshots.
///
/// Only the latest snapshot is kept. The processor owns one
/// [`VisualizationSession`], so graph positions carry over between
/// notifications until the session is reset.
///
/// # Examples
///
/// ```
/// use masala::{Processor, config::AppConfig};
///
/// let notification = r#"{
///     "content": "{\"$type\":\"Domainmodel\",\"elements\":[{\"$type\":\"Entity\",\"name\":\"User\"}]}",
///     "diagnostics": []
/// }"#;
///
/// let mut processor = Processor::new(AppConfig::default());
/// let snapshot = processor.apply_json(notification).expect("Failed to process");
///
/// assert_eq!(snapshot.graph().nodes().len(), 1);
/// assert!(snapshot.diagnostics().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Processor {
    config: AppConfig,
    session: VisualizationSession,
    snapshot: Option<Snapshot>,
}

impl Processor {
    /// Create a processor with an empty session laid out per `config`.
    pub fn new(config: AppConfig) -> Self {
        let session = VisualizationSession::new(config.layout());
        Self {
            config,
            session,
            snapshot: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The latest snapshot, if a notification was processed successfully.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn session(&self) -> &VisualizationSession {
        &self.session
    }

    /// Parse a notification from JSON and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`MasalaError::Notification`] if the payload is not a
    /// notification, otherwise see [`Processor::apply`].
    pub fn apply_json(&mut self, json: &str) -> Result<&Snapshot, MasalaError> {
        let change = DocumentChange::from_json(json).map_err(MasalaError::Notification)?;
        self.apply(&change)
    }

    /// Process one notification and replace the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MasalaError::Document`] if the carried AST cannot be
    /// deserialized. The previous snapshot is kept in that case.
    pub fn apply(&mut self, change: &DocumentChange) -> Result<&Snapshot, MasalaError> {
        info!(external_diagnostics_len = change.diagnostics.len(); "Processing document change");

        let document = change
            .document()
            .map_err(|err| MasalaError::new_document_error(err, change.content.as_str()))?;

        let model = normalize(&document);

        let mut diagnostics: Vec<Diagnostic> = change.diagnostics().collect();
        diagnostics.extend(validate_with(&model, self.config.validation().into()));

        let tree = build_tree(&model);
        let graph = self.session.project(&document, &model.entities);

        let snapshot = Snapshot {
            document,
            diagnostics,
            tree,
            graph,
        };
        debug!(
            diagnostics_len = snapshot.diagnostics.len(),
            has_errors = snapshot.has_errors();
            "Snapshot ready",
        );
        trace!(snapshot:?; "Snapshot");

        Ok(self.snapshot.insert(snapshot))
    }

    /// The requested view of the latest snapshot.
    pub fn view(&self, kind: ViewKind) -> Option<View<'_>> {
        self.snapshot.as_ref().map(|snapshot| snapshot.view(kind))
    }

    /// Forward a drag event from the graph surface.
    ///
    /// The current snapshot's node follows every event so the view tracks
    /// the pointer; the session commits the position only when the drag
    /// ends. Returns `true` if a position was committed.
    pub fn apply_drag(&mut self, event: &DragEvent) -> bool {
        if let (Some(snapshot), Some(position)) = (self.snapshot.as_mut(), event.position()) {
            snapshot.graph.move_node(event.id(), position);
        }
        self.session.apply_drag(event)
    }

    /// Start a fresh visualization session, forgetting every position.
    pub fn reset_session(&mut self) {
        info!("Resetting visualization session");
        self.session.reset();
    }
}
