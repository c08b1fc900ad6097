//! Configuration types for the Masala processor.
//!
//! All types implement [`serde::Deserialize`] and every field is defaulted,
//! so an empty TOML document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Default placement of graph nodes never seen before.
//! - [`ValidationConfig`] - Switches for advisory checks.
//! - [`ViewConfig`] - Which view is shown when none is requested.
//!
//! # Example
//!
//! ```
//! # use masala::config::{AppConfig, ViewKind};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().row_spacing(), 100.0);
//! assert_eq!(config.view().default_kind(), ViewKind::Tree);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use masala_parser::ValidateConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Validation configuration section.
    #[serde(default)]
    validation: ValidationConfig,

    /// View configuration section.
    #[serde(default)]
    view: ViewConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, validation: ValidationConfig, view: ViewConfig) -> Self {
        Self {
            layout,
            validation,
            view,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the validation configuration.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    /// Returns the view configuration.
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }
}

/// Default placement for graph nodes without a recorded position.
///
/// The n-th entity of a snapshot (zero-based) that has never been placed
/// lands at `(origin_x, n * row_spacing)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    origin_x: f32,
    row_spacing: f32,
}

impl LayoutConfig {
    /// # Arguments
    ///
    /// * `origin_x` - Horizontal coordinate of every default position.
    /// * `row_spacing` - Vertical distance between consecutive entities.
    pub fn new(origin_x: f32, row_spacing: f32) -> Self {
        Self {
            origin_x,
            row_spacing,
        }
    }

    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Switches for the validator's advisory checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Warn about person names that do not start with a capital letter.
    capitalized_person_names: bool,
}

impl ValidationConfig {
    pub fn new(capitalized_person_names: bool) -> Self {
        Self {
            capitalized_person_names,
        }
    }

    pub fn capitalized_person_names(&self) -> bool {
        self.capitalized_person_names
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

impl From<&ValidationConfig> for ValidateConfig {
    fn from(config: &ValidationConfig) -> Self {
        ValidateConfig::new(config.capitalized_person_names)
    }
}

/// The derived views a snapshot can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// The mindmap-style containment tree.
    #[default]
    Tree,

    /// The entity graph with inheritance edges.
    Graph,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Tree => write!(f, "tree"),
            ViewKind::Graph => write!(f, "graph"),
        }
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tree" => Ok(ViewKind::Tree),
            "graph" => Ok(ViewKind::Graph),
            other => Err(format!("unknown view `{other}`, expected `tree` or `graph`")),
        }
    }
}

/// View selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    default: ViewKind,
}

impl ViewConfig {
    pub fn new(default: ViewKind) -> Self {
        Self { default }
    }

    /// The view shown when the caller does not ask for one.
    pub fn default_kind(&self) -> ViewKind {
        self.default
    }
}
