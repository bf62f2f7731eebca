//! Engine configuration: layout spacing and label limits.
//!
//! Defaults reproduce the fixed geometry of the generation endpoint. Every
//! struct is `#[serde(default)]`, so a config file only needs the keys it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Horizontal left-to-right placement used by flow diagrams.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowSpacing {
    /// Distance between consecutive steps on the x axis.
    pub step_x: f64,
    /// Row every step sits on.
    pub row_y: f64,
    /// Where the synthesized node goes when the text has no sentences.
    pub fallback: Position,
}

impl Default for FlowSpacing {
    fn default() -> Self {
        Self {
            step_x: 250.0,
            row_y: 100.0,
            fallback: Position::new(100.0, 100.0),
        }
    }
}

/// Root-over-grid placement used by hierarchy diagrams.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridSpacing {
    pub root: Position,
    pub columns: usize,
    pub column_width: f64,
    pub row_height: f64,
    /// Top-left slot of the child grid.
    pub origin: Position,
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self {
            root: Position::new(400.0, 50.0),
            columns: 3,
            column_width: 250.0,
            row_height: 150.0,
            origin: Position::new(50.0, 200.0),
        }
    }
}

/// Word budgets handed to the label minimizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabelLimits {
    pub flow_words: usize,
    pub root_words: usize,
    pub child_words: usize,
    /// Budget used when a chat request asks for shorter labels.
    pub simplify_words: usize,
    pub max_list_items: usize,
}

impl Default for LabelLimits {
    fn default() -> Self {
        Self {
            flow_words: 4,
            root_words: 5,
            child_words: 3,
            simplify_words: 3,
            max_list_items: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub flow: FlowSpacing,
    pub grid: GridSpacing,
    pub labels: LabelLimits,
}

impl EngineConfig {
    /// Clamp values that would make layout or labeling degenerate.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.grid.columns = self.grid.columns.max(1);
        self.labels.flow_words = self.labels.flow_words.max(1);
        self.labels.root_words = self.labels.root_words.max(1);
        self.labels.child_words = self.labels.child_words.max(1);
        self.labels.simplify_words = self.labels.simplify_words.max(1);
        self.labels.max_list_items = self.labels.max_list_items.max(1);
        self
    }
}
