#![forbid(unsafe_code)]

//! Text-to-diagram inference.
//!
//! Builders turn free-form text into a [`DiagramResponse`]:
//!
//! - [`build_flow`]: one node per sentence, chained left to right
//! - [`build_hierarchy`]: a root over a grid of listed items, or a flow when
//!   no list can be extracted
//! - [`auto_detect`]: picks between them from keyword signals
//!
//! Every call builds a fresh diagram and keeps no state between calls.

pub mod api;
pub mod chat;
mod flow;
mod hierarchy;
mod select;

use af_core::{AutofigureError, DiagramMode, DiagramResponse, EngineConfig, GenerateRequest};
use tracing::info;

pub use flow::{EMPTY_LABEL, build_flow, build_flow_with_config, flow_role};
pub use hierarchy::{ROOT_NODE_ID, build_hierarchy, build_hierarchy_with_config};
pub use select::{
    DetectionReport, Selection, SelectionStrategy, auto_detect, auto_detect_with_config, detect,
    select,
};

/// Build a diagram for `text` with the builder `mode` names.
#[must_use]
pub fn build(text: &str, mode: DiagramMode, config: &EngineConfig) -> DiagramResponse {
    match mode {
        DiagramMode::Flow => build_flow_with_config(text, config),
        DiagramMode::Hierarchy => build_hierarchy_with_config(text, config),
        DiagramMode::Auto => auto_detect_with_config(text, config),
    }
}

/// Validate a generation request and build its diagram.
///
/// Missing or whitespace-only text is rejected before any builder runs.
pub fn generate(
    request: &GenerateRequest,
    config: &EngineConfig,
) -> Result<DiagramResponse, AutofigureError> {
    let text = request
        .text
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .ok_or(AutofigureError::EmptyText)?;

    let diagram = build(text, request.mode, config);
    info!(
        mode = request.mode.as_str(),
        kind = diagram.kind().as_str(),
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        "generated diagram"
    );
    Ok(diagram)
}
