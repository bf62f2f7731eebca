use af_core::{DiagramKind, DiagramResponse, EngineConfig};
use af_text::{SignalFamily, extract_list};
use serde::Serialize;
use tracing::debug;

use crate::flow::build_flow_with_config;
use crate::hierarchy::build_hierarchy_with_config;

/// Rule of the auto-detect chain that produced the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Text names a hierarchy keyword ("layers", "types of", ...).
    HierarchySignal,
    /// Text names a flow keyword ("steps", "then", ...).
    FlowSignal,
    /// No signal; structured extraction produced more than one node.
    HierarchyAttempt,
    /// No signal and nothing structured to extract.
    FlowFallback,
}

impl SelectionStrategy {
    /// Tried in this order; the first that yields a diagram wins.
    pub const CHAIN: [Self; 4] = [
        Self::HierarchySignal,
        Self::FlowSignal,
        Self::HierarchyAttempt,
        Self::FlowFallback,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HierarchySignal => "hierarchy keyword signal",
            Self::FlowSignal => "flow keyword signal",
            Self::HierarchyAttempt => "structured list extraction",
            Self::FlowFallback => "fallback to flow",
        }
    }

    /// How strongly the rule speaks for the chosen layout (0.0 to 1.0).
    #[must_use]
    pub const fn confidence(self) -> f32 {
        match self {
            Self::HierarchySignal => 0.9,
            Self::FlowSignal => 0.8,
            Self::HierarchyAttempt => 0.6,
            Self::FlowFallback => 0.3,
        }
    }

    fn attempt(self, text: &str, config: &EngineConfig) -> Option<DiagramResponse> {
        match self {
            Self::HierarchySignal => SignalFamily::Hierarchy
                .matches(text)
                .then(|| build_hierarchy_with_config(text, config)),
            Self::FlowSignal => SignalFamily::Flow
                .matches(text)
                .then(|| build_flow_with_config(text, config)),
            Self::HierarchyAttempt => {
                Some(build_hierarchy_with_config(text, config)).filter(|d| d.nodes.len() > 1)
            }
            Self::FlowFallback => Some(build_flow_with_config(text, config)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub strategy: SelectionStrategy,
    pub diagram: DiagramResponse,
}

/// Run the auto-detect chain and keep track of which rule decided.
#[must_use]
pub fn select(text: &str, config: &EngineConfig) -> Selection {
    let (strategy, diagram) = SelectionStrategy::CHAIN
        .into_iter()
        .find_map(|strategy| {
            strategy
                .attempt(text, config)
                .map(|diagram| (strategy, diagram))
        })
        .unwrap_or_else(|| {
            (
                SelectionStrategy::FlowFallback,
                build_flow_with_config(text, config),
            )
        });

    debug!(
        strategy = strategy.as_str(),
        kind = diagram.kind().as_str(),
        nodes = diagram.nodes.len(),
        "auto-detected diagram"
    );
    Selection { strategy, diagram }
}

/// Pick a builder from keyword signals, falling back to structured
/// extraction and then to a flow.
#[must_use]
pub fn auto_detect(text: &str) -> DiagramResponse {
    auto_detect_with_config(text, &EngineConfig::default())
}

#[must_use]
pub fn auto_detect_with_config(text: &str, config: &EngineConfig) -> DiagramResponse {
    select(text, config).diagram
}

/// Why auto-detection settles on a given layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub kind: DiagramKind,
    pub strategy: SelectionStrategy,
    pub confidence: f32,
    pub hierarchy_keyword: Option<&'static str>,
    pub flow_keyword: Option<&'static str>,
    pub list_keyword: Option<String>,
    pub node_count: usize,
    pub edge_count: usize,
}

#[must_use]
pub fn detect(text: &str, config: &EngineConfig) -> DetectionReport {
    let selection = select(text, config);
    DetectionReport {
        kind: selection.diagram.kind(),
        strategy: selection.strategy,
        confidence: selection.strategy.confidence(),
        hierarchy_keyword: SignalFamily::Hierarchy.first_match(text),
        flow_keyword: SignalFamily::Flow.first_match(text),
        list_keyword: extract_list(text).map(|list| list.keyword),
        node_count: selection.diagram.nodes.len(),
        edge_count: selection.diagram.edges.len(),
    }
}
