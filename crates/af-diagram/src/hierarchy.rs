use af_core::{
    DiagramEdge, DiagramKind, DiagramNode, DiagramResponse, EdgeStyle, EngineConfig,
    HIERARCHY_EDGE_STROKE, NodeType,
};
use af_layout::{grid_position, root_position};
use af_text::{ListExtraction, extract_list_capped, main_concept, minimize};
use tracing::debug;

use crate::flow::build_flow_with_config;

pub const ROOT_NODE_ID: &str = "root";

/// Build a root node with one child per listed item.
///
/// Text without a keyword-introduced list is handed to the flow builder and
/// its result is returned unchanged, including its `flow` diagram type.
#[must_use]
pub fn build_hierarchy(text: &str) -> DiagramResponse {
    build_hierarchy_with_config(text, &EngineConfig::default())
}

#[must_use]
pub fn build_hierarchy_with_config(text: &str, config: &EngineConfig) -> DiagramResponse {
    match extract_list_capped(text, config.labels.max_list_items) {
        Some(list) => hierarchy_from_list(text, &list, config),
        None => {
            debug!("no list keyword found; delegating to flow builder");
            build_flow_with_config(text, config)
        }
    }
}

fn hierarchy_from_list(text: &str, list: &ListExtraction, config: &EngineConfig) -> DiagramResponse {
    let mut diagram = DiagramResponse::new(DiagramKind::Hierarchy);

    // A text opening with a colon has an empty concept; label from the whole text.
    let mut root_label = minimize(&main_concept(text), config.labels.root_words);
    if root_label.trim().is_empty() {
        root_label = minimize(text, config.labels.root_words);
    }

    diagram.nodes.push(DiagramNode::styled(
        ROOT_NODE_ID,
        root_label,
        root_position(&config.grid),
        NodeType::Root,
    ));

    for (index, item) in list.items.iter().enumerate() {
        let child_id = format!("child-{index}");
        diagram.nodes.push(DiagramNode::styled(
            child_id.clone(),
            minimize(item, config.labels.child_words),
            grid_position(index, &config.grid),
            NodeType::Child,
        ));
        diagram.edges.push(DiagramEdge::new(
            format!("edge-root-{index}"),
            ROOT_NODE_ID,
            child_id,
            EdgeStyle::stroke(HIERARCHY_EDGE_STROKE),
        ));
    }

    debug!(
        keyword = %list.keyword,
        children = list.items.len(),
        "built hierarchy diagram"
    );
    diagram
}
