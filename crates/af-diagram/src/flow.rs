use af_core::{
    DiagramEdge, DiagramKind, DiagramNode, DiagramResponse, EdgeStyle, EngineConfig,
    FLOW_EDGE_STROKE, NodeType,
};
use af_layout::flow_position;
use af_text::{has_decision_signal, minimize, segment};
use tracing::debug;

/// Label used when the text yields neither sentences nor a minimized label.
pub const EMPTY_LABEL: &str = "Empty";

/// Build a left-to-right flow: one node per sentence, chained in order.
#[must_use]
pub fn build_flow(text: &str) -> DiagramResponse {
    build_flow_with_config(text, &EngineConfig::default())
}

#[must_use]
pub fn build_flow_with_config(text: &str, config: &EngineConfig) -> DiagramResponse {
    let sentences = segment(text);
    let count = sentences.len();
    let mut diagram = DiagramResponse::new(DiagramKind::Flow);

    for (index, sentence) in sentences.iter().enumerate() {
        let role = flow_role(index, count, sentence);
        diagram.nodes.push(DiagramNode::styled(
            flow_node_id(index),
            minimize(sentence, config.labels.flow_words),
            flow_position(index, &config.flow),
            role,
        ));

        if index > 0 {
            diagram.edges.push(DiagramEdge::new(
                format!("edge-{}-{index}", index - 1),
                flow_node_id(index - 1),
                flow_node_id(index),
                EdgeStyle::stroke(FLOW_EDGE_STROKE),
            ));
        }
    }

    if diagram.nodes.is_empty() {
        let label = minimize(text, config.labels.flow_words);
        let label = if label.trim().is_empty() {
            EMPTY_LABEL.to_string()
        } else {
            label
        };
        diagram.nodes.push(DiagramNode::styled(
            flow_node_id(0),
            label,
            config.flow.fallback,
            NodeType::Process,
        ));
        debug!("no sentences found; synthesized a single process node");
    }

    debug!(
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        "built flow diagram"
    );
    diagram
}

/// Role of the `index`-th of `count` sentences. Position outranks content:
/// the first sentence is always `start` and the last `end`.
#[must_use]
pub fn flow_role(index: usize, count: usize, sentence: &str) -> NodeType {
    if index == 0 {
        NodeType::Start
    } else if index + 1 == count {
        NodeType::End
    } else if has_decision_signal(sentence) {
        NodeType::Decision
    } else {
        NodeType::Process
    }
}

fn flow_node_id(index: usize) -> String {
    format!("node-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::{NodeShape, Position};

    #[test]
    fn assigns_start_decision_end_roles() {
        let diagram = build_flow("Start here. Check if valid. Finish now.");
        assert_eq!(diagram.diagram_type, Some(DiagramKind::Flow));

        let roles: Vec<NodeType> = diagram.nodes.iter().map(|n| n.node_type).collect();
        assert_eq!(roles, vec![NodeType::Start, NodeType::Decision, NodeType::End]);

        let labels: Vec<&str> = diagram.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Start", "Check Valid", "Finish Now"]);

        assert_eq!(diagram.nodes[1].shape, NodeShape::Diamond);
        assert_eq!(diagram.nodes[0].shape, NodeShape::Circle);
        assert_eq!(diagram.nodes[2].shape, NodeShape::Circle);
    }

    #[test]
    fn chains_consecutive_nodes() {
        let diagram = build_flow("Start here. Check if valid. Finish now.");
        let pairs: Vec<(&str, &str, &str)> = diagram
            .edges
            .iter()
            .map(|e| (e.id.as_str(), e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("edge-0-1", "node-0", "node-1"),
                ("edge-1-2", "node-1", "node-2"),
            ]
        );
        let style = diagram.edges[0].style.as_ref().expect("edge style");
        assert_eq!(style.stroke.as_deref(), Some(FLOW_EDGE_STROKE));
        assert_eq!(style.stroke_width, Some(2.0));
        assert_eq!(diagram.edges[0].animated, None);
    }

    #[test]
    fn lays_nodes_out_horizontally() {
        let diagram = build_flow("One. Two. Three. Four");
        let positions: Vec<Position> = diagram.nodes.iter().map(|n| n.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0.0, 100.0),
                Position::new(250.0, 100.0),
                Position::new(500.0, 100.0),
                Position::new(750.0, 100.0),
            ]
        );
    }

    #[test]
    fn middle_sentences_without_decisions_are_processes() {
        let diagram = build_flow("Boil water. Add pasta. Drain it. Serve");
        assert_eq!(diagram.nodes[1].node_type, NodeType::Process);
        assert_eq!(diagram.nodes[2].node_type, NodeType::Process);
        assert_eq!(
            diagram.nodes[1].palette.as_ref().map(|p| p.background_color.as_str()),
            Some("#3b82f6")
        );
    }

    #[test]
    fn single_sentence_is_a_start_node() {
        let diagram = build_flow("Just one idea");
        assert_eq!(diagram.nodes.len(), 1);
        assert_eq!(diagram.nodes[0].node_type, NodeType::Start);
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn decision_words_at_the_ends_do_not_override_roles() {
        let diagram = build_flow("Check input. Verify token");
        assert_eq!(diagram.nodes[0].node_type, NodeType::Start);
        assert_eq!(diagram.nodes[1].node_type, NodeType::End);
    }

    #[test]
    fn blank_text_synthesizes_one_process_node() {
        let diagram = build_flow("   ");
        assert_eq!(diagram.nodes.len(), 1);
        let node = &diagram.nodes[0];
        assert_eq!(node.id, "node-0");
        assert_eq!(node.label, EMPTY_LABEL);
        assert_eq!(node.node_type, NodeType::Process);
        assert_eq!(node.position, Position::new(100.0, 100.0));
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn custom_spacing_is_honored() {
        let mut config = EngineConfig::default();
        config.flow.step_x = 100.0;
        config.flow.row_y = 0.0;
        let diagram = build_flow_with_config("A. B", &config);
        assert_eq!(diagram.nodes[1].position, Position::new(100.0, 0.0));
    }
}
