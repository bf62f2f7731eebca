//! Rule-based diagram chat.
//!
//! Keyword-matches a user message against the current diagram and may
//! return an edited copy. No model is consulted and the output is a pure
//! function of the inputs.

use std::sync::LazyLock;

use af_core::{ChatResponse, DiagramNode, DiagramResponse, EngineConfig, NodeShape, NodeType};
use af_layout::append_position;
use af_text::minimize;
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::debug;

pub const NEW_NODE_LABEL: &str = "New Node";
pub const THEME_HINT: &str = "You can change the theme using the theme selector in the toolbar.";

static ADD_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)add\s+(.+)").expect("add pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatIntent {
    Explain,
    AddNode,
    Simplify,
    Theme,
    Help,
}

impl ChatIntent {
    /// First matching rule wins, in declaration order.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|word| lower.contains(word));

        if mentions(&["explain", "what"]) {
            Self::Explain
        } else if mentions(&["add", "create"]) {
            Self::AddNode
        } else if mentions(&["simplify", "shorter"]) {
            Self::Simplify
        } else if mentions(&["color", "theme"]) {
            Self::Theme
        } else {
            Self::Help
        }
    }
}

/// Answer a chat message about `diagram`. The input diagram is left as is;
/// edits come back in `updated_diagram`.
#[must_use]
pub fn respond(
    message: &str,
    diagram: &DiagramResponse,
    diagram_type: &str,
    config: &EngineConfig,
) -> ChatResponse {
    let intent = ChatIntent::classify(message);
    debug!(?intent, nodes = diagram.nodes.len(), "chat message classified");

    match intent {
        ChatIntent::Explain => ChatResponse {
            reply: describe(diagram, diagram_type),
            updated_diagram: None,
        },
        ChatIntent::AddNode => {
            let label = ADD_TARGET
                .captures(message)
                .and_then(|captures| captures.get(1))
                .map_or_else(
                    || NEW_NODE_LABEL.to_string(),
                    |target| minimize(target.as_str(), config.labels.flow_words),
                );
            let mut updated = diagram.clone();
            updated.nodes.push(DiagramNode {
                id: next_node_id(diagram),
                label: label.clone(),
                position: append_position(&diagram.nodes, &config.flow),
                node_type: NodeType::Process,
                shape: NodeShape::Rectangle,
                palette: None,
            });
            ChatResponse {
                reply: format!("Added new node: {label}"),
                updated_diagram: Some(updated),
            }
        }
        ChatIntent::Simplify => {
            let mut updated = diagram.clone();
            for node in &mut updated.nodes {
                node.label = minimize(&node.label, config.labels.simplify_words);
            }
            ChatResponse {
                reply: "Simplified all node labels.".to_string(),
                updated_diagram: Some(updated),
            }
        }
        ChatIntent::Theme => ChatResponse {
            reply: THEME_HINT.to_string(),
            updated_diagram: None,
        },
        ChatIntent::Help => ChatResponse {
            reply: format!(
                "I understand you're asking about: \"{message}\". This is a {diagram_type} diagram with {} nodes. You can ask me to explain the diagram, add nodes, or simplify labels.",
                diagram.nodes.len()
            ),
            updated_diagram: None,
        },
    }
}

fn describe(diagram: &DiagramResponse, diagram_type: &str) -> String {
    let components = diagram
        .nodes
        .iter()
        .take(3)
        .map(|node| node.label.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "This {diagram_type} diagram contains {} nodes and {} connections. The main components are: {components}.",
        diagram.nodes.len(),
        diagram.edges.len()
    )
}

/// Smallest `node-<k>` with `k >= node count` that is not already taken.
fn next_node_id(diagram: &DiagramResponse) -> String {
    let taken: FxHashSet<&str> = diagram.node_ids();
    (diagram.nodes.len()..)
        .map(|k| format!("node-{k}"))
        .find(|id| !taken.contains(id.as_str()))
        .unwrap_or_else(|| format!("node-{}", diagram.nodes.len()))
}
