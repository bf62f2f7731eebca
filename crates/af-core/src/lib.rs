#![forbid(unsafe_code)]

mod config;

pub use config::{EngineConfig, FlowSpacing, GridSpacing, LabelLimits};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic role of a diagram vertex; drives shape and palette.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    #[default]
    Process,
    Decision,
    End,
    Root,
    Child,
    Category,
}

impl NodeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Process => "process",
            Self::Decision => "decision",
            Self::End => "end",
            Self::Root => "root",
            Self::Child => "child",
            Self::Category => "category",
        }
    }

    /// Shape a builder assigns to a node of this role.
    #[must_use]
    pub const fn default_shape(self) -> NodeShape {
        match self {
            Self::Start | Self::End => NodeShape::Circle,
            Self::Decision => NodeShape::Diamond,
            Self::Root => NodeShape::Ellipse,
            Self::Process | Self::Child | Self::Category => NodeShape::Rounded,
        }
    }

    /// Fixed color pair for this role.
    #[must_use]
    pub fn palette(self) -> NodePalette {
        let background = match self {
            Self::Start => "#10b981",
            Self::Process => "#3b82f6",
            Self::Decision => "#f59e0b",
            Self::End => "#ef4444",
            Self::Root => "#8b5cf6",
            Self::Child => "#a855f7",
            Self::Category => "#ec4899",
        };
        NodePalette {
            color: PALETTE_TEXT_COLOR.to_string(),
            background_color: background.to_string(),
        }
    }
}

pub const PALETTE_TEXT_COLOR: &str = "#ffffff";
pub const FLOW_EDGE_STROKE: &str = "#6b7280";
pub const HIERARCHY_EDGE_STROKE: &str = "#8b5cf6";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Rectangle,
    #[default]
    Rounded,
    Circle,
    Diamond,
    Ellipse,
}

impl NodeShape {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Rounded => "rounded",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Ellipse => "ellipse",
        }
    }
}

/// Which builder produced a diagram.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    #[default]
    Flow,
    Hierarchy,
    Cluster,
}

impl DiagramKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flow => "flow",
            Self::Hierarchy => "hierarchy",
            Self::Cluster => "cluster",
        }
    }
}

/// Builder requested by the caller.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagramMode {
    #[default]
    Auto,
    Flow,
    Hierarchy,
}

impl DiagramMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Flow => "flow",
            Self::Hierarchy => "hierarchy",
        }
    }

    /// Unrecognized values select auto-detection.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "flow" => Self::Flow,
            "hierarchy" => Self::Hierarchy,
            _ => Self::Auto,
        }
    }
}

impl<'de> Deserialize<'de> for DiagramMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Auto, Self::parse))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Text and fill color; a node carries both or neither.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodePalette {
    pub color: String,
    pub background_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    pub position: Position,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub shape: NodeShape,
    #[serde(flatten)]
    pub palette: Option<NodePalette>,
}

impl DiagramNode {
    /// A node with the shape and palette its role implies.
    #[must_use]
    pub fn styled(
        id: impl Into<String>,
        label: impl Into<String>,
        position: Position,
        node_type: NodeType,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            node_type,
            shape: node_type.default_shape(),
            palette: Some(node_type.palette()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl EdgeStyle {
    #[must_use]
    pub fn stroke(color: &str) -> Self {
        Self {
            stroke: Some(color.to_string()),
            stroke_width: Some(DEFAULT_STROKE_WIDTH),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
}

impl DiagramEdge {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        style: EdgeStyle,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            animated: None,
            style: Some(style),
        }
    }
}

/// The unit exchanged with renderers, storage and export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiagramResponse {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram_type: Option<DiagramKind>,
}

impl DiagramResponse {
    #[must_use]
    pub fn new(kind: DiagramKind) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            diagram_type: Some(kind),
        }
    }

    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    #[must_use]
    pub fn node_ids(&self) -> FxHashSet<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    /// Edges whose source or target is not in the node set.
    #[must_use]
    pub fn dangling_edges(&self) -> Vec<&DiagramEdge> {
        let ids = self.node_ids();
        self.edges
            .iter()
            .filter(|edge| !ids.contains(edge.source.as_str()) || !ids.contains(edge.target.as_str()))
            .collect()
    }

    #[must_use]
    pub fn kind(&self) -> DiagramKind {
        self.diagram_type.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GenerateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub mode: DiagramMode,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(text: impl Into<String>, mode: DiagramMode) -> Self {
        Self {
            text: Some(text.into()),
            mode,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub diagram: Option<DiagramResponse>,
    #[serde(default)]
    pub diagram_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_diagram: Option<DiagramResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse {
    pub extracted_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ErrorCode {
    #[default]
    InvalidInput,
    MalformedRequest,
    Config,
    Internal,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "autofigure/error/invalid-input",
            Self::MalformedRequest => "autofigure/error/malformed-request",
            Self::Config => "autofigure/error/config",
            Self::Internal => "autofigure/error/internal",
        }
    }

    /// HTTP status a boundary should answer with.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MalformedRequest => 400,
            Self::Config | Self::Internal => 500,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AutofigureError {
    #[error("Text is required and cannot be empty")]
    EmptyText,
    #[error("Message and diagram are required")]
    MissingChatInput,
    #[error("No image file provided")]
    MissingImage,
    #[error("Invalid request body: {message}")]
    MalformedRequest { message: String },
    #[error("Invalid configuration: {message}")]
    Config { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AutofigureError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyText | Self::MissingChatInput | Self::MissingImage => {
                ErrorCode::InvalidInput
            }
            Self::MalformedRequest { .. } => ErrorCode::MalformedRequest,
            Self::Config { .. } => ErrorCode::Config,
            Self::Internal { .. } => ErrorCode::Internal,
        }
    }

    #[must_use]
    pub const fn status(&self) -> u16 {
        self.code().status()
    }

    /// Message shown to clients; internal details stay in the logs.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::MalformedRequest { .. } => "Invalid request body".to_string(),
            Self::Internal { .. } | Self::Config { .. } => {
                "Failed to generate diagram".to_string()
            }
            other => other.to_string(),
        }
    }

    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.client_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_shapes() {
        assert_eq!(NodeType::Start.default_shape(), NodeShape::Circle);
        assert_eq!(NodeType::End.default_shape(), NodeShape::Circle);
        assert_eq!(NodeType::Decision.default_shape(), NodeShape::Diamond);
        assert_eq!(NodeType::Root.default_shape(), NodeShape::Ellipse);
        assert_eq!(NodeType::Child.default_shape(), NodeShape::Rounded);
        assert_eq!(NodeType::Process.default_shape(), NodeShape::Rounded);
    }

    #[test]
    fn palette_uses_white_text_for_every_role() {
        for role in [
            NodeType::Start,
            NodeType::Process,
            NodeType::Decision,
            NodeType::End,
            NodeType::Root,
            NodeType::Child,
            NodeType::Category,
        ] {
            assert_eq!(role.palette().color, PALETTE_TEXT_COLOR);
        }
        assert_eq!(NodeType::Decision.palette().background_color, "#f59e0b");
    }

    #[test]
    fn node_serializes_with_camel_case_palette() {
        let node = DiagramNode::styled("node-0", "Start", Position::new(0.0, 100.0), NodeType::Start);
        let value = serde_json::to_value(&node).expect("serialize node");
        assert_eq!(value["type"], "start");
        assert_eq!(value["shape"], "circle");
        assert_eq!(value["backgroundColor"], "#10b981");
        assert_eq!(value["color"], "#ffffff");
        assert_eq!(value["position"]["y"], 100.0);
    }

    #[test]
    fn node_without_palette_omits_both_colors() {
        let node = DiagramNode {
            palette: None,
            ..DiagramNode::styled("n", "N", Position::default(), NodeType::Process)
        };
        let value = serde_json::to_value(&node).expect("serialize node");
        assert!(value.get("color").is_none());
        assert!(value.get("backgroundColor").is_none());

        let decoded: DiagramNode = serde_json::from_value(value).expect("decode node");
        assert_eq!(decoded.palette, None);
    }

    #[test]
    fn response_uses_diagram_type_key() {
        let response = DiagramResponse::new(DiagramKind::Hierarchy);
        let json = serde_json::to_string(&response).expect("serialize response");
        assert!(json.contains("\"diagramType\":\"hierarchy\""));
    }

    #[test]
    fn dangling_edges_are_reported() {
        let mut response = DiagramResponse::new(DiagramKind::Flow);
        response.nodes.push(DiagramNode::styled(
            "node-0",
            "A",
            Position::default(),
            NodeType::Start,
        ));
        response.edges.push(DiagramEdge::new(
            "edge-0-1",
            "node-0",
            "node-1",
            EdgeStyle::stroke(FLOW_EDGE_STROKE),
        ));
        assert_eq!(response.dangling_edges().len(), 1);
    }

    #[test]
    fn mode_parses_leniently() {
        assert_eq!(DiagramMode::parse("Flow"), DiagramMode::Flow);
        assert_eq!(DiagramMode::parse(" hierarchy "), DiagramMode::Hierarchy);
        assert_eq!(DiagramMode::parse("mindmap"), DiagramMode::Auto);

        let request: GenerateRequest =
            serde_json::from_str(r#"{"text":"a","mode":"bogus"}"#).expect("decode request");
        assert_eq!(request.mode, DiagramMode::Auto);
        let request: GenerateRequest = serde_json::from_str(r#"{"text":"a"}"#).expect("decode");
        assert_eq!(request.mode, DiagramMode::Auto);
    }

    #[test]
    fn errors_map_to_client_statuses() {
        assert_eq!(AutofigureError::EmptyText.status(), 400);
        assert_eq!(
            AutofigureError::MalformedRequest {
                message: "eof".to_string()
            }
            .to_body()
            .error,
            "Invalid request body"
        );
        assert_eq!(
            AutofigureError::Internal {
                message: "boom".to_string()
            }
            .status(),
            500
        );
        assert_eq!(
            AutofigureError::EmptyText.code().as_str(),
            "autofigure/error/invalid-input"
        );
    }
}
