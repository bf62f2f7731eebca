//! Transport-agnostic request handlers.
//!
//! Each handler takes a raw request body and returns a status code with a
//! JSON body, so any HTTP server (or a test) can drive them.

use af_core::{
    AutofigureError, ChatRequest, ChatResponse, EngineConfig, ErrorBody, GenerateRequest,
    OcrResponse,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::chat::respond;
use crate::generate;

pub const GENERATE_PATH: &str = "/api/generate-diagram";
pub const CHAT_PATH: &str = "/api/diagram-chat";
pub const OCR_PATH: &str = "/api/ocr-mock";

/// Text returned by the OCR stand-in for every uploaded image.
pub const MOCK_OCR_TEXT: &str = "OSI model has 7 layers: Physical, Data Link, Network, Transport, Session, Presentation, Application. Each layer has its own function.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(err) => {
                error!(%err, "failed to serialize response body");
                Self::internal("Failed to generate diagram")
            }
        }
    }

    fn error(err: &AutofigureError) -> Self {
        debug!(code = err.code().as_str(), %err, "request rejected");
        Self::json(err.status(), &err.to_body())
    }

    fn internal(message: &str) -> Self {
        Self {
            status: 500,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    fn plain_error(status: u16, message: &str) -> Self {
        Self::json(
            status,
            &ErrorBody {
                error: message.to_string(),
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Generate,
    Chat,
    Ocr,
}

impl Route {
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        // Ignore any query string.
        let path = path.split('?').next().unwrap_or(path);
        match path.trim_end_matches('/') {
            GENERATE_PATH => Some(Self::Generate),
            CHAT_PATH => Some(Self::Chat),
            OCR_PATH => Some(Self::Ocr),
            _ => None,
        }
    }
}

/// Dispatch a request by method and path.
#[must_use]
pub fn handle_request(method: &str, path: &str, body: &[u8], config: &EngineConfig) -> ApiResponse {
    let Some(route) = Route::from_path(path) else {
        return ApiResponse::plain_error(404, "Not Found");
    };
    if !method.eq_ignore_ascii_case("POST") {
        return ApiResponse::plain_error(405, "Method Not Allowed");
    }

    match route {
        Route::Generate => handle_generate(body, config),
        Route::Chat => handle_chat(body, config),
        Route::Ocr => handle_ocr(body),
    }
}

#[must_use]
pub fn handle_generate(body: &[u8], config: &EngineConfig) -> ApiResponse {
    let request: GenerateRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => return ApiResponse::error(&malformed(&err)),
    };

    match generate(&request, config) {
        Ok(diagram) => ApiResponse::json(200, &diagram),
        Err(err) => ApiResponse::error(&err),
    }
}

#[must_use]
pub fn handle_chat(body: &[u8], config: &EngineConfig) -> ApiResponse {
    let request: ChatRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => return ApiResponse::error(&malformed(&err)),
    };

    match chat(&request, config) {
        Ok(response) => ApiResponse::json(200, &response),
        Err(err) => ApiResponse::error(&err),
    }
}

/// Validate a chat request and answer it.
pub fn chat(request: &ChatRequest, config: &EngineConfig) -> Result<ChatResponse, AutofigureError> {
    let (Some(message), Some(diagram)) = (
        request.message.as_deref().filter(|m| !m.is_empty()),
        request.diagram.as_ref(),
    ) else {
        return Err(AutofigureError::MissingChatInput);
    };

    let diagram_type = request
        .diagram_type
        .as_deref()
        .unwrap_or_else(|| diagram.kind().as_str());
    Ok(respond(message, diagram, diagram_type, config))
}

/// OCR stand-in: any non-empty upload yields the same extracted text.
#[must_use]
pub fn handle_ocr(body: &[u8]) -> ApiResponse {
    if body.is_empty() {
        return ApiResponse::error(&AutofigureError::MissingImage);
    }
    ApiResponse::json(
        200,
        &OcrResponse {
            extracted_text: MOCK_OCR_TEXT.to_string(),
        },
    )
}

fn malformed(err: &serde_json::Error) -> AutofigureError {
    AutofigureError::MalformedRequest {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::{DiagramKind, DiagramResponse};
    use serde_json::{Value, json};

    fn post(path: &str, body: &Value) -> ApiResponse {
        handle_request(
            "POST",
            path,
            body.to_string().as_bytes(),
            &EngineConfig::default(),
        )
    }

    #[test]
    fn generate_returns_diagram_json() {
        let response = post(
            GENERATE_PATH,
            &json!({ "text": "OSI layers: Physical, Data Link, Network", "mode": "auto" }),
        );
        assert_eq!(response.status, 200);
        let diagram: DiagramResponse = serde_json::from_str(&response.body).expect("diagram json");
        assert_eq!(diagram.diagram_type, Some(DiagramKind::Hierarchy));
        assert_eq!(diagram.nodes.len(), 4);

        let value: Value = serde_json::from_str(&response.body).expect("json");
        assert_eq!(value["diagramType"], "hierarchy");
        assert_eq!(value["nodes"][0]["backgroundColor"], "#8b5cf6");
    }

    #[test]
    fn generate_rejects_blank_or_missing_text() {
        for body in [json!({ "text": "   ", "mode": "flow" }), json!({ "mode": "auto" })] {
            let response = post(GENERATE_PATH, &body);
            assert_eq!(response.status, 400);
            let value: Value = serde_json::from_str(&response.body).expect("json");
            assert_eq!(value["error"], "Text is required and cannot be empty");
        }
    }

    #[test]
    fn malformed_body_is_a_client_error() {
        let response = handle_request("POST", GENERATE_PATH, b"{not json", &EngineConfig::default());
        assert_eq!(response.status, 400);
        assert!(response.body.contains("Invalid request body"));
    }

    #[test]
    fn mode_selects_builder() {
        let response = post(
            GENERATE_PATH,
            &json!({ "text": "OSI layers: Physical, Network", "mode": "flow" }),
        );
        let value: Value = serde_json::from_str(&response.body).expect("json");
        assert_eq!(value["diagramType"], "flow");
    }

    #[test]
    fn chat_requires_message_and_diagram() {
        let response = post(CHAT_PATH, &json!({ "message": "explain" }));
        assert_eq!(response.status, 400);
        assert!(response.body.contains("Message and diagram are required"));
    }

    #[test]
    fn chat_round_trips_updated_diagram() {
        let diagram = crate::build_flow("Start here. Finish now.");
        let response = post(
            CHAT_PATH,
            &json!({ "message": "add a review", "diagram": diagram, "diagramType": "flow" }),
        );
        assert_eq!(response.status, 200);
        let value: Value = serde_json::from_str(&response.body).expect("json");
        assert_eq!(value["reply"], "Added new node: Review");
        assert_eq!(value["updatedDiagram"]["nodes"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn ocr_mock_returns_canned_text() {
        let response = handle_request("POST", OCR_PATH, b"\x89PNG", &EngineConfig::default());
        assert_eq!(response.status, 200);
        assert!(response.body.contains("\"extractedText\""));
        assert_eq!(handle_ocr(b"").status, 400);
    }

    #[test]
    fn unknown_route_and_method() {
        assert_eq!(post("/api/nope", &json!({})).status, 404);
        assert_eq!(
            handle_request("GET", GENERATE_PATH, b"", &EngineConfig::default()).status,
            405
        );
        assert_eq!(Route::from_path("/api/generate-diagram/?x=1"), Some(Route::Generate));
    }
}
