//! Gemini `generateContent` client.
//!
//! Implements both AI ports over one HTTP client. Transport problems
//! (connect, timeout, non-2xx) and schema problems (no candidate text, JSON
//! that does not fit, empty blueprint) are reported as distinct errors.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, instrument, warn};

use ec_core::config::AiConfig;
use ec_core::ports::{AiServiceError, ClassifierPort, InstructionGeneratorPort};
use ec_core::scan::{
    CapturedImage, ClassificationResult, InstructionRequest, ReuseInstruction, StepDraft,
};
use ec_core::Language;

use super::prompt::{classification_prompt, instruction_prompt};
use super::schema::{classification_schema, instruction_schema};
use super::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InstructionPayload, Part,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_PREVIEW: usize = 200;

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiServiceError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends one request and returns the model's text answer.
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, AiServiceError> {
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AiServiceError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AiServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let preview: String = String::from_utf8_lossy(&body)
                .chars()
                .take(ERROR_BODY_PREVIEW)
                .collect();
            return Err(AiServiceError::Transport(format!("HTTP {status}: {preview}")));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&body)
            .map_err(|e| AiServiceError::MalformedResponse(format!("envelope: {e}")))?;
        parsed
            .text()
            .ok_or_else(|| AiServiceError::MalformedResponse("no candidate text".to_string()))
    }
}

/// Drops a Markdown code fence some models wrap around JSON.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

pub(crate) fn parse_classification(text: &str) -> Result<ClassificationResult, AiServiceError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AiServiceError::MalformedResponse(format!("classification: {e}")))
}

/// Builds a blueprint, renumbering steps 1..N in the order returned.
pub(crate) fn parse_instruction(
    text: &str,
    request: &InstructionRequest,
) -> Result<ReuseInstruction, AiServiceError> {
    let payload: InstructionPayload = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AiServiceError::MalformedResponse(format!("instructions: {e}")))?;

    let numbered_in_order = payload
        .steps
        .iter()
        .zip(1i64..)
        .all(|(step, expected)| step.step == Some(expected));
    if !numbered_in_order {
        warn!(
            steps = payload.steps.len(),
            "model step numbering was not 1..N; renumbering in array order"
        );
    }

    let project_name = payload
        .project_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| request.project_name.clone());
    let material = payload
        .material
        .filter(|material| !material.trim().is_empty())
        .unwrap_or_else(|| request.material_name.clone());
    let search_query = payload
        .youtube_search_query
        .filter(|query| !query.trim().is_empty())
        .unwrap_or_else(|| format!("{project_name} {material} DIY"));

    let drafts = payload
        .steps
        .into_iter()
        .map(|step| StepDraft {
            instruction: step.instruction,
            visual_prompt: step.visual_prompt,
        })
        .collect();

    ReuseInstruction::from_ordered_steps(project_name, material, drafts, search_query)
        .map_err(|e| AiServiceError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl ClassifierPort for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model, language = %language, bytes = image.len()))]
    async fn classify(
        &self,
        image: &CapturedImage,
        language: Language,
    ) -> Result<ClassificationResult, AiServiceError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::inline_data(image.mime().as_str(), STANDARD.encode(image.bytes())),
                    Part::text(classification_prompt(language)),
                ],
            }],
            generation_config: GenerationConfig::json(classification_schema()),
        };

        let text = self.generate(&request).await?;
        debug!(chars = text.len(), "classification response received");
        parse_classification(&text)
    }
}

#[async_trait]
impl InstructionGeneratorPort for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model, language = %language, tools = request.tools.len()))]
    async fn generate_instructions(
        &self,
        request: &InstructionRequest,
        language: Language,
    ) -> Result<ReuseInstruction, AiServiceError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part::text(instruction_prompt(request, language))],
            }],
            generation_config: GenerationConfig::json(instruction_schema()),
        };

        let text = self.generate(&body).await?;
        debug!(chars = text.len(), "instruction response received");
        parse_instruction(&text, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_core::scan::{Classification, ImageMime, Tool, ToolSelection};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn config(base_url: String) -> AiConfig {
        AiConfig {
            base_url,
            model: "test-model".to_string(),
            api_key: "secret".to_string(),
            timeout_secs: 5,
            cache_classifications: false,
        }
    }

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        })
        .to_string()
    }

    fn request() -> InstructionRequest {
        InstructionRequest::new(
            "PET Bottle",
            None,
            ToolSelection::new([Tool::Scissors, Tool::Glue]).unwrap(),
        )
    }

    fn image() -> CapturedImage {
        CapturedImage::new(vec![0xFF, 0xD8, 0xFF], ImageMime::Jpeg).unwrap()
    }

    #[tokio::test]
    async fn classify_posts_inline_image_and_parses_result() {
        let mut server = Server::new_async().await;
        let answer = json!({
            "classification": "Reusable",
            "reason": "Clean PET plastic",
            "materialName": "PET Bottle",
            "impactMessage": "Recycling one bottle saves energy."
        })
        .to_string();
        let mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_header("x-goog-api-key", "secret")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({
                    "generationConfig": {"responseMimeType": "application/json"}
                })),
                Matcher::Regex(
                    r#""inlineData":\{"mimeType":"image/jpeg","data":"/9j/"\}"#.to_string(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(&answer))
            .create_async()
            .await;

        let client = GeminiClient::new(&config(server.url())).unwrap();
        let result = client.classify(&image(), Language::En).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.classification, Classification::Reusable);
        assert_eq!(result.material_name, "PET Bottle");
        assert!(result.suggestions.is_empty());
    }

    #[tokio::test]
    async fn classify_maps_http_error_to_transport() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let client = GeminiClient::new(&config(server.url())).unwrap();
        let err = client.classify(&image(), Language::En).await.unwrap_err();

        assert!(matches!(err, AiServiceError::Transport(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn classify_rejects_unknown_classification_as_malformed() {
        let mut server = Server::new_async().await;
        let answer = json!({
            "classification": "Compostable",
            "reason": "r",
            "materialName": "m",
            "impactMessage": "i"
        })
        .to_string();
        server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(200)
            .with_body(envelope(&answer))
            .create_async()
            .await;

        let client = GeminiClient::new(&config(server.url())).unwrap();
        let err = client.classify(&image(), Language::Ta).await.unwrap_err();

        assert!(matches!(err, AiServiceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn classify_without_candidates_is_malformed() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(200)
            .with_body(json!({"candidates": []}).to_string())
            .create_async()
            .await;

        let client = GeminiClient::new(&config(server.url())).unwrap();
        let err = client.classify(&image(), Language::En).await.unwrap_err();

        assert_eq!(
            err,
            AiServiceError::MalformedResponse("no candidate text".to_string())
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let client = GeminiClient::new(&config("http://127.0.0.1:1".to_string())).unwrap();
        let err = client.classify(&image(), Language::En).await.unwrap_err();
        assert!(matches!(err, AiServiceError::Transport(_)));
    }

    #[tokio::test]
    async fn generate_instructions_maps_search_query_and_numbers_steps() {
        let mut server = Server::new_async().await;
        let answer = json!({
            "projectName": "Bottle Planter",
            "material": "PET Bottle",
            "steps": [
                {"step": 1, "instruction": "Cut the bottle in half.", "visualPrompt": "bottle cut"},
                {"step": 2, "instruction": "Glue the edges.", "visualPrompt": "glue"}
            ],
            "youtubeSearchQuery": "pet bottle planter diy"
        })
        .to_string();
        let mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_body(Matcher::Regex("ONLY these tools: Scissors, Glue".to_string()))
            .with_status(200)
            .with_body(envelope(&answer))
            .create_async()
            .await;

        let client = GeminiClient::new(&config(server.url())).unwrap();
        let instruction = client
            .generate_instructions(&request(), Language::En)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(instruction.project_name(), "Bottle Planter");
        assert_eq!(instruction.search_query(), "pet bottle planter diy");
        assert_eq!(instruction.steps()[0].step, 1);
        assert_eq!(instruction.steps()[1].visual_prompt, "glue");
    }

    #[test]
    fn parse_instruction_renumbers_gapped_steps() {
        let text = json!({
            "projectName": "Lamp",
            "material": "Jar",
            "steps": [
                {"step": 3, "instruction": "a", "visualPrompt": "x"},
                {"step": 7, "instruction": "b", "visualPrompt": "y"},
                {"instruction": "c"}
            ],
            "youtubeSearchQuery": "jar lamp"
        })
        .to_string();

        let instruction = parse_instruction(&text, &request()).unwrap();
        let numbers: Vec<u32> = instruction.steps().iter().map(|s| s.step).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(instruction.steps()[2].instruction, "c");
    }

    #[test]
    fn parse_instruction_with_no_steps_is_malformed() {
        let text = json!({"projectName": "Lamp", "steps": []}).to_string();
        let err = parse_instruction(&text, &request()).unwrap_err();
        assert!(matches!(err, AiServiceError::MalformedResponse(_)));
    }

    #[test]
    fn parse_instruction_falls_back_to_request_names() {
        let text = json!({"steps": [{"step": 1, "instruction": "a", "visualPrompt": "p"}]}).to_string();
        let instruction = parse_instruction(&text, &request()).unwrap();
        assert_eq!(instruction.project_name(), "Upcycled Craft");
        assert_eq!(instruction.material(), "PET Bottle");
        assert_eq!(instruction.search_query(), "Upcycled Craft PET Bottle DIY");
    }

    #[test]
    fn parse_classification_accepts_fenced_json() {
        let text = "```json\n{\"classification\":\"Hazardous\",\"reason\":\"r\",\"materialName\":\"Used Syringe\",\"impactMessage\":\"i\"}\n```";
        let result = parse_classification(text).unwrap();
        assert_eq!(result.classification, Classification::Hazardous);
    }
}
