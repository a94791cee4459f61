//! Gemini-backed intent interpreter adapter.

use crate::command::domain::Intent;
use crate::command::ports::{IntentInterpreter, InterpreterError, InterpreterResult};
use async_trait::async_trait;
use minijinja::{Environment, context};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Gemini model used for interpretation.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini REST API base URL.
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Hard deadline for one interpretation round-trip.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the API key.
const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Prompt template rendered with the user command before each request.
const PROMPT_TEMPLATE: &str = r#"You are an intent interpreter for a task management system. Your ONLY job is to convert natural language commands into structured JSON.

THE TASK STATE MODEL:
- Valid states: "Not Started", "In Progress", "Completed"
- Valid transitions: Not Started → In Progress → Completed
- You MUST use these EXACT state names (case-sensitive)

YOUR OUTPUT MUST BE VALID JSON WITH THIS STRUCTURE:
{
  "action": "create" | "update_state" | "delete" | "list" | "unknown",
  "taskName": "exact task name mentioned" | null,
  "targetState": "Not Started" | "In Progress" | "Completed" | null,
  "filterState": "Not Started" | "In Progress" | "Completed" | null,
  "confidence": "high" | "medium" | "low",
  "ambiguity": "description of any ambiguity" | null
}

RULES:
1. ALWAYS respond with ONLY valid JSON, no explanation text
2. Extract the task name EXACTLY as mentioned by the user
3. Map user intent to one of these actions:
   - "create": user wants to create a new task
   - "update_state": user wants to change a task's state
   - "delete": user wants to delete a task
   - "list": user wants to see tasks (optionally filtered)
   - "unknown": cannot determine intent
4. For state updates, interpret user language:
   - "start", "begin", "working on" → "In Progress"
   - "done", "complete", "finished" → "Completed"
   - "mark as not started", "reset" → "Not Started"
5. Use "confidence" to indicate certainty:
   - "high": clear, unambiguous command
   - "medium": mostly clear but some interpretation needed
   - "low": unclear or ambiguous
6. If ambiguous (e.g., multiple possible interpretations), set "ambiguity" field

EXAMPLES:

Input: "Create a task called Buy groceries"
Output: {"action":"create","taskName":"Buy groceries","targetState":null,"filterState":null,"confidence":"high","ambiguity":null}

Input: "Mark 'Buy groceries' as done"
Output: {"action":"update_state","taskName":"Buy groceries","targetState":"Completed","filterState":null,"confidence":"high","ambiguity":null}

Input: "Start working on homework"
Output: {"action":"update_state","taskName":"homework","targetState":"In Progress","filterState":null,"confidence":"medium","ambiguity":"Task name might be partial"}

Input: "Show me all completed tasks"
Output: {"action":"list","taskName":null,"targetState":null,"filterState":"Completed","confidence":"high","ambiguity":null}

Input: "Delete the grocery task"
Output: {"action":"delete","taskName":"grocery task","targetState":null,"filterState":null,"confidence":"medium","ambiguity":"Task name might be partial"}

Input: "What's the weather?"
Output: {"action":"unknown","taskName":null,"targetState":null,"filterState":null,"confidence":"high","ambiguity":"Not a task management command"}

REMEMBER: Output ONLY the JSON object, nothing else.

User command: "{{ command }}""#;

/// Intent interpreter backed by the Gemini `generateContent` API.
///
/// Each call is a single round-trip with a hard timeout and no retry. The
/// adapter reports failures honestly; the dispatcher decides what a failed
/// interpretation means for the command.
#[derive(Debug, Clone)]
pub struct GeminiInterpreter {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiInterpreter {
    /// Creates an interpreter with the given API key and default model.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Configuration`] when the HTTP client
    /// cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> InterpreterResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|err| InterpreterError::Configuration(err.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Creates an interpreter configured from the `GEMINI_API_KEY`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Configuration`] when the variable is
    /// unset or empty.
    pub fn from_env() -> InterpreterResult<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                InterpreterError::Configuration("Gemini API key is not configured".to_owned())
            })?;
        Self::new(api_key)
    }

    /// Overrides the model after construction.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the per-request deadline after construction.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send_request(&self, prompt: String) -> InterpreterResult<String> {
        let url = format!(
            "{BASE_URL}/{model}:generateContent?key={api_key}",
            model = self.model,
            api_key = self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_owned(),
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|err| classify_transport_error(err, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InterpreterError::request(std::io::Error::other(format!(
                "Gemini API returned {status}: {body}"
            ))));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| classify_transport_error(err, self.timeout))?;
        extract_text(parsed)
    }
}

#[async_trait]
impl IntentInterpreter for GeminiInterpreter {
    async fn interpret(&self, command: &str) -> InterpreterResult<Intent> {
        let prompt = render_prompt(command)?;
        let text = self.send_request(prompt).await?;
        parse_intent(&text)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn render_prompt(command: &str) -> InterpreterResult<String> {
    Environment::new()
        .render_str(PROMPT_TEMPLATE, context! { command => command })
        .map_err(|err| {
            InterpreterError::Configuration(format!("prompt template failed to render: {err}"))
        })
}

fn classify_transport_error(err: reqwest::Error, timeout: Duration) -> InterpreterError {
    if err.is_timeout() {
        InterpreterError::Timeout(timeout)
    } else {
        InterpreterError::request(err)
    }
}

fn extract_text(response: GenerateContentResponse) -> InterpreterResult<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            InterpreterError::MalformedResponse(
                "Gemini API returned no text in the response candidates".to_owned(),
            )
        })
}

/// Parses model output into an [`Intent`], tolerating Markdown code fences.
///
/// A payload that is not JSON and a payload missing the `action` field are
/// reported as distinct malformed responses.
fn parse_intent(text: &str) -> InterpreterResult<Intent> {
    let cleaned = strip_code_fences(text);
    let value: serde_json::Value = serde_json::from_str(&cleaned).map_err(|_| {
        InterpreterError::MalformedResponse("AI returned invalid JSON format".to_owned())
    })?;
    if value.get("action").is_none_or(serde_json::Value::is_null) {
        return Err(InterpreterError::MalformedResponse(
            "AI response missing required \"action\" field".to_owned(),
        ));
    }
    serde_json::from_value(value)
        .map_err(|err| InterpreterError::MalformedResponse(err.to_string()))
}

fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_owned()
}
