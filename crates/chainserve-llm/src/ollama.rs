//! Native Ollama API client for model discovery, completion and streaming.
//!
//! Uses Ollama's native `/api/chat` endpoint (not the OpenAI-compatible one) so
//! generation metrics like tokens/sec, eval time and load duration are available.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use chainserve_core::{ChainError, ChatMessage};
use futures::{Stream, StreamExt};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::{ChatModel, ModelResponse, TextStream};

const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Response from Ollama's /api/tags endpoint.
#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModelInfo>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelInfo {
    name: String,
}

/// Lists the model names served by an Ollama instance.
pub async fn list_models(ollama_host: &str) -> Result<Vec<String>, ChainError> {
    let url = format!("{}/api/tags", ollama_host.trim_end_matches('/'));

    let response = Client::new()
        .get(&url)
        .timeout(DISCOVERY_TIMEOUT)
        .send()
        .await
        .map_err(request_err)?;
    let response = check_status(response).await?;

    let tags: OllamaTagsResponse = response.json().await.map_err(|e| {
        ChainError::MalformedResponse(format!("Failed to parse Ollama tags: {}", e))
    })?;

    let names: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
    debug!("Ollama serves {} models", names.len());
    Ok(names)
}

/// Checks that `model` is served by the Ollama instance at `ollama_host`.
///
/// A name without a tag matches the `:latest` variant, as Ollama itself resolves it.
pub async fn verify_model(ollama_host: &str, model: &str) -> Result<(), ChainError> {
    let names = list_models(ollama_host).await?;
    let wanted = normalize_tag(model);

    if names.iter().any(|n| normalize_tag(n) == wanted) {
        info!("Model {} is available", model);
        return Ok(());
    }

    Err(ChainError::ModelUnavailable(format!(
        "model '{}' not found (available: {})",
        model,
        if names.is_empty() { "none".to_string() } else { names.join(", ") }
    )))
}

fn normalize_tag(name: &str) -> String {
    match name.contains(':') {
        true => name.to_string(),
        false => format!("{name}:latest"),
    }
}

/// Performance metrics from Ollama's native API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OllamaMetrics {
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub load_duration: u64,
    #[serde(default)]
    pub prompt_eval_count: u32,
    #[serde(default)]
    pub prompt_eval_duration: u64,
    #[serde(default)]
    pub eval_count: u32,
    #[serde(default)]
    pub eval_duration: u64,
}

impl OllamaMetrics {
    /// Calculates tokens generated per second.
    pub fn tokens_per_sec(&self) -> f64 {
        if self.eval_duration == 0 {
            return 0.0;
        }
        (self.eval_count as f64) / (self.eval_duration as f64 / 1_000_000_000.0)
    }

    /// Total request duration in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.total_duration / 1_000_000
    }

    /// Model load time in milliseconds.
    pub fn load_duration_ms(&self) -> u64 {
        self.load_duration / 1_000_000
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    message: Option<OllamaResponseMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    metrics: OllamaMetrics,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

/// Client for Ollama's native chat API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    api_base: String,
    model: String,
    timeout: Option<Duration>,
}

impl OllamaClient {
    /// Creates a new client for the given model and Ollama base URL.
    pub fn new(model: &str, api_base: &str) -> Self {
        let base = api_base.trim_end_matches('/').trim_end_matches("/v1").to_string();

        Self {
            client: Client::new(),
            api_base: base,
            model: model.to_string(),
            timeout: None,
        }
    }

    /// Bounds every model request by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn chat_request(&self, messages: &[ChatMessage], stream: bool) -> RequestBuilder {
        let body = OllamaChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| OllamaMessage { role: m.role(), content: m.content() })
                .collect(),
            stream,
        };

        let request = self
            .client
            .post(format!("{}/api/chat", self.api_base))
            .json(&body);

        match self.timeout {
            Some(t) => request.timeout(t),
            None => request,
        }
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<ModelResponse, ChainError> {
        let response = self
            .chat_request(messages, false)
            .send()
            .await
            .map_err(request_err)?;
        let response = check_status(response).await?;

        let resp: OllamaChatResponse = response.json().await.map_err(|e| {
            ChainError::MalformedResponse(format!("Failed to parse Ollama response: {}", e))
        })?;

        if let Some(err) = resp.error {
            return Err(ChainError::ModelUnavailable(err));
        }

        info!(
            "Ollama: {}ms total, {:.1} tok/s, {} eval tokens",
            resp.metrics.total_duration_ms(),
            resp.metrics.tokens_per_sec(),
            resp.metrics.eval_count
        );

        Ok(ModelResponse {
            model: self.model.clone(),
            content: resp.message.map(|m| m.content),
            metrics: resp.metrics,
        })
    }

    async fn stream(&self, messages: &[ChatMessage]) -> Result<TextStream, ChainError> {
        let response = self
            .chat_request(messages, true)
            .send()
            .await
            .map_err(request_err)?;
        let response = check_status(response).await?;

        let bytes = response.bytes_stream().map(|r| r.map(|b| b.to_vec()));
        Ok(ndjson_text_stream(Box::pin(bytes)))
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Vec<u8>>> + Send>>;

/// Reassembles newline-delimited JSON across arbitrary byte chunk boundaries.
struct LineReader {
    bytes: ByteStream,
    buffer: Vec<u8>,
    finished: bool,
}

impl LineReader {
    fn next_line(&mut self) -> Option<String> {
        let pos = self.buffer.iter().position(|b| *b == b'\n')?;
        let line: Vec<u8> = self.buffer.drain(..=pos).collect();
        Some(String::from_utf8_lossy(&line).trim().to_string())
    }

    fn stop(&mut self) {
        self.finished = true;
        self.buffer.clear();
    }
}

fn ndjson_text_stream(bytes: ByteStream) -> TextStream {
    let reader = LineReader { bytes, buffer: Vec::new(), finished: false };

    let stream = futures::stream::unfold(reader, |mut reader| async move {
        loop {
            while let Some(line) = reader.next_line() {
                if line.is_empty() {
                    continue;
                }

                let resp: OllamaChatResponse = match serde_json::from_str(&line) {
                    Ok(resp) => resp,
                    Err(e) => {
                        reader.stop();
                        let err = ChainError::MalformedResponse(format!("Bad stream line: {}", e));
                        return Some((Err(err), reader));
                    }
                };

                if let Some(err) = resp.error {
                    reader.stop();
                    return Some((Err(ChainError::ModelUnavailable(err)), reader));
                }

                if resp.done {
                    info!(
                        "Ollama stream: {}ms total, {:.1} tok/s, {} eval tokens",
                        resp.metrics.total_duration_ms(),
                        resp.metrics.tokens_per_sec(),
                        resp.metrics.eval_count
                    );
                    reader.stop();
                    return match resp.message {
                        Some(msg) if !msg.content.is_empty() => Some((Ok(msg.content), reader)),
                        _ => None,
                    };
                }

                match resp.message {
                    Some(msg) if !msg.content.is_empty() => return Some((Ok(msg.content), reader)),
                    _ => continue,
                }
            }

            if reader.finished {
                return None;
            }

            match reader.bytes.next().await {
                Some(Ok(chunk)) => reader.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    reader.stop();
                    return Some((Err(request_err(e)), reader));
                }
                None => {
                    // Flush a trailing line without a newline terminator.
                    reader.finished = true;
                    if !reader.buffer.is_empty() {
                        reader.buffer.push(b'\n');
                    }
                }
            }
        }
    });

    Box::pin(stream)
}

/// Maps a transport error to the model error taxonomy.
fn request_err(e: reqwest::Error) -> ChainError {
    if e.is_timeout() {
        return ChainError::ModelTimeout(e.to_string());
    }
    if e.is_decode() {
        return ChainError::MalformedResponse(e.to_string());
    }
    ChainError::ModelUnavailable(e.to_string())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ChainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);

    warn!("Ollama returned {}: {}", status, detail);
    Err(ChainError::ModelUnavailable(format!("{}: {}", status, detail)))
}
