//! Shared state handed to route handlers.

use std::sync::Arc;

use chainserve_chain::Runnable;

use crate::feedback::{FeedbackSink, LogFeedbackSink};

/// Which console the playground renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaygroundType {
    /// Form built from the input schema.
    #[default]
    Default,
    /// Conversation view sending the message history.
    Chat,
}

impl PlaygroundType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaygroundType::Default => "default",
            PlaygroundType::Chat => "chat",
        }
    }
}

/// Auxiliary endpoints enabled for a binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOptions {
    pub enable_feedback_endpoint: bool,
    pub enable_public_trace_link_endpoint: bool,
    pub playground_type: PlaygroundType,
}

/// A pipeline mounted at a URL path.
pub struct PipelineBinding {
    pub path: String,
    pub runnable: Arc<dyn Runnable>,
    pub options: RouteOptions,
}

impl PipelineBinding {
    pub fn new(path: impl Into<String>, runnable: Arc<dyn Runnable>) -> Self {
        Self {
            path: path.into(),
            runnable,
            options: RouteOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }
}

/// Process-wide collaborators shared by all bindings.
pub struct AppState {
    /// Base URL for public trace links; `None` disables them.
    pub trace_base_url: Option<String>,
    pub feedback: Arc<dyn FeedbackSink>,
}

impl AppState {
    pub fn new(trace_base_url: Option<String>) -> Self {
        Self {
            trace_base_url,
            feedback: Arc::new(LogFeedbackSink),
        }
    }

    pub fn with_feedback_sink(mut self, sink: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = sink;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Router state for one binding's endpoints.
#[derive(Clone)]
pub struct RouteState {
    pub binding: Arc<PipelineBinding>,
    pub app: Arc<AppState>,
}
