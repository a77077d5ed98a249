//! The pipeline bindings served by default.

use std::sync::Arc;

use chainserve_chain::presets;
use chainserve_llm::ChatModel;

use crate::state::{PipelineBinding, PlaygroundType, RouteOptions};

/// Builds the `/prompt`, `/chat`, `/translate` and `/llm` bindings around one model handle.
pub fn default_bindings(model: Arc<dyn ChatModel>) -> Vec<PipelineBinding> {
    vec![
        PipelineBinding::new("/prompt", Arc::new(presets::topic_chain(model.clone()))),
        PipelineBinding::new("/chat", Arc::new(presets::chat_chain(model.clone()))).with_options(
            RouteOptions {
                enable_feedback_endpoint: true,
                enable_public_trace_link_endpoint: true,
                playground_type: PlaygroundType::Chat,
            },
        ),
        PipelineBinding::new("/translate", Arc::new(presets::translate_chain(model.clone()))),
        PipelineBinding::new("/llm", Arc::new(presets::llm_chain(model))),
    ]
}
