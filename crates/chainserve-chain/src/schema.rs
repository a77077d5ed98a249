//! JSON Schema descriptions of pipeline inputs.
//!
//! Validation itself is serde deserialization into the input type; these
//! schemas only describe that type to clients and the playground.

use serde_json::{json, Value};

/// A pipeline input type that can describe itself as JSON Schema.
pub trait InputSchema {
    fn input_schema() -> Value;
}

/// Schema for a text field with a title.
pub(crate) fn string_property(title: &str) -> Value {
    json!({ "title": title, "type": "string" })
}

/// Schema for a single role-tagged chat message.
pub(crate) fn message_schema() -> Value {
    let variant = |kind: &str, title: &str| {
        json!({
            "title": title,
            "type": "object",
            "properties": {
                "type": { "title": "Type", "enum": [kind], "type": "string" },
                "content": string_property("Content"),
            },
            "required": ["type", "content"],
        })
    };

    json!({
        "anyOf": [
            variant("human", "HumanMessage"),
            variant("ai", "AIMessage"),
            variant("system", "SystemMessage"),
        ]
    })
}

/// Schema for an ordered list of chat messages.
pub(crate) fn messages_schema(title: &str) -> Value {
    json!({
        "title": title,
        "type": "array",
        "items": message_schema(),
    })
}

/// Schema for an object with the given required properties.
pub(crate) fn object_schema(title: &str, properties: &[(&str, Value)]) -> Value {
    let props: serde_json::Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| (name.to_string(), schema.clone()))
        .collect();
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();

    json!({
        "title": title,
        "type": "object",
        "properties": props,
        "required": required,
    })
}
