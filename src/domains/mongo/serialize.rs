//! Conversion between tool payloads (JSON) and BSON documents.
//!
//! Tool responses travel as text, so every `ObjectId` is rewritten to its hex
//! string before rendering, at any depth.

use bson::{Bson, Document};
use serde_json::{Map, Value};

/// Convert a JSON object received from a client into a BSON document.
///
/// Extended JSON wrappers such as `{"$oid": "..."}` or `{"$date": "..."}` are
/// decoded into their BSON types.
pub fn document_from_json(object: Map<String, Value>) -> Result<Document, String> {
    Document::try_from(object).map_err(|e| format!("invalid document: {}", e))
}

/// Recursively replace every `ObjectId` with its hex string.
pub fn stringify_object_ids(value: Bson) -> Bson {
    match value {
        Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
        Bson::Document(doc) => Bson::Document(stringify_document_ids(doc)),
        Bson::Array(items) => Bson::Array(items.into_iter().map(stringify_object_ids).collect()),
        other => other,
    }
}

/// [`stringify_object_ids`] applied to each field of a document.
pub fn stringify_document_ids(document: Document) -> Document {
    document
        .into_iter()
        .map(|(key, value)| (key, stringify_object_ids(value)))
        .collect()
}

/// Render a document as JSON for a tool response.
pub fn document_to_json(document: Document) -> Value {
    Bson::Document(stringify_document_ids(document)).into_relaxed_extjson()
}

/// Canonical text form of a document identifier.
pub fn id_to_string(id: &Bson) -> String {
    match stringify_object_ids(id.clone()) {
        Bson::String(s) => s,
        other => other.into_relaxed_extjson().to_string(),
    }
}
