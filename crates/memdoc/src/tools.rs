//! Tool-protocol surface for the memory store.
//!
//! The four store operations are declared as protocol tools with JSON
//! input schemas. [`dispatch`] is the boundary described by the error
//! design: it validates required fields, invokes the store, and reshapes
//! every store error into a `{success:false, error, tool}` result object
//! instead of letting it propagate.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::store::MemoryStore;

/// Tool name for inserting a memory.
pub const INSERT_TOOL: &str = "insert_memory";

/// Tool name for updating a memory.
pub const UPDATE_TOOL: &str = "update_memory";

/// Tool name for deleting a memory.
pub const DELETE_TOOL: &str = "delete_memory";

/// Tool name for listing memories.
pub const LIST_TOOL: &str = "list_memories";

/// A protocol-level tool declaration.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// The tool's wire name.
    pub name: &'static str,
    /// What the tool does and when to call it.
    pub description: &'static str,
    /// JSON Schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Declarations for all four tools, in a stable order.
#[must_use]
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: INSERT_TOOL,
            description: "Store a new memory entry. The memory must be a semantically \
                complete, unambiguous declarative statement, and must not duplicate \
                an existing entry.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "memory": {
                        "type": "string",
                        "description": "The declarative memory content to store."
                    }
                },
                "required": ["memory"]
            }),
        },
        ToolDefinition {
            name: UPDATE_TOOL,
            description: "Overwrite an existing memory entry whose content conflicts \
                with newer facts. The memory_id identifies the entry; the memory field \
                replaces its content.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "memory_id": {
                        "type": "string",
                        "description": "The unique identifier of the entry to update."
                    },
                    "memory": {
                        "type": "string",
                        "description": "The revised declarative content that replaces the entry."
                    }
                },
                "required": ["memory_id", "memory"]
            }),
        },
        ToolDefinition {
            name: DELETE_TOOL,
            description: "Permanently remove a memory entry. The operation is \
                irreversible.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "memory_id": {
                        "type": "string",
                        "description": "The unique identifier of the entry to delete."
                    }
                },
                "required": ["memory_id"]
            }),
        },
        ToolDefinition {
            name: LIST_TOOL,
            description: "List all stored memory entries with previewed content.",
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Invoke a tool by name and return its result object.
///
/// Always returns a value: successes carry `success:true` plus the
/// operation's fields, and every failure — missing argument, unknown tool,
/// domain error, I/O error — is reshaped into
/// `{success:false, error, tool}`. Nothing here is fatal to the process.
#[must_use]
pub fn dispatch(store: &MemoryStore, name: &str, args: &Value) -> Value {
    debug!(tool = name, "dispatching tool call");
    match call(store, name, args) {
        Ok(value) => value,
        Err(message) => failure(name, &message),
    }
}

/// Build the uniform failure result object.
#[must_use]
pub fn failure(tool: &str, message: &str) -> Value {
    json!({
        "success": false,
        "error": message,
        "tool": tool,
    })
}

fn call(store: &MemoryStore, name: &str, args: &Value) -> std::result::Result<Value, String> {
    match name {
        INSERT_TOOL => {
            let memory = required_str(args, "memory")?;
            outcome_value(store.insert(memory))
        }
        UPDATE_TOOL => {
            let id = required_str(args, "memory_id")?;
            let memory = required_str(args, "memory")?;
            outcome_value(store.update(id, memory))
        }
        DELETE_TOOL => {
            let id = required_str(args, "memory_id")?;
            outcome_value(store.delete(id))
        }
        LIST_TOOL => outcome_value(store.list()),
        other => Err(format!("Unknown tool: {other}")),
    }
}

fn outcome_value<T: Serialize>(
    result: crate::error::Result<T>,
) -> std::result::Result<Value, String> {
    match result {
        Ok(outcome) => serde_json::to_value(outcome).map_err(|e| e.to_string()),
        Err(err) => Err(err.to_string()),
    }
}

fn required_str<'a>(args: &'a Value, field: &str) -> std::result::Result<&'a str, String> {
    args.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing required field: {field}"))
}
