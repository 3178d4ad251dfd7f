//! Stdio tool-protocol server.
//!
//! A synchronous, line-delimited JSON-RPC 2.0 loop: one frame per line on
//! stdin, one response per line on stdout. Diagnostics go to stderr so the
//! stdout channel stays clean. Each tool call runs to completion before the
//! next frame is read; there is no concurrency inside the server.

use std::io::{BufRead, Write};

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::store::MemoryStore;
use crate::tools;

/// Server name reported during initialization.
pub const SERVER_NAME: &str = "memdoc";

/// Protocol revision reported during initialization.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// The stdio server, wrapping a memory store.
#[derive(Debug)]
pub struct ToolServer {
    store: MemoryStore,
}

impl ToolServer {
    /// Create a server over the given store.
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Run the read-dispatch-respond loop until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or stdout fails; malformed frames are
    /// answered with JSON-RPC errors rather than terminating the loop.
    pub fn run(&self) -> Result<()> {
        info!(
            "serving memory tools over stdio, document at {}",
            self.store.path().display()
        );

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let frame = line.trim();
            if frame.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Value>(frame) {
                Ok(request) => self.handle_request(&request),
                Err(e) => {
                    warn!(error = %e, "discarding unparseable frame");
                    Some(Self::error_response(Value::Null, -32700, "parse error"))
                }
            };

            if let Some(response) = response {
                let mut out = stdout.lock();
                serde_json::to_writer(&mut out, &response)?;
                out.write_all(b"\n")?;
                out.flush()?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one request frame. Returns `None` for notifications.
    #[must_use]
    pub fn handle_request(&self, request: &Value) -> Option<Value> {
        let method = request
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default();

        // Frames without an id are notifications; consume silently.
        let id = match request.get("id") {
            Some(id) if !id.is_null() => id.clone(),
            _ => {
                debug!(%method, "consumed notification");
                return None;
            }
        };

        let result = match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::definitions() })),
            "tools/call" => self.handle_tool_call(request),
            other => Err((-32601, format!("method not found: {other}"))),
        };

        Some(match result {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err((code, message)) => Self::error_response(id, code, &message),
        })
    }

    fn handle_tool_call(&self, request: &Value) -> std::result::Result<Value, (i64, String)> {
        let params = request
            .get("params")
            .ok_or((-32602, "missing params".to_string()))?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or((-32602, "missing tool name".to_string()))?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let outcome = tools::dispatch(&self.store, name, &arguments);
        let text =
            serde_json::to_string_pretty(&outcome).map_err(|e| (-32603, e.to_string()))?;

        Ok(json!({ "content": [{ "type": "text", "text": text }] }))
    }

    fn error_response(id: Value, code: i64, message: &str) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server(tag: &str) -> ToolServer {
        let path = std::env::temp_dir().join(format!(
            "memdoc_server_test_{tag}_{}.md",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        ToolServer::new(MemoryStore::open(&path).expect("failed to open test store"))
    }

    fn cleanup(server: &ToolServer) {
        let _ = std::fs::remove_file(server.store.path());
    }

    #[test]
    fn test_initialize() {
        let server = test_server("initialize");

        let response = server
            .handle_request(&json!({
                "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}
            }))
            .unwrap();

        assert_eq!(response["id"], json!(1));
        assert_eq!(response["result"]["serverInfo"]["name"], json!(SERVER_NAME));
        assert_eq!(
            response["result"]["protocolVersion"],
            json!(PROTOCOL_VERSION)
        );
        assert!(response["result"]["capabilities"]["tools"].is_object());

        cleanup(&server);
    }

    #[test]
    fn test_notification_gets_no_response() {
        let server = test_server("notification");

        let response = server.handle_request(&json!({
            "jsonrpc": "2.0", "method": "notifications/initialized"
        }));
        assert!(response.is_none());

        cleanup(&server);
    }

    #[test]
    fn test_tools_list() {
        let server = test_server("tools_list");

        let response = server
            .handle_request(&json!({
                "jsonrpc": "2.0", "id": 2, "method": "tools/list"
            }))
            .unwrap();

        let listed = response["result"]["tools"].as_array().unwrap();
        assert_eq!(listed.len(), 4);
        assert!(listed.iter().all(|t| t.get("inputSchema").is_some()));

        cleanup(&server);
    }

    #[test]
    fn test_tools_call_round_trip() {
        let server = test_server("tools_call");

        let response = server
            .handle_request(&json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": {
                    "name": "insert_memory",
                    "arguments": { "memory": "served over stdio" }
                }
            }))
            .unwrap();

        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let outcome: Value = serde_json::from_str(text).unwrap();
        assert_eq!(outcome["success"], json!(true));
        assert_eq!(outcome["content"], json!("served over stdio"));

        cleanup(&server);
    }

    #[test]
    fn test_tools_call_domain_error_stays_in_result() {
        // Domain failures are result payloads, not JSON-RPC errors.
        let server = test_server("domain_error");

        let response = server
            .handle_request(&json!({
                "jsonrpc": "2.0", "id": 4, "method": "tools/call",
                "params": {
                    "name": "delete_memory",
                    "arguments": { "memory_id": "9999999999999999" }
                }
            }))
            .unwrap();

        assert!(response.get("error").is_none());
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let outcome: Value = serde_json::from_str(text).unwrap();
        assert_eq!(outcome["success"], json!(false));
        assert!(outcome["error"].as_str().unwrap().contains("does not exist"));

        cleanup(&server);
    }

    #[test]
    fn test_unknown_method() {
        let server = test_server("unknown_method");

        let response = server
            .handle_request(&json!({
                "jsonrpc": "2.0", "id": 5, "method": "resources/list"
            }))
            .unwrap();

        assert_eq!(response["error"]["code"], json!(-32601));

        cleanup(&server);
    }

    #[test]
    fn test_tools_call_missing_params() {
        let server = test_server("missing_params");

        let response = server
            .handle_request(&json!({
                "jsonrpc": "2.0", "id": 6, "method": "tools/call"
            }))
            .unwrap();

        assert_eq!(response["error"]["code"], json!(-32602));

        cleanup(&server);
    }
}
