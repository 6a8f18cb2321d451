//! calmcp - MCP stdio server for calendar operations.
//!
//! Speaks JSON-RPC 2.0 over stdin/stdout, one message per line. Calendar
//! state lives behind calmcp-core's `EventStore` interface; every tool call
//! returns plain text, never a raised fault.

mod config;
mod handlers;
mod rpc;
mod tools;

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::{Value, json};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use calmcp_core::store::memory::MemoryEventStore;

use crate::config::ServerConfig;
use crate::handlers::ServerState;
use crate::rpc::{RpcRequest, RpcResponse};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "calmcp";

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = load_config();
    let store = Arc::new(MemoryEventStore::with_calendars(&config.calendar_titles()));
    let state = ServerState::new(store, Duration::from_secs(config.access_timeout_secs));

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = handle_line(&state, &line) {
            writeln!(stdout, "{response}")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn load_config() -> ServerConfig {
    // Write a commented template on first run.
    if let Some(path) = ServerConfig::config_path() {
        if !path.exists() {
            if let Err(error) = ServerConfig::create_default_config(&path) {
                debug!("could not write default config: {error:#}");
            }
        }
    }

    match ServerConfig::load() {
        Ok(config) => config,
        Err(error) => {
            error!("falling back to default config: {error:#}");
            ServerConfig::default()
        }
    }
}

/// Handle one incoming line; notifications produce no response.
fn handle_line(state: &ServerState, line: &str) -> Option<String> {
    let request: RpcRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(error) => {
            return Some(RpcResponse::error(
                Value::Null,
                rpc::PARSE_ERROR,
                &format!("Failed to parse request: {error}"),
            ));
        }
    };

    if request.id.is_none() {
        debug!("notification: {}", request.method);
        return None;
    }
    let id = request.id.clone().unwrap_or(Value::Null);

    Some(match dispatch(state, &request) {
        Ok(result) => RpcResponse::success(id, result),
        Err((code, message)) => RpcResponse::error(id, code, &message),
    })
}

fn dispatch(state: &ServerState, request: &RpcRequest) -> Result<Value, (i64, String)> {
    match request.method.as_str() {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(tools::tools_payload()),
        "tools/call" => {
            let name = request
                .params
                .get("name")
                .and_then(Value::as_str)
                .ok_or((rpc::INVALID_PARAMS, "Missing tool name".to_string()))?;
            let default_arguments = json!({});
            let arguments = request.params.get("arguments").unwrap_or(&default_arguments);

            let text = handlers::call_tool(state, name, arguments)
                .ok_or((rpc::INVALID_PARAMS, format!("Unknown tool: {name}")))?;
            Ok(json!({
                "content": [{ "type": "text", "text": text }],
                "isError": false,
            }))
        }
        other => Err((rpc::METHOD_NOT_FOUND, format!("Method not found: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> ServerState {
        ServerState::new(
            Arc::new(MemoryEventStore::with_calendars(&["Personal"])),
            Duration::from_secs(1),
        )
    }

    fn response_value(state: &ServerState, line: &str) -> Value {
        serde_json::from_str(&handle_line(state, line).unwrap()).unwrap()
    }

    #[test]
    fn test_initialize_reports_protocol_and_server_info() {
        let state = make_state();
        let value = response_value(
            &state,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        );
        assert_eq!(value["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(value["result"]["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_tools_list_exposes_five_tools() {
        let state = make_state();
        let value = response_value(&state, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#);
        assert_eq!(value["result"]["tools"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_tools_call_returns_text_content() {
        let state = make_state();
        let value = response_value(
            &state,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"list_calendars","arguments":{}}}"#,
        );
        let text = value["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Available calendars:"));
        assert_eq!(value["result"]["isError"], false);
    }

    #[test]
    fn test_unknown_tool_is_invalid_params() {
        let state = make_state();
        let value = response_value(
            &state,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope"}}"#,
        );
        assert_eq!(value["error"]["code"], rpc::INVALID_PARAMS);
    }

    #[test]
    fn test_unknown_method_is_method_not_found() {
        let state = make_state();
        let value = response_value(&state, r#"{"jsonrpc":"2.0","id":5,"method":"bogus"}"#);
        assert_eq!(value["error"]["code"], rpc::METHOD_NOT_FOUND);
    }

    #[test]
    fn test_notifications_produce_no_response() {
        let state = make_state();
        assert!(
            handle_line(
                &state,
                r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#
            )
            .is_none()
        );
    }

    #[test]
    fn test_unparseable_line_is_parse_error() {
        let state = make_state();
        let value = response_value(&state, "{not json");
        assert_eq!(value["error"]["code"], rpc::PARSE_ERROR);
        assert_eq!(value["id"], Value::Null);
    }
}
