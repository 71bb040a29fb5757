// ABOUTME: Integration tests for MCP request processing and the line-delimited stdio transport
// ABOUTME: Verifies protocol methods, JSON-RPC error codes, and isError tool results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{tool_fixture, workout, FitFileBuilder, MockProvider};
use peaks_mcp_server::jsonrpc::{error_codes, JsonRpcRequest};
use peaks_mcp_server::mcp::{McpRequestProcessor, StdioTransport};
use serde_json::{json, Value};
use tokio::io::{duplex, AsyncBufReadExt, BufReader};

fn processor(provider: MockProvider) -> McpRequestProcessor {
    let (_, context, registry) = tool_fixture(provider);
    McpRequestProcessor::new(Arc::new(registry), context)
}

fn call(name: &str, arguments: Value) -> JsonRpcRequest {
    JsonRpcRequest::with_id(
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
        json!(7),
    )
}

#[tokio::test]
async fn test_initialize_and_ping() -> Result<()> {
    let processor = processor(MockProvider::new());

    let init = processor
        .handle_request(JsonRpcRequest::new("initialize", Some(json!({}))))
        .await
        .unwrap();
    let result = init.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "peaks-mcp-server");

    let ping = processor
        .handle_request(JsonRpcRequest::new("ping", None))
        .await
        .unwrap();
    assert_eq!(ping.result, Some(json!({})));
    assert_eq!(ping.id, Some(json!(1)));
    Ok(())
}

#[tokio::test]
async fn test_tools_list_exposes_schemas() -> Result<()> {
    let processor = processor(MockProvider::new());

    let response = processor
        .handle_request(JsonRpcRequest::new("tools/list", None))
        .await
        .unwrap();
    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 14);

    let best_power = tools
        .iter()
        .find(|tool| tool["name"] == "get_best_power")
        .unwrap();
    assert_eq!(best_power["inputSchema"]["type"], "object");
    assert_eq!(
        best_power["inputSchema"]["properties"]["durations"]["items"]["type"],
        "integer"
    );
    assert_eq!(
        best_power["inputSchema"]["required"],
        json!(["workoutId", "durations"])
    );

    let peaks = tools.iter().find(|tool| tool["name"] == "get_peaks").unwrap();
    assert_eq!(
        peaks["inputSchema"]["properties"]["sport"]["enum"],
        json!(["Bike", "Run"])
    );
    assert_eq!(peaks["inputSchema"]["required"], json!(["sport", "type"]));
    Ok(())
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let processor = processor(MockProvider::new());

    let response = processor
        .handle_request(JsonRpcRequest::notification("notifications/initialized", None))
        .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_unknown_method_and_bad_params() -> Result<()> {
    let processor = processor(MockProvider::new());

    let unknown = processor
        .handle_request(JsonRpcRequest::new("resources/list", None))
        .await
        .unwrap();
    assert_eq!(unknown.error.unwrap().code, error_codes::METHOD_NOT_FOUND);

    let missing = processor
        .handle_request(JsonRpcRequest::new("tools/call", None))
        .await
        .unwrap();
    assert_eq!(missing.error.unwrap().code, error_codes::INVALID_PARAMS);

    let unknown_tool = processor
        .handle_request(call("get_vo2max", json!({})))
        .await
        .unwrap();
    assert_eq!(unknown_tool.error.unwrap().code, error_codes::INVALID_PARAMS);
    Ok(())
}

#[tokio::test]
async fn test_tool_success_is_text_content() -> Result<()> {
    let file = FitFileBuilder::new().power(&[150, 250, 350]).build();
    let processor = processor(
        MockProvider::new()
            .with_workout(workout(11, "Openers", "2024-04-01"))
            .with_file(11, file),
    );

    let response = processor
        .handle_request(call("get_best_power", json!({ "workoutId": 11, "durations": [2] })))
        .await
        .unwrap();
    assert_eq!(response.id, Some(json!(7)));

    let result = response.result.unwrap();
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    let report: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap())?;
    assert_eq!(report["results"][0]["bestAveragePower"], 300);
    assert_eq!(report["results"][0]["startOffsetSeconds"], 1);
    Ok(())
}

#[tokio::test]
async fn test_tool_failure_is_error_result() -> Result<()> {
    let processor =
        processor(MockProvider::new().with_workout(workout(12, "Indoor", "2024-04-02")));

    let response = processor
        .handle_request(call("get_best_power", json!({ "workoutId": 12, "durations": [5] })))
        .await
        .unwrap();

    assert!(response.error.is_none());
    assert_eq!(
        response.result.unwrap(),
        json!({
            "content": [{"type": "text", "text": "No activity file available for workout 12"}],
            "isError": true
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_stdio_transport_round_trip() -> Result<()> {
    let processor = Arc::new(processor(MockProvider::new()));
    let transport = StdioTransport::new(processor);

    let input = concat!(
        r#"{"jsonrpc":"2.0","method":"ping","id":1}"#,
        "\n\n",
        "{not json\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"get_athlete_id"},"id":"a"}"#,
        "\n",
    );
    let (writer, reader) = duplex(64 * 1024);
    transport.serve(input.as_bytes(), writer).await?;

    let mut lines = BufReader::new(reader).lines();
    let mut responses = Vec::new();
    while let Some(line) = lines.next_line().await? {
        responses.push(serde_json::from_str::<Value>(&line)?);
    }
    assert_eq!(responses.len(), 3);

    let parse_error = responses
        .iter()
        .find(|response| response["id"].is_null())
        .unwrap();
    assert_eq!(parse_error["error"]["code"], -32700);
    assert_eq!(parse_error["error"]["message"], "Parse error");

    let ping = responses.iter().find(|response| response["id"] == 1).unwrap();
    assert_eq!(ping["result"], json!({}));

    let athlete = responses.iter().find(|response| response["id"] == "a").unwrap();
    assert_eq!(athlete["result"]["isError"], false);
    Ok(())
}
