// ABOUTME: Pulls a JSON object out of model output that may wrap it in prose or fences
// ABOUTME: Tries a direct parse, then a fenced code block, then the outermost brace span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

static FENCED_BLOCK: OnceLock<Option<Regex>> = OnceLock::new();
static BRACE_SPAN: OnceLock<Option<Regex>> = OnceLock::new();

fn fenced_block() -> Option<&'static Regex> {
    FENCED_BLOCK
        .get_or_init(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").ok())
        .as_ref()
}

fn brace_span() -> Option<&'static Regex> {
    BRACE_SPAN
        .get_or_init(|| Regex::new(r"\{[\s\S]*\}").ok())
        .as_ref()
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Extract the first JSON object found in `text`.
///
/// Returns `None` when no strategy yields an object; arrays and scalars are
/// not accepted.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();
    if let Some(map) = parse_object(trimmed) {
        return Some(map);
    }
    if let Some(map) = fenced_block()
        .and_then(|re| re.captures(trimmed))
        .and_then(|caps| caps.get(1))
        .and_then(|body| parse_object(body.as_str()))
    {
        return Some(map);
    }
    brace_span()
        .and_then(|re| re.find(trimmed))
        .and_then(|span| parse_object(span.as_str()))
}
