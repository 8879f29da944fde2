//! Two-step field lookup over quantum result records.
//!
//! Result writers have stored metrics either directly on the record or one
//! level down under `data`. Every lookup checks the direct property first and
//! falls back to `data.<field>`. A JSON `null` counts as absent at either
//! location. Typed accessors turn a value of the wrong shape into `None`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::QuantumResult;

/// Name of the nested object that may hold result fields.
pub const NESTED_KEY: &str = "data";

/// Outcome of a field lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Look a field up on the record, then under `data`.
pub fn lookup<'a>(result: &'a QuantumResult, field: &str) -> Lookup<'a> {
    if let Some(v) = result.fields.get(field).filter(|v| !v.is_null()) {
        return Lookup::Found(v);
    }
    match result
        .fields
        .get(NESTED_KEY)
        .and_then(|d| d.get(field))
        .filter(|v| !v.is_null())
    {
        Some(v) => Lookup::Found(v),
        None => Lookup::NotFound,
    }
}

/// Numeric field. Numeric strings are accepted.
pub fn f64_field(result: &QuantumResult, field: &str) -> Option<f64> {
    lookup(result, field).value().and_then(value_as_f64)
}

/// Non-negative integer field. Whole floats and numeric strings are accepted.
pub fn u64_field(result: &QuantumResult, field: &str) -> Option<u64> {
    lookup(result, field).value().and_then(value_as_u64)
}

/// String field. Numbers and booleans are rendered as text.
pub fn str_field(result: &QuantumResult, field: &str) -> Option<String> {
    match lookup(result, field).value()? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Boolean field. Accepts `true`/`false`, `"true"`/`"false"`, and 0/1.
pub fn bool_field(result: &QuantumResult, field: &str) -> Option<bool> {
    match lookup(result, field).value()? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_u64().and_then(|n| match n {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }),
        _ => None,
    }
}

/// List of strings. A single string becomes a one-element list; a
/// comma-separated string is split.
pub fn string_list_field(result: &QuantumResult, field: &str) -> Option<Vec<String>> {
    match lookup(result, field).value()? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::String(s) => Some(
            s.split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

/// List of non-negative integers (e.g. Shor factors).
pub fn u64_list_field(result: &QuantumResult, field: &str) -> Option<Vec<u64>> {
    match lookup(result, field).value()? {
        Value::Array(items) => Some(items.iter().filter_map(value_as_u64).collect()),
        _ => None,
    }
}

/// Measurement histogram: bitstring → count. Entries with non-numeric counts
/// are dropped.
pub fn counts_field(result: &QuantumResult, field: &str) -> Option<BTreeMap<String, u64>> {
    match lookup(result, field).value()? {
        Value::Object(map) => Some(
            map.iter()
                .filter_map(|(k, v)| value_as_u64(v).map(|c| (k.clone(), c)))
                .collect(),
        ),
        _ => None,
    }
}

fn value_as_f64(v: &Value) -> Option<f64> {
    let x = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    x.filter(|x| x.is_finite())
}

fn value_as_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|x| x.is_finite() && *x >= 0.0 && x.fract() == 0.0)
                .map(|x| x as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
