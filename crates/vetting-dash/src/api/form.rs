use std::fmt::Display;

use serde_json::{Map, Number, Value};

use super::ApiError;

/// Ordered form fields; absent values are dropped when encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    entries: Vec<(String, Option<String>)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.entries.push((key.into(), Some(value.to_string())));
        self
    }

    pub fn optional<V: Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.entries.push((key.into(), value.map(|value| value.to_string())));
        self
    }

    /// `null` members become absent. Scalars and arrays are converted the way a
    /// browser stringifies them (`["rust","go"]` is sent as `rust,go`, `5.0` as
    /// `5`); nested objects are sent as compact JSON text.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let entries = object
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::Null => None,
                    other => Some(form_text(other)),
                };
                (key.clone(), value)
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
    }

    pub fn encode(&self) -> Result<String, ApiError> {
        let pairs: Vec<(&str, &str)> = self.present().collect();
        Ok(serde_urlencoded::to_string(pairs)?)
    }
}

fn form_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(form_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn number_text(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(float) if float == 0.0 => "0".to_string(),
        Some(float) if float.fract() == 0.0 && float.abs() < 1e21 => format!("{float:.0}"),
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}

impl From<Map<String, Value>> for FormPayload {
    fn from(object: Map<String, Value>) -> Self {
        Self::from_json_object(&object)
    }
}
