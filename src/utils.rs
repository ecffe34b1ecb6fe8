//! Lenient readers over untyped JSON. None of these fail: a value of the
//! wrong shape reads as the field's empty default.

use serde_json::{Map, Value};

/// JavaScript-style truthiness, used where the backend contract treats
/// `0`, `""`, `false` and `null` alike as "not set".
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a scalar; numbers and bools are rendered, everything else is
/// empty.
pub fn text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Like [`text`], but a missing, null or empty value yields `None`.
pub fn opt_text(v: Option<&Value>) -> Option<String> {
    Some(text(v)).filter(|s| !s.is_empty())
}

/// Non-negative whole count. Numeric text is parsed; fractions truncate.
pub fn count(v: Option<&Value>) -> u32 {
    match v {
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|u| u.min(u32::MAX as u64) as u32)
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u32))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f > 0.0).map(|f| f as u32))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Stringification with the backend's loose rules: `null` → `"null"`,
/// nested arrays join their elements with commas.
pub fn stringify(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(xs) => xs
            .iter()
            .map(|x| match x {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

pub fn array(v: Option<&Value>) -> &[Value] {
    match v {
        Some(Value::Array(xs)) => xs.as_slice(),
        _ => &[],
    }
}

/// Copies every field of `obj` not named in `known`.
pub fn extra_fields(obj: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !known.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
