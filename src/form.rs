//! Stripe's API takes `application/x-www-form-urlencoded` bodies where
//! nested structures are flattened into bracketed keys, e.g.
//! `line_items[0][price_data][currency]=usd`. This module models the
//! parameter tree as a small tagged union and encodes it depth-first.

use url::form_urlencoded::Serializer;

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Array(Vec<FormValue>),
    /// Key/value pairs in insertion order. A `Vec` rather than a map so the
    /// encoded output is deterministic for a given input.
    Object(Vec<(String, FormValue)>),
}

impl FormValue {
    pub fn object() -> Self {
        FormValue::Object(Vec::new())
    }

    /// Appends a pair to an object node. No-op on scalars and arrays.
    pub fn insert(&mut self, key: &str, value: impl Into<FormValue>) -> &mut Self {
        if let FormValue::Object(pairs) = self {
            pairs.push((key.to_owned(), value.into()));
        }
        self
    }

    fn scalar(&self) -> Option<String> {
        match self {
            FormValue::Str(s) => Some(s.clone()),
            FormValue::Int(i) => Some(i.to_string()),
            FormValue::Bool(b) => Some(b.to_string()),
            FormValue::Array(_) | FormValue::Object(_) => None,
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Str(value.to_owned())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Str(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Int(value)
    }
}

impl From<u32> for FormValue {
    fn from(value: u32) -> Self {
        FormValue::Int(i64::from(value))
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

/// Encodes an object node into a form-urlencoded string. Top-level keys are
/// bare (`mode=payment`); nested keys use bracket notation. A non-object
/// root has no key to hang parameters on and encodes to the empty string.
pub fn encode(root: &FormValue) -> String {
    let mut out = Serializer::new(String::new());
    if let FormValue::Object(pairs) = root {
        for (key, value) in pairs {
            encode_pair(&mut out, key, value);
        }
    }
    out.finish()
}

fn encode_pair(out: &mut Serializer<String>, key: &str, value: &FormValue) {
    match value {
        FormValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let item_key = format!("{}[{}]", key, index);
                match item.scalar() {
                    Some(scalar) => {
                        out.append_pair(&item_key, &scalar);
                    }
                    None => encode_pair(out, &item_key, item),
                }
            }
        }
        FormValue::Object(pairs) => {
            for (child, child_value) in pairs {
                let child_key = format!("{}[{}]", key, child);
                encode_pair(out, &child_key, child_value);
            }
        }
        scalar => {
            if let Some(scalar) = scalar.scalar() {
                out.append_pair(key, &scalar);
            }
        }
    }
}
