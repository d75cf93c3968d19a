//! Declarative request validation.
//!
//! A [`Schema`] is an ordered set of per-field rules. Validation collects
//! every failure (not just the first) into flattened `{field: [messages]}`
//! details for the 422 envelope, and returns the validated subset of the
//! body: unknown keys are stripped, so downstream statements only ever see
//! schema-declared field names.

use crate::error::ApiError;
use regex::Regex;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Text,
    Number,
    Boolean,
    Uuid,
    Email,
}

#[derive(Clone, Debug)]
pub struct Rule {
    kind: Kind,
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<String>,
    allowed: Option<Vec<Value>>,
    minimum: Option<f64>,
    maximum: Option<f64>,
}

impl Rule {
    fn of(kind: Kind) -> Self {
        Rule {
            kind,
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            allowed: None,
            minimum: None,
            maximum: None,
        }
    }

    pub fn text() -> Self {
        Rule::of(Kind::Text)
    }

    pub fn number() -> Self {
        Rule::of(Kind::Number)
    }

    pub fn boolean() -> Self {
        Rule::of(Kind::Boolean)
    }

    pub fn uuid() -> Self {
        Rule::of(Kind::Uuid)
    }

    pub fn email() -> Self {
        Rule::of(Kind::Email)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn pattern(mut self, re: &str) -> Self {
        self.pattern = Some(re.to_string());
        self
    }

    pub fn allowed(mut self, values: Vec<Value>) -> Self {
        self.allowed = Some(values);
        self
    }

    pub fn minimum(mut self, n: f64) -> Self {
        self.minimum = Some(n);
        self
    }

    pub fn maximum(mut self, n: f64) -> Self {
        self.maximum = Some(n);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Schema {
    rules: Vec<(String, Rule)>,
}

impl Schema {
    pub fn new() -> Self {
        Schema::default()
    }

    pub fn field(mut self, name: &str, rule: Rule) -> Self {
        self.rules.push((name.to_string(), rule));
        self
    }

    /// Validate a JSON body. Returns the validated, schema-declared subset of
    /// its fields, or a validation error carrying every failure found.
    pub fn validate(&self, body: &Value) -> Result<Map<String, Value>, ApiError> {
        let Some(obj) = body.as_object() else {
            return Err(validation_error(vec![(
                "body".to_string(),
                vec!["expected a JSON object".to_string()],
            )]));
        };

        let mut errors: Vec<(String, Vec<String>)> = Vec::new();
        let mut out = Map::new();
        for (name, rule) in &self.rules {
            match obj.get(name) {
                None => {
                    if rule.required {
                        errors.push((name.clone(), vec![format!("{} is required", name)]));
                    }
                }
                Some(Value::Null) => {
                    if rule.required {
                        errors.push((name.clone(), vec![format!("{} is required", name)]));
                    } else {
                        out.insert(name.clone(), Value::Null);
                    }
                }
                Some(v) => {
                    let field_errors = check_field(name, v, rule);
                    if field_errors.is_empty() {
                        out.insert(name.clone(), v.clone());
                    } else {
                        errors.push((name.clone(), field_errors));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(out)
        } else {
            Err(validation_error(errors))
        }
    }
}

fn validation_error(errors: Vec<(String, Vec<String>)>) -> ApiError {
    let mut details = Map::new();
    for (field, messages) in errors {
        let list = messages.into_iter().map(Value::String).collect();
        details.insert(field, Value::Array(list));
    }
    ApiError::Validation {
        details: Value::Object(details),
    }
}

fn check_field(name: &str, v: &Value, rule: &Rule) -> Vec<String> {
    let mut errors = Vec::new();

    match rule.kind {
        Kind::Text => {
            if !v.is_string() {
                errors.push(format!("{} must be a string", name));
            }
        }
        Kind::Number => {
            if !v.is_number() {
                errors.push(format!("{} must be a number", name));
            }
        }
        Kind::Boolean => {
            if !v.is_boolean() {
                errors.push(format!("{} must be a boolean", name));
            }
        }
        Kind::Uuid => match v.as_str() {
            Some(s) if uuid::Uuid::parse_str(s).is_ok() => {}
            _ => errors.push(format!("{} must be a valid UUID", name)),
        },
        Kind::Email => match v.as_str() {
            Some(s) if s.contains('@') && s.len() >= 3 => {}
            _ => errors.push(format!("{} must be a valid email", name)),
        },
    }
    if !errors.is_empty() {
        // Length/pattern/bound checks assume the right shape.
        return errors;
    }

    if let Some(max) = rule.max_length {
        if let Some(s) = v.as_str() {
            if s.len() > max {
                errors.push(format!("{} must be at most {} characters", name, max));
            }
        }
    }
    if let Some(min) = rule.min_length {
        if let Some(s) = v.as_str() {
            if s.len() < min {
                errors.push(format!("{} must be at least {} characters", name, min));
            }
        }
    }
    if let Some(ref pattern) = rule.pattern {
        match Regex::new(pattern) {
            Ok(re) => {
                if let Some(s) = v.as_str() {
                    if !re.is_match(s) {
                        errors.push(format!("{} does not match required pattern", name));
                    }
                }
            }
            Err(_) => errors.push(format!("invalid pattern for {}", name)),
        }
    }
    if let Some(ref allowed) = rule.allowed {
        if !allowed.iter().any(|a| value_eq(v, a)) {
            errors.push(format!(
                "{} must be one of: {:?}",
                name,
                allowed.iter().take(5).collect::<Vec<_>>()
            ));
        }
    }
    if let Some(min) = rule.minimum {
        if let Some(n) = v.as_f64() {
            if n < min {
                errors.push(format!("{} must be at least {}", name, min));
            }
        }
    }
    if let Some(max) = rule.maximum {
        if let Some(n) = v.as_f64() {
            if n > max {
                errors.push(format!("{} must be at most {}", name, max));
            }
        }
    }

    errors
}

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n), Value::Number(m)) => n.as_f64() == m.as_f64(),
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details(err: ApiError) -> Value {
        match err {
            ApiError::Validation { details } => details,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn collects_every_failure() {
        let schema = Schema::new()
            .field("name", Rule::text().required())
            .field("credits", Rule::number().minimum(0.0));
        let err = schema
            .validate(&json!({"credits": -1}))
            .unwrap_err();
        let d = details(err);
        assert_eq!(d["name"], json!(["name is required"]));
        assert_eq!(d["credits"], json!(["credits must be at least 0"]));
    }

    #[test]
    fn strips_unknown_keys() {
        let schema = Schema::new().field("name", Rule::text().required());
        let out = schema
            .validate(&json!({"name": "Physics", "admin": true}))
            .unwrap();
        assert_eq!(out.get("name"), Some(&json!("Physics")));
        assert!(!out.contains_key("admin"));
    }

    #[test]
    fn non_object_body_is_a_validation_error() {
        let schema = Schema::new().field("name", Rule::text());
        let err = schema.validate(&json!([1, 2, 3])).unwrap_err();
        let d = details(err);
        assert_eq!(d["body"], json!(["expected a JSON object"]));
    }

    #[test]
    fn uuid_rule_rejects_malformed_ids() {
        let schema = Schema::new().field("id", Rule::uuid().required());
        assert!(schema.validate(&json!({"id": "not-a-uuid"})).is_err());
        assert!(schema
            .validate(&json!({"id": "7c0e6ad1-4788-4c7b-a0ad-6b2a270e4a51"}))
            .is_ok());
    }

    #[test]
    fn type_mismatch_is_reported() {
        let schema = Schema::new().field("name", Rule::text().required().min_length(2));
        let d = details(schema.validate(&json!({"name": 7})).unwrap_err());
        assert_eq!(d["name"], json!(["name must be a string"]));
    }

    #[test]
    fn optional_missing_field_passes() {
        let schema = Schema::new().field("location", Rule::text());
        let out = schema.validate(&json!({})).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn optional_null_passes_through() {
        let schema = Schema::new().field("location", Rule::text());
        let out = schema.validate(&json!({"location": null})).unwrap();
        assert_eq!(out.get("location"), Some(&Value::Null));
    }

    #[test]
    fn length_bounds_and_pattern() {
        let schema = Schema::new().field(
            "code",
            Rule::text().min_length(2).max_length(8).pattern("^[A-Z0-9-]+$"),
        );
        assert!(schema.validate(&json!({"code": "CS-101"})).is_ok());
        assert!(schema.validate(&json!({"code": "c"})).is_err());
        assert!(schema.validate(&json!({"code": "TOOLONGCODE99"})).is_err());
    }

    #[test]
    fn allowed_values() {
        let schema = Schema::new().field("level", Rule::text().allowed(vec![json!("ug"), json!("pg")]));
        assert!(schema.validate(&json!({"level": "ug"})).is_ok());
        assert!(schema.validate(&json!({"level": "phd"})).is_err());
    }
}
