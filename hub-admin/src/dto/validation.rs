//! Turning `validator` failures into the 422 response body

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::services::{ApiError, ApiResult};

/// One entry of a validation failure's `details` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    /// Rule that failed: `required`, `length`, `range`, or `oneof`
    pub tag: String,
    /// Rejected value, rendered as text
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

/// Flatten field errors into `details` entries, ordered by field name
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details = Vec::new();

    for (field, errs) in errors.field_errors() {
        for err in errs.iter() {
            details.push(FieldError {
                field: field.to_string(),
                tag: err.code.to_string(),
                value: err.params.get("value").map(value_text).unwrap_or_default(),
                allowed_values: err
                    .params
                    .get("allowed_values")
                    .and_then(Value::as_array)
                    .map(|values| {
                        values
                            .iter()
                            .filter_map(|v| v.as_str().map(str::to_string))
                            .collect()
                    }),
            });
        }
    }

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// Combine several validation results into a single 422 error
pub fn ensure_valid<I>(results: I) -> ApiResult<()>
where
    I: IntoIterator<Item = Result<(), ValidationErrors>>,
{
    let mut details: Vec<FieldError> = results
        .into_iter()
        .filter_map(Result::err)
        .flat_map(|errors| field_errors(&errors))
        .collect();

    if details.is_empty() {
        return Ok(());
    }

    details.sort_by(|a, b| a.field.cmp(&b.field));
    let details = serde_json::to_value(details).unwrap_or(Value::Null);
    Err(ApiError::validation_failed(details))
}

/// `oneof` check carrying the allowed set in the error params
pub fn one_of(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        return Ok(());
    }

    let mut err = ValidationError::new("oneof");
    err.add_param(Cow::from("value"), &value);
    err.add_param(Cow::from("allowed_values"), &allowed);
    Err(err)
}

pub fn sort_order(value: &str) -> Result<(), ValidationError> {
    one_of(value, &["asc", "desc"])
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
