//! Schema-tolerant extraction from provider responses.
//!
//! Providers disagree on field names and nesting, and none of them version
//! their response schemas. Instead of ad hoc field probing at call sites,
//! each value of interest is resolved by an ordered list of pure rules;
//! the first rule that matches wins, and exhausting the list is a named
//! error at the caller.

use serde_json::Value;

/// A pure extraction rule: raw response value to optional string.
pub type ExtractRule = fn(&Value) -> Option<String>;

/// Known job-identifier field names, tried in order.
pub const JOB_ID_FIELDS: &[&str] = &["id", "jobId"];

/// Result-location rules for video jobs: `videoUrl`, `output.video`,
/// `output[0]`.
pub const VIDEO_RESULT_RULES: &[ExtractRule] =
    &[video_url, output_video, output_first_element];

/// Result-location rules for music jobs: `audioUrl`, `output.audio`,
/// `output[0]`.
pub const AUDIO_RESULT_RULES: &[ExtractRule] =
    &[audio_url, output_audio, output_first_element];

/// Apply rules in order; first match wins.
pub fn first_match(rules: &[ExtractRule], value: &Value) -> Option<String> {
    rules.iter().find_map(|rule| rule(value))
}

/// Extract a job identifier from a submission response.
pub fn job_id(value: &Value) -> Option<String> {
    JOB_ID_FIELDS
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::to_string)
}

/// Extract an in-band provider error message, if any.
pub fn error_message(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn video_url(value: &Value) -> Option<String> {
    value
        .get("videoUrl")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn audio_url(value: &Value) -> Option<String> {
    value
        .get("audioUrl")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn output_video(value: &Value) -> Option<String> {
    value
        .get("output")
        .and_then(|o| o.get("video"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn output_audio(value: &Value) -> Option<String> {
    value
        .get("output")
        .and_then(|o| o.get("audio"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn output_first_element(value: &Value) -> Option<String> {
    value
        .get("output")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(Value::as_str)
        .map(str::to_string)
}
