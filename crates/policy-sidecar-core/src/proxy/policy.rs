//! `venice_parameters` merge for chat completions.
//!
//! Precedence, lowest to highest: configured default, client payload,
//! override header. Defaults only fill fields the client left out; headers
//! (when enabled) replace whatever is there.

use axum::http::HeaderMap;
use policy_sidecar_types::models::VENICE_PARAMETERS_KEY;
use policy_sidecar_types::{PolicyField, PolicyParameters, SidecarConfig, WebSearchMode};
use serde_json::{Map, Value};
use std::borrow::Cow;

pub const HEADER_WEB_SEARCH: &str = "x-venice-search";
pub const HEADER_MODEL: &str = "x-model";

/// Boolean override headers and the field each one sets.
pub const FLAG_OVERRIDE_HEADERS: [(&str, PolicyField); 5] = [
    ("x-venice-citations", PolicyField::EnableWebCitations),
    ("x-include-search-results", PolicyField::IncludeSearchResultsInStream),
    ("x-strip-thinking", PolicyField::StripThinkingResponse),
    ("x-disable-thinking", PolicyField::DisableThinking),
    ("x-include-venice-system-prompt", PolicyField::IncludeVeniceSystemPrompt),
];

const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];

/// Header flag semantics: truthy words are `true`, any other value `false`.
pub fn parse_header_flag(value: &str) -> bool {
    TRUTHY.iter().any(|t| value.eq_ignore_ascii_case(t))
}

/// Last value of `name`; a repeated header resolves to its final occurrence.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    headers.get_all(name).iter().last().map(|v| String::from_utf8_lossy(v.as_bytes()))
}

/// Merge the policy object into a chat-completions body.
///
/// A non-object `body` comes back as an object holding just the policy
/// (and `model`, if overridden).
pub fn merge_policy(mut body: Value, headers: &HeaderMap, config: &SidecarConfig) -> Value {
    let mut params = PolicyParameters::extract(&mut body);
    params.apply_defaults(&config.policy_defaults);

    let model_override = if config.allow_header_overrides {
        apply_header_overrides(&mut params, headers)
    } else {
        None
    };

    let mut obj = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(model) = model_override {
        obj.insert("model".to_string(), Value::String(model));
    }
    obj.insert(VENICE_PARAMETERS_KEY.to_string(), params.into_value());
    Value::Object(obj)
}

/// Apply override headers to `params`. Returns the `X-Model` value, if any.
fn apply_header_overrides(params: &mut PolicyParameters, headers: &HeaderMap) -> Option<String> {
    if let Some(mode) =
        header_value(headers, HEADER_WEB_SEARCH).and_then(|v| WebSearchMode::parse_exact(&v))
    {
        params.enable_web_search.override_with(mode);
    }

    for (name, field) in FLAG_OVERRIDE_HEADERS {
        let Some(raw) = header_value(headers, name) else {
            continue;
        };
        if let Some(flag) = params.flag_mut(field) {
            flag.override_with(parse_header_flag(&raw));
        }
    }

    header_value(headers, HEADER_MODEL).filter(|m| !m.is_empty()).map(Cow::into_owned)
}
