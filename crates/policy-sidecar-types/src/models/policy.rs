//! Per-request policy parameters attached to chat completions.
//!
//! Each recognised field is a [`Setting`], which keeps "the client sent this"
//! apart from "nobody set this yet". Default-fill only touches
//! [`Setting::Absent`]; header overrides replace whatever is there.

use serde::Serialize;
use serde_json::{Map, Value};

use super::config::{PolicyDefaults, WebSearchMode};

/// Key of the policy sub-object inside a chat-completions body.
pub const VENICE_PARAMETERS_KEY: &str = "venice_parameters";

/// State of one policy field during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    /// Not present in the client payload and not yet filled
    Absent,
    /// Present in the client payload; kept verbatim
    Supplied(Value),
    /// Written by the sidecar (default or header override)
    Resolved(T),
}

impl<T> Default for Setting<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T: Serialize> Setting<T> {
    /// Set-if-absent. Explicit client values, `false` included, survive.
    pub fn fill_default(&mut self, default: T) {
        if self.is_absent() {
            *self = Self::Resolved(default);
        }
    }

    /// Unconditionally replace the current value.
    pub fn override_with(&mut self, value: T) {
        *self = Self::Resolved(value);
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::Supplied(value) => Some(value.clone()),
            Self::Resolved(value) => serde_json::to_value(value).ok(),
        }
    }
}

/// The six recognised policy fields, in serialisation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyField {
    StripThinkingResponse,
    DisableThinking,
    EnableWebSearch,
    EnableWebCitations,
    IncludeSearchResultsInStream,
    IncludeVeniceSystemPrompt,
}

impl PolicyField {
    pub const ALL: [Self; 6] = [
        Self::StripThinkingResponse,
        Self::DisableThinking,
        Self::EnableWebSearch,
        Self::EnableWebCitations,
        Self::IncludeSearchResultsInStream,
        Self::IncludeVeniceSystemPrompt,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match *self {
            Self::StripThinkingResponse => "strip_thinking_response",
            Self::DisableThinking => "disable_thinking",
            Self::EnableWebSearch => "enable_web_search",
            Self::EnableWebCitations => "enable_web_citations",
            Self::IncludeSearchResultsInStream => "include_search_results_in_stream",
            Self::IncludeVeniceSystemPrompt => "include_venice_system_prompt",
        }
    }
}

/// Policy sub-object of one chat-completions request.
///
/// Lives only for the duration of a single merge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyParameters {
    pub strip_thinking_response: Setting<bool>,
    pub disable_thinking: Setting<bool>,
    pub enable_web_search: Setting<WebSearchMode>,
    pub enable_web_citations: Setting<bool>,
    pub include_search_results_in_stream: Setting<bool>,
    pub include_venice_system_prompt: Setting<bool>,
    /// Client keys we do not interpret, passed through untouched
    extra: Map<String, Value>,
}

impl PolicyParameters {
    /// Take the policy sub-object out of `body`, leaving `null` in its slot.
    ///
    /// A missing or non-object `venice_parameters` (or a non-object body)
    /// yields an empty policy and leaves `body` untouched.
    pub fn extract(body: &mut Value) -> Self {
        let taken =
            body.get_mut(VENICE_PARAMETERS_KEY).filter(|v| v.is_object()).map(Value::take);
        match taken {
            Some(Value::Object(map)) => Self::from_object(map),
            _ => Self::default(),
        }
    }

    /// Split a client object into recognised fields and pass-through keys.
    pub fn from_object(map: Map<String, Value>) -> Self {
        let mut params = Self::default();
        for (key, value) in map {
            match PolicyField::from_key(&key) {
                Some(field) => params.set_supplied(field, value),
                None => {
                    params.extra.insert(key, value);
                },
            }
        }
        params
    }

    fn set_supplied(&mut self, field: PolicyField, value: Value) {
        match field {
            PolicyField::StripThinkingResponse => {
                self.strip_thinking_response = Setting::Supplied(value)
            },
            PolicyField::DisableThinking => self.disable_thinking = Setting::Supplied(value),
            PolicyField::EnableWebSearch => self.enable_web_search = Setting::Supplied(value),
            PolicyField::EnableWebCitations => {
                self.enable_web_citations = Setting::Supplied(value)
            },
            PolicyField::IncludeSearchResultsInStream => {
                self.include_search_results_in_stream = Setting::Supplied(value)
            },
            PolicyField::IncludeVeniceSystemPrompt => {
                self.include_venice_system_prompt = Setting::Supplied(value)
            },
        }
    }

    /// Default-fill every absent field from `defaults`.
    pub fn apply_defaults(&mut self, defaults: &PolicyDefaults) {
        self.strip_thinking_response.fill_default(defaults.strip_thinking_response);
        self.disable_thinking.fill_default(defaults.disable_thinking);
        self.enable_web_search.fill_default(defaults.enable_web_search);
        self.enable_web_citations.fill_default(defaults.enable_web_citations);
        self.include_search_results_in_stream
            .fill_default(defaults.include_search_results_in_stream);
        self.include_venice_system_prompt.fill_default(defaults.include_venice_system_prompt);
    }

    pub fn field_value(&self, field: PolicyField) -> Option<Value> {
        match field {
            PolicyField::StripThinkingResponse => self.strip_thinking_response.to_value(),
            PolicyField::DisableThinking => self.disable_thinking.to_value(),
            PolicyField::EnableWebSearch => self.enable_web_search.to_value(),
            PolicyField::EnableWebCitations => self.enable_web_citations.to_value(),
            PolicyField::IncludeSearchResultsInStream => {
                self.include_search_results_in_stream.to_value()
            },
            PolicyField::IncludeVeniceSystemPrompt => self.include_venice_system_prompt.to_value(),
        }
    }

    /// Mutable access to a boolean field; `None` for `enable_web_search`.
    pub fn flag_mut(&mut self, field: PolicyField) -> Option<&mut Setting<bool>> {
        match field {
            PolicyField::StripThinkingResponse => Some(&mut self.strip_thinking_response),
            PolicyField::DisableThinking => Some(&mut self.disable_thinking),
            PolicyField::EnableWebSearch => None,
            PolicyField::EnableWebCitations => Some(&mut self.enable_web_citations),
            PolicyField::IncludeSearchResultsInStream => {
                Some(&mut self.include_search_results_in_stream)
            },
            PolicyField::IncludeVeniceSystemPrompt => Some(&mut self.include_venice_system_prompt),
        }
    }

    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        for field in PolicyField::ALL {
            if let Some(value) = self.field_value(field) {
                map.insert(field.key().to_string(), value);
            }
        }
        for (key, value) in self.extra {
            map.entry(key).or_insert(value);
        }
        Value::Object(map)
    }
}
