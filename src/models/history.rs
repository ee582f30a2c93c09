use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What happened in a browsing history event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    PageView {
        page: String,
    },
    ProductView {
        product: String,
    },
    CartAddition,
    TimeSpent {
        /// Milliseconds spent on the page
        duration: u64,
        #[serde(default)]
        page: Option<String>,
    },
    RecommendationClick {
        product: String,
        #[serde(alias = "matchScore")]
        match_score: u8,
    },
    /// Event types this service does not know about; kept in the log, never scored
    #[serde(other)]
    Unknown,
}

/// One entry of the append-only browsing history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEvent {
    #[serde(flatten)]
    pub kind: EventKind,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl HistoryEvent {
    pub fn new(kind: EventKind, timestamp: DateTime<Utc>) -> Self {
        Self { kind, timestamp }
    }

    /// Shorthand for a product view stamped with the current time
    pub fn product_view(product: impl Into<String>) -> Self {
        Self::new(
            EventKind::ProductView {
                product: product.into(),
            },
            Utc::now(),
        )
    }

    /// The product name, if this is a product view
    pub fn viewed_product(&self) -> Option<&str> {
        match &self.kind {
            EventKind::ProductView { product } => Some(product),
            _ => None,
        }
    }
}

/// A history event as submitted by a client; the timestamp may be omitted
#[derive(Debug, Clone, Deserialize)]
pub struct NewHistoryEvent {
    #[serde(flatten)]
    pub kind: EventKind,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewHistoryEvent {
    /// Fills a missing timestamp with `now`
    pub fn stamp(self, now: DateTime<Utc>) -> HistoryEvent {
        HistoryEvent::new(self.kind, self.timestamp.unwrap_or(now))
    }
}

/// Parses a history log one event at a time
///
/// Events that fail to parse are dropped with a warning and the rest keep
/// their order. Anything other than a list yields an empty history.
pub fn parse_history(value: Value) -> Vec<HistoryEvent> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Null => return Vec::new(),
        other => {
            tracing::warn!(kind = %json_kind(&other), "History is not a list, ignoring it");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed history event");
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `deserialize_with` adapter for [`parse_history`]
pub(crate) fn lenient_history<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<HistoryEvent>, D::Error> {
    Ok(parse_history(Value::deserialize(deserializer)?))
}
