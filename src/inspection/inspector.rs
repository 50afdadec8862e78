//! Request inspector.
//!
//! # Responsibilities
//! - Scan the query string, then each header (name and value), then the body
//! - Stop at the first contaminated field
//! - Report which field category caused the block
//!
//! # Design Decisions
//! - Header order is the order the caller supplies; every duplicate is scanned
//! - A missing body and an empty body are both clean
//! - No error path: any text input yields a decision

use std::fmt;

use super::patterns::contains_blocked_pattern;

/// Request field category in which a blocked pattern was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Query,
    Headers,
    Body,
}

impl Field {
    /// Short label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Query => "query",
            Field::Headers => "headers",
            Field::Body => "body",
        }
    }

    /// Response text sent to the client when this field is contaminated.
    pub fn block_message(&self) -> &'static str {
        match self {
            Field::Query => "Blocked by firewall: Suspicious pattern detected in query string.\n",
            Field::Headers => "Blocked by firewall: Suspicious pattern detected in headers.\n",
            Field::Body => "Blocked by firewall: Suspicious pattern detected in POST data.\n",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of inspecting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Blocked(Field),
}

impl Decision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Decision::Blocked(_))
    }

    /// The contaminated field, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Decision::Allowed => None,
            Decision::Blocked(field) => Some(*field),
        }
    }
}

/// Decide whether a request should be blocked.
///
/// `body` is `None` for requests that carry no body (GET).
pub fn evaluate<'a, I>(query: &str, headers: I, body: Option<&str>) -> Decision
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    if contains_blocked_pattern(query) {
        return Decision::Blocked(Field::Query);
    }

    for (name, value) in headers {
        if contains_blocked_pattern(name) || contains_blocked_pattern(value) {
            return Decision::Blocked(Field::Headers);
        }
    }

    match body {
        Some(text) if contains_blocked_pattern(text) => Decision::Blocked(Field::Body),
        _ => Decision::Allowed,
    }
}

/// Owned view of the fields the inspector looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectedRequest {
    /// Raw query component, without the leading `?`.
    pub query: String,
    /// Header name/value pairs in the order received.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl InspectedRequest {
    /// Evaluate this request against the blocked pattern table.
    pub fn decision(&self) -> Decision {
        evaluate(
            &self.query,
            self.headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
            self.body.as_deref(),
        )
    }
}
