//! Access Policy
//!
//! The gate asks one question per request: may `subject` perform `action`
//! on `resource`? [`PolicyEnforcer`] is that question; [`RuleTablePolicy`]
//! answers it from an ordered list of allow rules.
//!
//! ## Rule file format
//! ```text
//! # subject, resource, action
//! p, unauthorized, /v1/auth/login, POST
//! p, client, /v1/orders/:id, GET
//! p, admin, /v1/*, *
//! ```
//! Blank lines and `#` comments are skipped. Anything else that is not a
//! four-field `p` line is rejected.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::AuthResult;

/// Authorization oracle
#[trait_variant::make(PolicyEnforcer: Send)]
pub trait LocalPolicyEnforcer {
    /// `Ok(true)` to allow. An `Err` is treated as deny by the gate.
    async fn enforce(&self, subject: &str, resource: &str, action: &str) -> AuthResult<bool>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyParseError {
    #[error("line {line}: expected `p, subject, resource, action`")]
    Malformed { line: usize },

    #[error("line {line}: resource must start with '/' or be '*'")]
    InvalidResource { line: usize },
}

// ============================================================================
// Rule
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `:name` or `{name}`
    Param,
    /// Trailing `*`
    Rest,
}

/// One allow rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    subject: String,
    resource: String,
    segments: Vec<Segment>,
    action: String,
}

impl Rule {
    pub fn new(
        subject: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        let resource = resource.into();
        Self {
            subject: subject.into(),
            segments: compile(&resource),
            resource,
            action: action.into(),
        }
    }

    pub fn matches(&self, subject: &str, resource: &str, action: &str) -> bool {
        (self.subject == "*" || self.subject == subject)
            && (self.action == "*" || self.action.eq_ignore_ascii_case(action))
            && self.matches_resource(resource)
    }

    fn matches_resource(&self, resource: &str) -> bool {
        let mut parts = split_path(resource);

        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Param => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(lit) => {
                    if parts.next() != Some(lit.as_str()) {
                        return false;
                    }
                }
            }
        }

        parts.next().is_none()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p, {}, {}, {}", self.subject, self.resource, self.action)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn compile(resource: &str) -> Vec<Segment> {
    let raw: Vec<&str> = split_path(resource).collect();
    let last = raw.len().saturating_sub(1);

    raw.iter()
        .enumerate()
        .map(|(i, s)| match *s {
            "*" if i == last => Segment::Rest,
            s if s.starts_with(':') || (s.starts_with('{') && s.ends_with('}')) => Segment::Param,
            s => Segment::Literal(s.to_string()),
        })
        .collect()
}

// ============================================================================
// Rule Table
// ============================================================================

/// Ordered allow-list; any matching rule allows.
#[derive(Debug, Clone, Default)]
pub struct RuleTablePolicy {
    rules: Vec<Rule>,
}

impl RuleTablePolicy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_allowed(&self, subject: &str, resource: &str, action: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.matches(subject, resource, action))
    }
}

impl FromStr for RuleTablePolicy {
    type Err = PolicyParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut rules = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
            let [kind, subject, resource, action] = fields.as_slice() else {
                return Err(PolicyParseError::Malformed { line });
            };
            if *kind != "p" || subject.is_empty() || action.is_empty() {
                return Err(PolicyParseError::Malformed { line });
            }
            if !(resource.starts_with('/') || *resource == "*") {
                return Err(PolicyParseError::InvalidResource { line });
            }

            rules.push(Rule::new(*subject, *resource, *action));
        }

        Ok(Self { rules })
    }
}

impl PolicyEnforcer for RuleTablePolicy {
    async fn enforce(&self, subject: &str, resource: &str, action: &str) -> AuthResult<bool> {
        Ok(self.is_allowed(subject, resource, action))
    }
}
