//! String matching for dispatch rules.
//!
//! A `Pattern` describes a set of acceptable strings: an exact string, an
//! ordered set of strings, or an arbitrary predicate. Rules use patterns for
//! both hostnames and URL paths.

use std::fmt;
use std::sync::Arc;

/// What strings a rule accepts. The tagged representation means a rule can
/// never carry a malformed pattern.
#[derive(Clone)]
pub enum Pattern {
    /// Matches exactly one string.
    Exact(String),
    /// Matches any member of the sequence, scanned in order.
    AnyOf(Vec<String>),
    /// Delegates the decision to a predicate.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Pattern {
    pub fn exact(s: impl Into<String>) -> Self {
        Pattern::Exact(s.into())
    }

    pub fn any_of<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Pattern::AnyOf(items.into_iter().map(Into::into).collect())
    }

    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Pattern::Predicate(Arc::new(f))
    }

    /// Whether `candidate` satisfies this pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Pattern::Exact(s) => candidate == s,
            Pattern::AnyOf(set) => set.iter().any(|s| s == candidate),
            Pattern::Predicate(f) => f(candidate),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Exact(s) => f.debug_tuple("Exact").field(s).finish(),
            Pattern::AnyOf(set) => f.debug_tuple("AnyOf").field(set).finish(),
            Pattern::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Exact(s.to_string())
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Exact(s)
    }
}
