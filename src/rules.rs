//! Dispatch rules: which pages get which injection.
//!
//! A `RuleTable` is an ordered list of rules evaluated first-match-wins. The
//! table is built once at startup and read-only afterwards; there is no rule
//! persistence.

use crate::matcher::Pattern;

/// What caused a dispatch: the page finishing loading, or the user invoking
/// the registered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Load,
    Command,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::Load => "load",
            Trigger::Command => "command",
        }
    }
}

/// The injection a matched rule performs: a script file shipped with the
/// extension, or an inline code string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    Script(&'a str),
    Code(&'a str),
}

/// A matched rule carried neither a code nor a script action. Treated as a
/// development-time bug, not a recoverable condition.
#[derive(Debug, thiserror::Error)]
#[error("rule for {host} has neither code nor script")]
pub struct MissingAction {
    pub host: String,
}

/// One entry mapping a site/page pattern to an injection action.
///
/// `path` and `trigger` are optional constraints; absent means match-any.
/// A rule should carry exactly one of `code`/`script`; when both are present
/// `script` silently wins, and when neither is present resolving the action
/// fails with [`MissingAction`].
#[derive(Debug, Clone)]
pub struct Rule {
    pub host: Pattern,
    pub path: Option<Pattern>,
    pub trigger: Option<Trigger>,
    pub code: Option<String>,
    pub script: Option<String>,
}

impl Rule {
    pub fn for_host(host: impl Into<Pattern>) -> Self {
        Self {
            host: host.into(),
            path: None,
            trigger: None,
            code: None,
            script: None,
        }
    }

    pub fn path(mut self, path: impl Into<Pattern>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn on(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn script(mut self, file: impl Into<String>) -> Self {
        self.script = Some(file.into());
        self
    }

    /// Resolves the injection action. `script` wins over `code` when both are
    /// present.
    pub fn action(&self, matched_host: &str) -> Result<Action<'_>, MissingAction> {
        if let Some(file) = self.script.as_deref() {
            return Ok(Action::Script(file));
        }
        if let Some(code) = self.code.as_deref() {
            return Ok(Action::Code(code));
        }
        Err(MissingAction {
            host: matched_host.to_string(),
        })
    }

    /// Whether this rule matches the given (normalized) hostname, path, and
    /// trigger. Absent `path`/`trigger` constraints match anything.
    pub fn applies_to(&self, host: &str, path: &str, trigger: Trigger) -> bool {
        self.host.matches(host)
            && self.path.as_ref().map_or(true, |p| p.matches(path))
            && self.trigger.map_or(true, |t| t == trigger)
    }
}

/// Ordered rule list; evaluation is first-full-match-wins.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// First rule fully matching the (normalized) hostname, path, and
    /// trigger; `None` when no rule applies.
    pub fn first_match(&self, host: &str, path: &str, trigger: Trigger) -> Option<&Rule> {
        self.rules.iter().find(|r| r.applies_to(host, path, trigger))
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
