//! The compiled-in rule table.
//!
//! Rules live in code, not in a config file; changing them is a development
//! task by design.

use crate::matcher::Pattern;
use crate::rules::{Rule, RuleTable, Trigger};

/// Returns a snippet that narrows the given container selector to a readable
/// column width. `max_width` defaults to 800px.
pub fn set_max_width(selector: &str, max_width: Option<&str>) -> String {
    let max_width = max_width.unwrap_or("800px");
    format!(
        "let thing = document.querySelector(\"{selector}\");\n\
         thing.style.marginRight = 'auto';\n\
         thing.style.maxWidth = '{max_width}';"
    )
}

/// The built-in rule table: narrow Wikipedia articles on load, and run the
/// Slack emoji exporter on the custom-emoji page on explicit command.
pub fn default_table() -> RuleTable {
    RuleTable::new(vec![
        Rule::for_host("en.wikipedia.org")
            .path(Pattern::predicate(|p| p.starts_with("/wiki/")))
            .code(set_max_width("#content", None)),
        Rule::for_host(Pattern::predicate(|h| h.ends_with(".slack.com")))
            .path("/customize/emoji")
            .on(Trigger::Command)
            .script("slack.js"),
    ])
}
