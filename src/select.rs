use log::{info, warn};

use crate::Rule;

/// Select the rule that applies to `url`.
///
/// Rules are tried in order and the first whose pattern matches wins,
/// regardless of how specific later patterns are. A rule whose pattern failed
/// to compile is reported and skipped; selection continues with the next one.
#[must_use]
pub fn select_rule<'r>(url: &str, rules: &'r [Rule]) -> Option<&'r Rule> {
    for rule in rules {
        match rule.pattern().is_match(url) {
            Ok(true) => {
                info!("matched pattern: {}", rule.pattern().source());
                return Some(rule);
            }
            Ok(false) => {}
            Err(err) => warn!("skipping rule: {err}"),
        }
    }
    None
}
