use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::Rule;
use crate::log::log;
use crate::report::Diagnostic;

/// Every same-named pair of rules whose canonical bodies disagree.
#[derive(thiserror::Error, Debug)]
#[error("{} duplicate rule(s) do not match", .conflicts.len())]
pub struct DuplicateRules {
    pub conflicts: Vec<Diagnostic>,
}

/// Checks that repeated definitions of a name agree with its first definition.
///
/// Identical duplicates are accepted. Scanning does not stop at the first
/// conflict, so the error lists all of them.
pub fn validate_grammar(grammar: &[Rule]) -> Result<(), DuplicateRules> {
    let mut first_seen: HashMap<&str, &Rule> = HashMap::new();
    let mut conflicts = vec![];

    for rule in grammar {
        match first_seen.entry(rule.name.as_str()) {
            Entry::Vacant(entry) => {
                entry.insert(rule);
            }
            Entry::Occupied(entry) => {
                let first = *entry.get();
                if first.expr != rule.expr {
                    log!("conflicting definition at {}: {:?}", rule.pos, rule.text);
                    conflicts.push(Diagnostic::duplicate(rule, first));
                }
            }
        }
    }

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(DuplicateRules { conflicts })
    }
}
