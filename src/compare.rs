use std::collections::HashMap;

use crate::grammar::Rule;
use crate::log::log;
use crate::report::Diagnostic;

/// Diffs `candidate` against `reference`, one diagnostic per disagreeing candidate rule.
///
/// Rules are matched by name. When the reference defines a name more than
/// once, its last definition is used.
pub fn compare(reference: &[Rule], candidate: &[Rule]) -> Vec<Diagnostic> {
    let rules: HashMap<&str, &Rule> = reference
        .iter()
        .map(|rule| (rule.name.as_str(), rule))
        .collect();

    candidate
        .iter()
        .filter_map(|rule| match rules.get(rule.name.as_str()) {
            None => Some(Diagnostic::not_found(rule)),
            // byte for byte, including inner whitespace
            Some(known) if known.expr != rule.expr => {
                log!("{} differs from {}", rule.pos, known.pos);
                Some(Diagnostic::mismatch(rule, known))
            }
            Some(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ActionPolicy;
    use crate::grammar::{parse_grammar, SourceFile};
    use crate::report::DiagnosticKind;

    fn rules(path: &str, content: &str) -> Vec<Rule> {
        parse_grammar(&SourceFile::new(path, content.to_string()), ActionPolicy::Reject).unwrap()
    }

    #[test]
    fn grammar_matches_itself() {
        let grammar = rules("g.peg", "A <- 'a' B # x\nB <- [b-z]+ / !A .\n");

        assert!(compare(&grammar, &grammar).is_empty());
    }

    #[test]
    fn changed_body_is_a_mismatch() {
        let reference = rules("ref.peg", "A <- 'a' B\nB <- 'b'\n");
        let candidate = rules("cand.peg", "A <- 'a' B\nB <- 'c'\n");

        let diagnostics = compare(&reference, &candidate);

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::Mismatch);
        assert_eq!(diagnostic.name, "B");
        assert_eq!(diagnostic.candidate.body, "'c'");
        assert_eq!(diagnostic.candidate.pos.to_string(), "cand.peg:2:1");
        let known = diagnostic.reference.as_ref().unwrap();
        assert_eq!(known.body, "'b'");
        assert_eq!(known.pos.to_string(), "ref.peg:2:1");
    }

    #[test]
    fn comments_and_outer_whitespace_do_not_matter() {
        let reference = rules("ref.peg", "A <- 'a' / 'b'\n");
        let candidate = rules("cand.peg", "# header\nA <-   'a' / 'b'   # same\n\n");

        assert!(compare(&reference, &candidate).is_empty());
    }

    #[test]
    fn inner_whitespace_matters() {
        let reference = rules("ref.peg", "A <- 'a' / 'b'\n");
        let candidate = rules("cand.peg", "A <- 'a'  / 'b'\n");

        assert_eq!(compare(&reference, &candidate).len(), 1);
    }

    #[test]
    fn unknown_rules_do_not_stop_the_scan() {
        let reference = rules("ref.peg", "A <- 'a'\nB <- 'b'\n");
        let candidate = rules("cand.peg", "C <- 'x'\nA <- 'a'\nD <- 'y'\nB <- 'z'\n");

        let diagnostics = compare(&reference, &candidate);
        let summary: Vec<(&str, DiagnosticKind)> = diagnostics
            .iter()
            .map(|d| (d.name.as_str(), d.kind))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("C", DiagnosticKind::NotFound),
                ("D", DiagnosticKind::NotFound),
                ("B", DiagnosticKind::Mismatch),
            ]
        );
        assert!(diagnostics[0].reference.is_none());
    }

    #[test]
    fn mismatch_is_logged_by_position() {
        let reference = rules("logged_ref.peg", "Q <- 'q' # noted\n");
        let candidate = rules("logged_cand.peg", "Q <- 'r'\n");

        assert_eq!(compare(&reference, &candidate).len(), 1);

        let message = crate::log::pull_messages(128)
            .into_iter()
            .rfind(|m| m.contains("logged_cand.peg:1:1"))
            .unwrap();
        assert!(message.ends_with("logged_cand.peg:1:1 differs from logged_ref.peg:1:1"));
        assert!(!message.contains("noted"));
    }

    #[test]
    fn last_reference_definition_wins() {
        let reference = rules("ref.peg", "A <- 'old'\nA <- 'new'\n");
        let candidate = rules("cand.peg", "A <- 'new'\n");

        assert!(compare(&reference, &candidate).is_empty());
    }
}
