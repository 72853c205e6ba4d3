mod parse;
mod position;
mod strip;
mod validate_grammar;

use std::ops::Range;
use std::path::Path;

use parse::peg_parser::grammar;
use parse::RawRule;

pub use position::{Pos, SourceFile};
pub use strip::{strip, StripError};
pub use validate_grammar::validate_grammar;

use crate::configuration::ActionPolicy;

/// A single `Name <- Expression` definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    /// canonical body, the only thing compared between grammars
    pub expr: String,
    /// the whole definition as written
    pub text: String,
    pub pos: Pos,
}

pub type Grammar = Vec<Rule>;

#[derive(thiserror::Error, Debug)]
pub enum GrammarError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("{path}:{line}:{column}: syntax error: expected {expected}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
        offset: usize,
        expected: String,
    },

    #[error("{path}: rule {rule:?}: {source}")]
    Strip {
        path: String,
        rule: String,
        source: StripError,
    },
}

pub fn load_grammar<P: AsRef<Path>>(path: P, policy: ActionPolicy) -> Result<Grammar, GrammarError> {
    let source = SourceFile::read(&path).map_err(|source| GrammarError::Read {
        path: path.as_ref().display().to_string(),
        source,
    })?;

    parse_grammar(&source, policy)
}

pub fn parse_grammar(source: &SourceFile, policy: ActionPolicy) -> Result<Grammar, GrammarError> {
    let parsed = grammar(&source.content, policy).map_err(|e| GrammarError::Syntax {
        path: source.path.clone(),
        line: e.location.line,
        column: e.location.column,
        offset: e.location.offset,
        expected: e.expected.to_string(),
    })?;

    parsed
        .into_iter()
        .map(|raw| build_rule(source, raw, policy))
        .collect()
}

fn build_rule(source: &SourceFile, raw: RawRule, policy: ActionPolicy) -> Result<Rule, GrammarError> {
    let stripped = if policy == ActionPolicy::Strip && !raw.actions.is_empty() {
        strip(&splice_out(&source.content, raw.body, &raw.actions))
    } else {
        strip(&source.content[raw.body])
    };

    let expr = stripped.map_err(|e| GrammarError::Strip {
        path: source.path.clone(),
        rule: raw.name.clone(),
        source: e,
    })?;

    Ok(Rule {
        expr,
        text: source.content[raw.span.clone()].to_string(),
        pos: source.locate(raw.span.start),
        name: raw.name,
    })
}

/// Copies `range` of `content` without the (ordered, disjoint) `holes`.
fn splice_out(content: &str, range: Range<usize>, holes: &[Range<usize>]) -> String {
    let mut spliced = String::with_capacity(range.len());
    let mut from = range.start;

    for hole in holes {
        spliced.push_str(&content[from..hole.start]);
        from = hole.end;
    }
    spliced.push_str(&content[from..range.end]);

    spliced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str, policy: ActionPolicy) -> Result<Grammar, GrammarError> {
        parse_grammar(&SourceFile::new("test.peg", content.to_string()), policy)
    }

    #[test]
    fn rules_carry_position_text_and_canonical_body() {
        let rules = parse("A <- 'a'\nB <- 'b' # tail\n", ActionPolicy::Reject).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].name, "B");
        assert_eq!(rules[1].expr, "'b'");
        assert_eq!(rules[1].text, "B <- 'b' # tail\n");
        assert_eq!(rules[1].pos.line, 2);
        assert_eq!(rules[1].pos.column, 1);
        assert_eq!(rules[1].pos.offset, "A <- 'a'\n".len());
        assert_eq!(rules[1].pos.path, "test.peg");
    }

    #[test]
    fn internal_whitespace_survives() {
        let rules = parse("A <- 'a'   B\n\t/ C\nB <- 'b'\nC <- 'c'\n", ActionPolicy::Reject).unwrap();

        assert_eq!(rules[0].expr, "'a'   B\n\t/ C");
    }

    #[test]
    fn indented_definition_column() {
        let rules = parse("A <- 'a'\n    B <- 'b'\n", ActionPolicy::Reject).unwrap();

        assert_eq!((rules[1].pos.line, rules[1].pos.column), (2, 5));
    }

    #[test]
    fn syntax_error_names_file_and_position() {
        let err = parse("A <- 'a'\nB <- )\n", ActionPolicy::Reject).unwrap_err();

        match err {
            GrammarError::Syntax {
                path, line, column, ..
            } => {
                assert_eq!(path, "test.peg");
                assert_eq!((line, column), (2, 6));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn action_policies_shape_the_body() {
        let content = "A <- 'a' { return 1 } # c\n / 'b'\n";

        assert!(matches!(
            parse(content, ActionPolicy::Reject),
            Err(GrammarError::Syntax { .. })
        ));

        let kept = parse(content, ActionPolicy::Keep).unwrap();
        assert_eq!(kept[0].expr, "'a' { return 1 }  / 'b'");

        let stripped = parse(content, ActionPolicy::Strip).unwrap();
        assert_eq!(stripped[0].expr, "'a'   / 'b'");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_grammar("does/not/exist.peg", ActionPolicy::Reject).unwrap_err();

        assert!(matches!(err, GrammarError::Read { .. }));
        assert!(err.to_string().contains("does/not/exist.peg"));
    }
}
