use std::ops::Range;

use crate::configuration::ActionPolicy;

/// One definition as matched by the parser, expressed as byte ranges into the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRule {
    pub name: String,
    pub span: Range<usize>,
    pub body: Range<usize>,
    /// action blocks inside `body`, in source order
    pub actions: Vec<Range<usize>>,
}

type ActionSpans = Vec<Range<usize>>;

peg::parser! {

    pub grammar peg_parser(policy: ActionPolicy) for str {

        pub rule grammar() -> Vec<RawRule> =
            spacing() definitions:definition()+ end_of_input() {
                definitions
            }

        rule definition() -> RawRule =
            start:position!() name:identifier() arrow()
            body_start:position!() actions:expression() end:position!() {
                RawRule {
                    name,
                    span: start..end,
                    body: body_start..end,
                    actions,
                }
            }

        rule expression() -> ActionSpans =
            sequences:(sequence() ++ slash()) {
                sequences.concat()
            }

        rule sequence() -> ActionSpans =
            prefixes:prefix()* action:action()? {
                let mut spans = prefixes.concat();
                spans.extend(action);
                spans
            }

        rule prefix() -> ActionSpans =
            (and() / not())? s:suffix() { s }

        rule suffix() -> ActionSpans =
            p:primary() (question() / star() / plus())? { p }

        rule primary() -> ActionSpans =
            identifier() !arrow() { vec![] }
            /
            open() e:expression() close() { e }
            /
            literal() { vec![] }
            /
            class() { vec![] }
            /
            dot() { vec![] }

        rule action() -> Range<usize> =
            quiet!{ &"{" } actions_allowed()
            start:position!() code_block() end:position!() spacing() {
                start..end
            }

        rule actions_allowed() =
            "" {?
                if policy == ActionPolicy::Reject {
                    Err("end of rule (semantic actions are rejected)")
                } else {
                    Ok(())
                }
            }

        rule code_block() = "{" code() "}"

        rule code() = ([^ '{' | '}']+ / code_block())*

        rule identifier() -> String =
            quiet!{
                name:$(['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*) spacing() {
                    name.to_string()
                }
            } / expected!("identifier")

        rule literal() =
            quiet!{
                ("'" (!"'" character())* "'" / "\"" (!"\"" character())* "\"") spacing()
            } / expected!("literal")

        rule class() =
            quiet!{ "[" (!"]" range())* "]" spacing() } / expected!("character class")

        rule range() = character() "-" character() / character()

        rule character() =
            "\\" ['n' | 'r' | 't' | '\'' | '"' | '[' | ']' | '\\']
            /
            "\\" ['0'..='2'] ['0'..='7'] ['0'..='7']
            /
            "\\" ['0'..='7'] ['0'..='7']?
            /
            !"\\" [_]

        rule arrow() = "<-" spacing()
        rule slash() = "/" spacing()
        rule and() = "&" spacing()
        rule not() = "!" spacing()
        rule question() = "?" spacing()
        rule star() = "*" spacing()
        rule plus() = "+" spacing()
        rule open() = "(" spacing()
        rule close() = ")" spacing()
        rule dot() = "." spacing()

        rule spacing() = quiet!{ (space() / comment())* }

        rule comment() = "#" (!end_of_line() [_])* end_of_line()

        rule space() = [' ' | '\t'] / end_of_line()

        rule end_of_line() = "\r\n" / "\n" / "\r"

        rule end_of_input() = quiet!{ ![_] } / expected!("end of input")

    }
}
