use std::io::{self, Write};

use serde_derive::Serialize;

use crate::configuration::ReportFormat;
use crate::grammar::{Pos, Rule};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    NotFound,
    Mismatch,
    DuplicateMismatch,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub pos: Pos,
    pub body: String,
}

impl From<&Rule> for Location {
    fn from(rule: &Rule) -> Self {
        Location {
            pos: rule.pos.clone(),
            body: rule.expr.clone(),
        }
    }
}

/// One reported disagreement. `candidate` is the rule under inspection,
/// `reference` the rule it was held against, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub name: String,
    pub candidate: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Location>,
}

impl Diagnostic {
    pub fn not_found(candidate: &Rule) -> Self {
        Diagnostic {
            kind: DiagnosticKind::NotFound,
            name: candidate.name.clone(),
            candidate: candidate.into(),
            reference: None,
        }
    }

    pub fn mismatch(candidate: &Rule, reference: &Rule) -> Self {
        Diagnostic {
            kind: DiagnosticKind::Mismatch,
            name: candidate.name.clone(),
            candidate: candidate.into(),
            reference: Some(reference.into()),
        }
    }

    pub fn duplicate(later: &Rule, first: &Rule) -> Self {
        Diagnostic {
            kind: DiagnosticKind::DuplicateMismatch,
            name: later.name.clone(),
            candidate: later.into(),
            reference: Some(first.into()),
        }
    }

    fn headline(&self) -> String {
        match self.kind {
            DiagnosticKind::NotFound => format!("! rule {:?} not found", self.name),
            DiagnosticKind::Mismatch => format!("! rule {:?} does not match", self.name),
            DiagnosticKind::DuplicateMismatch => {
                format!("! duplicate rule {:?} does not match", self.name)
            }
        }
    }
}

pub fn write_diagnostics<W: Write>(
    out: &mut W,
    diagnostics: &[Diagnostic],
    format: ReportFormat,
) -> io::Result<()> {
    for diagnostic in diagnostics {
        match format {
            ReportFormat::Text => write_text(out, diagnostic)?,
            ReportFormat::Json => {
                serde_json::to_writer(&mut *out, diagnostic)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()
}

fn write_text<W: Write>(out: &mut W, diagnostic: &Diagnostic) -> io::Result<()> {
    writeln!(out, "{}", diagnostic.headline())?;
    writeln!(out, "> {}", diagnostic.candidate.pos)?;
    writeln!(out, "> {}", diagnostic.candidate.body)?;

    if let Some(reference) = &diagnostic.reference {
        writeln!(out, "< {}", reference.pos)?;
        writeln!(out, "< {}", reference.body)?;
    }

    writeln!(out)
}
