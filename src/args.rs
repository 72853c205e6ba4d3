use std::path::PathBuf;

use clap::Parser;

use crate::configuration::{ActionPolicy, CmpConfig, ReportFormat};

/// Report where the rules of a candidate PEG grammar diverge from a reference grammar.
#[derive(Debug, Parser)]
#[command(name = "pegcmp", version)]
pub struct CmpArgs {
    /// Reference grammar, assumed to be valid
    pub reference: PathBuf,

    /// Grammar to check against the reference
    pub candidate: PathBuf,

    /// TOML file with [parse] and [report] settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How to treat `{ ... }` code blocks after a rule expression
    #[arg(long, value_enum)]
    pub actions: Option<ActionPolicy>,

    /// Diagnostic output format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Exit with status 65 when any rule differs
    #[arg(long)]
    pub strict: bool,

    /// Print progress messages to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl CmpArgs {
    /// Flags given on the command line win over the config file.
    pub fn apply(&self, mut config: CmpConfig) -> CmpConfig {
        if let Some(actions) = self.actions {
            config.parse.actions = actions;
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        config.report.fail_on_mismatch |= self.strict;
        config
    }
}
