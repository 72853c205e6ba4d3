use std::io;
use std::path::Path;
use std::process;
use std::thread;

use anyhow::anyhow;
use beau_collector::BeauCollector;
use clap::Parser;

use crate::args::CmpArgs;
use crate::configuration::{load_config, ActionPolicy, CmpConfig};
use crate::grammar::{load_grammar, validate_grammar, Grammar};
use crate::log::log;

mod args;
mod compare;
mod configuration;
mod grammar;
mod log;
mod report;

/// Unreadable or malformed input, or conflicting duplicate rules.
const FAILURE: exitcode::ExitCode = 1;

fn load(path: &Path, policy: ActionPolicy) -> Result<Grammar, anyhow::Error> {
    let grammar = load_grammar(path, policy)?;
    log!("parsed {} rules from {}", grammar.len(), path.display());
    Ok(grammar)
}

/// Parses both grammars side by side, reporting every load failure at once.
fn load_both(
    reference: &Path,
    candidate: &Path,
    policy: ActionPolicy,
) -> Result<(Grammar, Grammar), anyhow::Error> {
    let loaded = thread::scope(|scope| {
        let handle = scope.spawn(move || load(reference, policy));
        let candidate = load(candidate, policy);

        let reference = handle
            .join()
            .map_err(|_| anyhow!("parser thread for {} panicked", reference.display()))
            .and_then(|result| result);

        [reference, candidate]
    });

    let [reference, candidate]: [Grammar; 2] = loaded
        .into_iter()
        .bcollect::<Vec<_>>()?
        .try_into()
        .map_err(|_| anyhow!("expected exactly two grammars"))?;

    Ok((reference, candidate))
}

fn run(args: &CmpArgs, config: &CmpConfig) -> Result<exitcode::ExitCode, anyhow::Error> {
    let format = config.report.format;
    let (reference, candidate) = load_both(&args.reference, &args.candidate, config.parse.actions)?;

    let mut out = io::stderr().lock();

    if let Err(duplicates) = validate_grammar(&candidate) {
        report::write_diagnostics(&mut out, &duplicates.conflicts, format)?;
        return Err(anyhow::Error::new(duplicates).context(args.candidate.display().to_string()));
    }

    let diagnostics = compare::compare(&reference, &candidate);
    log!(
        "compared {} candidate rules against {} reference rules, {} differ",
        candidate.len(),
        reference.len(),
        diagnostics.len()
    );
    report::write_diagnostics(&mut out, &diagnostics, format)?;

    if config.report.fail_on_mismatch && !diagnostics.is_empty() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn fail(error: anyhow::Error) -> ! {
    eprintln!("pegcmp: {error:#}");

    if !log::echo_enabled() {
        let trail = log::pull_messages(16);
        if !trail.is_empty() {
            eprintln!("recent activity:");
            for message in trail {
                eprintln!("    {message}");
            }
        }
    }

    process::exit(FAILURE)
}

fn main() {
    let args = CmpArgs::parse();
    log::set_echo(args.verbose);

    let config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => {
                log!("loaded config from {}", path.display());
                config
            }
            Err(e) => fail(anyhow::Error::new(e).context(path.display().to_string())),
        },
        None => CmpConfig::default(),
    };
    let config = args.apply(config);

    match run(&args, &config) {
        Ok(code) => process::exit(code),
        Err(e) => fail(e),
    }
}
