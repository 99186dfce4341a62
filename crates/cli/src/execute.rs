use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use filters::{RuleEngine, parse_rules, read_rules, read_rules_dir};
use logging::{PathSink, trace_output, trace_rules};
use walk::{WalkBuilder, drop_covered};

use crate::config::{RuleSource, RunConfig};
use crate::error::CliError;

/// Reads every configured rule source, in order, into one engine.
pub fn load_rules<In>(config: &RunConfig, stdin: &mut In) -> Result<RuleEngine, CliError>
where
    In: BufRead,
{
    let root = config.root();
    let mut rules = Vec::new();
    for source in config.sources() {
        let loaded = match source {
            RuleSource::Stdin => parse_rules(&mut *stdin, root)?,
            RuleSource::File(path) => read_rules(path, root)?,
            RuleSource::Dir(dir) => read_rules_dir(dir, root)?,
        };
        trace_rules!("loaded {} rules from {}", loaded.len(), describe(source));
        rules.extend(loaded);
    }
    Ok(RuleEngine::from_rules(rules))
}

/// Computes the exclusion list for `config`.
///
/// Applies the covered-entry post-pass when the configuration asks for it.
pub fn compute_exclusions(
    config: &RunConfig,
    engine: &RuleEngine,
) -> Result<Vec<PathBuf>, CliError> {
    let walker = WalkBuilder::new(config.root())
        .parallel(config.parallel())
        .build()?;
    let rules = |path: &Path| engine.evaluate(path);
    let excluded = walker.walk(&rules)?;

    if config.dedupe() {
        let before = excluded.len();
        let kept = drop_covered(excluded);
        trace_output!("dedupe dropped {} covered paths", before - kept.len());
        Ok(kept)
    } else {
        Ok(excluded)
    }
}

/// Writes `paths` to the configured destination.
///
/// The output file, if any, is only created here, after the walk succeeded.
pub fn write_exclusions<Out>(
    config: &RunConfig,
    paths: &[PathBuf],
    stdout: &mut Out,
) -> Result<(), CliError>
where
    Out: Write,
{
    match config.output() {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::CreateOutput {
                path: path.to_path_buf(),
                source,
            })?;
            write_records(BufWriter::new(file), config, paths)?;
            trace_output!("wrote {} paths to {}", paths.len(), path.display());
        }
        None => {
            write_records(stdout, config, paths)?;
            trace_output!("wrote {} paths to standard output", paths.len());
        }
    }
    Ok(())
}

fn write_records<W: Write>(
    writer: W,
    config: &RunConfig,
    paths: &[PathBuf],
) -> Result<(), CliError> {
    let mut sink = PathSink::with_line_mode(writer, config.line_mode());
    sink.write_all(paths).map_err(CliError::WriteOutput)?;
    sink.flush().map_err(CliError::WriteOutput)
}

fn describe(source: &RuleSource) -> String {
    match source {
        RuleSource::Stdin => "standard input".to_owned(),
        RuleSource::File(path) | RuleSource::Dir(path) => path.display().to_string(),
    }
}

/// Runs one complete invocation: load rules, walk, write.
pub fn execute<In, Out>(
    config: &RunConfig,
    stdin: &mut In,
    stdout: &mut Out,
) -> Result<(), CliError>
where
    In: BufRead,
    Out: Write,
{
    let engine = load_rules(config, stdin)?;
    let paths = compute_exclusions(config, &engine)?;
    write_exclusions(config, &paths, stdout)
}
