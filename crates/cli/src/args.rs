use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};

use crate::PROGRAM_NAME;

/// Command line as recognised by [`parse_args`], before validation.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) prefix: Option<PathBuf>,
    pub(crate) rule_files: Vec<PathBuf>,
    pub(crate) rule_dirs: Vec<PathBuf>,
    pub(crate) null: bool,
    pub(crate) output: Option<PathBuf>,
    pub(crate) dedupe: bool,
    pub(crate) parallel: bool,
    pub(crate) verbosity: u8,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rules")
                .long("rules")
                .short('f')
                .value_name("FILE")
                .help("Read rules from FILE ('-' for standard input).")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("rules-dir")
                .long("rules-dir")
                .short('d')
                .value_name("DIR")
                .help("Read dpkg.cfg.d-style rule fragments from DIR.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("null")
                .long("null")
                .short('0')
                .help("Terminate output records with NUL instead of newline.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Write the exclusion list to FILE instead of standard output.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("dedupe")
                .long("dedupe")
                .help("Drop entries already covered by an emitted directory.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('j')
                .help("Walk sibling directories in parallel.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic verbosity (repeatable).")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("prefix")
                .value_name("PREFIX")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let paths = |values: Option<clap::parser::Values<OsString>>| -> Vec<PathBuf> {
        values
            .map(|values| values.map(PathBuf::from).collect())
            .unwrap_or_default()
    };

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        prefix: matches.remove_one::<OsString>("prefix").map(PathBuf::from),
        rule_files: paths(matches.remove_many::<OsString>("rules")),
        rule_dirs: paths(matches.remove_many::<OsString>("rules-dir")),
        null: matches.get_flag("null"),
        output: matches.remove_one::<OsString>("output").map(PathBuf::from),
        dedupe: matches.get_flag("dedupe"),
        parallel: matches.get_flag("parallel"),
        verbosity: matches.get_count("verbose"),
    })
}

/// Extracts the one-line reason from a `clap` error.
pub(crate) fn usage_reason(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    first.strip_prefix("error: ").unwrap_or(first).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args_accepts_bare_prefix() {
        let parsed = parse_args(["excludepaths", "/target"]).expect("parse");
        assert_eq!(
            parsed,
            ParsedArgs {
                prefix: Some(PathBuf::from("/target")),
                ..ParsedArgs::default()
            }
        );
    }

    #[test]
    fn parse_args_keeps_repeated_sources_in_order() {
        let parsed = parse_args([
            "excludepaths",
            "-f",
            "b.cfg",
            "--rules",
            "a.cfg",
            "--rules-dir",
            "/etc/dpkg/dpkg.cfg.d",
            "-d",
            "extra.d",
            "/target",
        ])
        .expect("parse");
        assert_eq!(
            parsed.rule_files,
            vec![PathBuf::from("b.cfg"), PathBuf::from("a.cfg")]
        );
        assert_eq!(
            parsed.rule_dirs,
            vec![PathBuf::from("/etc/dpkg/dpkg.cfg.d"), PathBuf::from("extra.d")]
        );
    }

    #[test]
    fn parse_args_recognises_output_flags() {
        let parsed = parse_args([
            "excludepaths",
            "-0",
            "--dedupe",
            "-j",
            "-o",
            "list.txt",
            "/target",
        ])
        .expect("parse");
        assert!(parsed.null);
        assert!(parsed.dedupe);
        assert!(parsed.parallel);
        assert_eq!(parsed.output, Some(PathBuf::from("list.txt")));
    }

    #[test]
    fn parse_args_counts_verbosity() {
        let parsed = parse_args(["excludepaths", "-vv", "--verbose", "/target"]).expect("parse");
        assert_eq!(parsed.verbosity, 3);
    }

    #[test]
    fn parse_args_allows_missing_prefix_for_help() {
        let parsed = parse_args(["excludepaths", "--help"]).expect("parse");
        assert!(parsed.show_help);
        assert!(parsed.prefix.is_none());
    }

    #[test]
    fn parse_args_defaults_program_name_when_empty() {
        let parsed = parse_args(Vec::<OsString>::new()).expect("parse");
        assert_eq!(parsed, ParsedArgs::default());
    }

    #[test]
    fn parse_args_rejects_second_prefix() {
        let error = parse_args(["excludepaths", "/a", "/b"]).expect_err("extra operand");
        assert!(usage_reason(&error).contains("unexpected argument"));
    }

    #[test]
    fn parse_args_rejects_unknown_option() {
        let error = parse_args(["excludepaths", "--frobnicate", "/a"]).expect_err("unknown");
        let reason = usage_reason(&error);
        assert!(reason.contains("--frobnicate"), "{reason}");
        assert!(!reason.starts_with("error:"));
    }
}
