// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf, process::ExitCode};

use crate::{commands, config::DEFAULT_CONFIG_FILE, infra::t};

/// Options of a run as given on the command line. `None` means "not given",
/// so the configuration file value applies.
///
/// 命令行给出的运行选项。`None` 表示未指定，此时使用配置文件中的值。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub category: String,
    pub non_interactive: bool,
    pub stop_on_failure: bool,
    pub config: PathBuf,
    pub config_explicit: bool,
    pub repeat: Option<u32>,
    pub report: Option<PathBuf>,
    pub subject: Option<String>,
    pub timeout_secs: Option<u64>,
    pub root: Option<PathBuf>,
    pub lang: Option<String>,
}

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language(args: &[String]) -> Option<String> {
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang=").map(str::to_string))
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("case-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("category")
                .help(t!("arg_category", locale = locale).to_string())
                .value_name("CATEGORY")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("non-interactive")
                .long("non-interactive")
                .visible_alias("jenkins")
                .help(t!("arg_non_interactive", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stop-on-error")
                .long("stop-on-error")
                .visible_alias("stop-on-failure")
                .help(t!("arg_stop_on_error", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("repeat")
                .long("repeat")
                .help(t!("arg_repeat", locale = locale).to_string())
                .value_name("N")
                .value_parser(clap::value_parser!(u32).range(1..))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help(t!("arg_report", locale = locale).to_string())
                .value_name("REPORT")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("subject")
                .long("subject")
                .help(t!("arg_subject", locale = locale).to_string())
                .value_name("COMMAND")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help(t!("arg_timeout", locale = locale).to_string())
                .value_name("SECS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help(t!("arg_root", locale = locale).to_string())
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
}

/// Extracts [`RunArgs`] from parsed matches.
pub fn run_args(matches: &ArgMatches) -> RunArgs {
    let config = matches.get_one::<PathBuf>("config").cloned();
    RunArgs {
        category: matches
            .get_one::<String>("category")
            .cloned()
            .unwrap_or_default(),
        non_interactive: matches.get_flag("non-interactive"),
        stop_on_failure: matches.get_flag("stop-on-error"),
        config_explicit: config.is_some(),
        config: config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        repeat: matches.get_one::<u32>("repeat").copied(),
        report: matches.get_one::<PathBuf>("report").cloned(),
        subject: matches.get_one::<String>("subject").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        root: matches.get_one::<PathBuf>("root").cloned(),
        lang: matches.get_one::<String>("lang").cloned(),
    }
}

/// Parses the process arguments and runs the harness.
/// Returns the process exit code: `0` when nothing failed, `1` otherwise.
pub async fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    // Pre-parse language and initialize i18n first.
    let language = crate::resolve_locale(pre_parse_language(&args).as_deref());
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches_from(args);
    let run_args = run_args(&matches);

    let code = commands::run::execute(run_args, &language).await?;
    Ok(ExitCode::from(code))
}
