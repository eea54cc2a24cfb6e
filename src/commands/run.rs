//! # Run Command Module / 运行命令模块
//!
//! This module implements the run command of the Case Runner CLI: it merges
//! the configuration file with the command-line flags, drives the harness
//! with a console progress sink, and prints the summary.
//!
//! 此模块实现了 Case Runner CLI 的运行命令：合并配置文件与命令行参数，
//! 使用控制台进度接收器驱动运行器，并打印摘要。

use anyhow::{Context, Result};
use colored::*;
use std::env;
use tracing::info;

use crate::{
    cli::RunArgs,
    core::{
        config::{self, HarnessConfig},
        harness::{Harness, RunSettings},
    },
    infra::t,
    reporting::{ConsoleProgress, print_failure_details, print_summary},
};

/// Executes a run with the provided arguments.
///
/// # Returns
/// The process exit code: `0` if no case failed, `1` otherwise. Broken
/// descriptors and configuration problems are returned as errors.
pub async fn execute(args: RunArgs, language: &str) -> Result<u8> {
    let harness_config = config::load_or_default(&args.config, args.config_explicit)
        .with_context(|| {
            t!("config_load_failed", locale = language, path = args.config.display()).to_string()
        })?;
    harness_config.validate()?;

    let mut locale = language.to_string();
    if args.lang.is_none() {
        if let Some(configured) = &harness_config.language {
            locale = crate::resolve_locale(Some(configured));
            rust_i18n::set_locale(&locale);
        }
    }

    if args.config.exists() {
        println!(
            "{}",
            t!("run.loaded_config", locale = &locale, path = args.config.display()).cyan()
        );
    }

    let settings = resolve_settings(harness_config, &args)?;
    info!(?settings, "resolved run settings");

    let mut harness = Harness::new(settings, ConsoleProgress::new(!args.non_interactive));
    let summary = harness.run().await?;

    print_summary(&summary, &locale);
    print_failure_details(&summary, &locale);

    Ok(summary.exit_code())
}

/// Merges command-line flags over the configuration file values.
///
/// 将命令行参数覆盖到配置文件的值之上。
pub fn resolve_settings(config: HarnessConfig, args: &RunArgs) -> Result<RunSettings> {
    let cwd = env::current_dir().context("Failed to determine the working directory")?;
    let subject = args.subject.clone().unwrap_or(config.subject);

    Ok(RunSettings {
        test_root: args.root.clone().unwrap_or(config.test_root),
        category: args.category.clone(),
        extension: config.extension,
        subject: config::absolutize_subject(&subject, &cwd),
        timeout: std::time::Duration::from_secs(args.timeout_secs.unwrap_or(config.timeout_secs)),
        repeat: args.repeat.unwrap_or(config.repeat),
        stop_on_failure: args.stop_on_failure || config.stop_on_failure,
        report_path: args.report.clone().unwrap_or(config.report_path),
        suite_name: config.suite_name,
    })
}
