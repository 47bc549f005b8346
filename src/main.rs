use clap::Parser;
use console::style;
use log::{error, info};
use rust_i18n::t;
use std::process::ExitCode;
use video_storyboard::cli::{Cli, run};
use video_storyboard::config::Config;
use video_storyboard::init;
use video_storyboard::signal::setup_shutdown_signal;

rust_i18n::i18n!("locales", fallback = "en-US");

fn main() -> ExitCode {
    init::init();
    let cli = Cli::parse();

    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            error!("設定載入失敗: {e:#}");
            eprintln!("{} {e:#}", style(t!("cli.fatal_prefix")).red().bold());
            return ExitCode::FAILURE;
        }
    };
    rust_i18n::set_locale(config.settings.language.as_str());

    let shutdown_signal = setup_shutdown_signal();

    match run(&cli, &config, &shutdown_signal) {
        Ok(summary) if summary.all_succeeded() => {
            info!("完成，共 {} 支影片", summary.total);
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            info!(
                "完成 - 成功: {}, 失敗: {}",
                summary.successful, summary.failed
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("執行失敗: {e:#}");
            eprintln!("{} {e:#}", style(t!("cli.fatal_prefix")).red().bold());
            ExitCode::FAILURE
        }
    }
}
