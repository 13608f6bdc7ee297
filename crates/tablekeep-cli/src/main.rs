// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use runtime::ApiRuntime;
use std::env;
use std::path::PathBuf;
use tablekeep_app::{TableName, ViewState, ViewSynchronizer, table_names_from_payload};
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `tablekeep --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    logging::init(&config.log_level(), &config.log_path()?)?;

    let base_url = options.base_url.clone().unwrap_or_else(|| config.base_url());
    let client = tablekeep_api::Client::new(&base_url, config.timeout()?).with_context(|| {
        format!(
            "invalid server settings from {}; fix base_url/timeout or pass --base-url",
            options.config_path.display()
        )
    })?;
    info!(base_url = client.base_url(), "starting");

    if options.check_only || options.list_tables {
        let tables = fetch_table_names(&client)?;
        if options.list_tables {
            for table in &tables {
                println!("{table}");
            }
        } else {
            println!("ok: {} tables at {}", tables.len(), client.base_url());
        }
        return Ok(());
    }

    let mut sync = ViewSynchronizer::new(ApiRuntime::new(client));
    let mut view = ViewState::default();
    tablekeep_tui::run_app(&mut view, &mut sync)
}

fn fetch_table_names(client: &tablekeep_api::Client) -> Result<Vec<TableName>> {
    let payload = client.list_tables()?;
    table_names_from_payload(&payload).ok_or_else(|| {
        anyhow!(
            "{}/list_tables did not return a list of table names: {payload}",
            client.base_url()
        )
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    base_url: Option<String>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    list_tables: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        base_url: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        list_tables: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--base-url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--base-url requires a URL"))?;
                options.base_url = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--list" => {
                options.list_tables = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("tablekeep: terminal admin panel for a remote table service");
    println!("  --config <path>          Use a specific config path");
    println!("  --base-url <url>         Override [server].base_url and TABLEKEEP_BASE_URL");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and reach /list_tables");
    println!("  --list                   Print table names and exit");
    println!("  --help                   Show this help");
}
