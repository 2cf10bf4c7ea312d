//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::application::services::links_from_dsl_output;
use crate::application::ApplicationError;
use crate::cli::args::{AnalyzeFormat, Cli, Commands, ConfigCommands, ExtractKind, TargetArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{
    analyze, build_component_tree, extract_component_links, extract_navigations, extract_texts,
    extract_tokens, is_short_link, is_valid_url, parse_json, FileLocator, Target,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Marker for "read from stdin" in file arguments.
const STDIN_PATH: &str = "-";
const BANNER_WIDTH: usize = 60;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Dsl { target } => cmd_dsl(cli, target),
        Commands::Meta { target } => cmd_meta(cli, target),
        Commands::Docs {
            urls,
            from_dsl,
            json,
        } => cmd_docs(cli, urls, from_dsl.as_deref(), *json),
        Commands::ParseUrl { url } => cmd_parse_url(cli, url),
        Commands::Extract { what, file } => cmd_extract(cli, *what, file.as_deref()),
        Commands::Analyze {
            target,
            input,
            stdin,
            format,
        } => cmd_analyze(cli, target, input.as_deref(), *stdin, *format),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load()?.with_overrides(cli.token.clone(), cli.endpoint.clone()))
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?)?)
}

fn to_target(args: &TargetArgs) -> CliResult<Target> {
    match (&args.url, &args.file_id, &args.layer_id) {
        (Some(url), _, _) => Ok(Target::Url(url.clone())),
        (None, Some(file_id), Some(layer_id)) => {
            Ok(Target::Ids(FileLocator::new(file_id, layer_id)))
        }
        _ => Err(CliError::InvalidArgs(
            "provide a url, or both --file-id and --layer-id".to_string(),
        )),
    }
}

/// Read and parse a JSON document from a file, or stdin for `None` / `-`.
fn read_document(path: Option<&Path>) -> CliResult<Value> {
    let (source, text) = match path.filter(|p| p.as_os_str() != STDIN_PATH) {
        Some(p) => {
            let source = p.display().to_string();
            let text = std::fs::read_to_string(p)
                .map_err(|e| InfraError::io(format!("read {source}"), e))?;
            (source, text)
        }
        None => {
            let text = io::read_to_string(io::stdin())
                .map_err(|e| InfraError::io("read stdin", e))?;
            ("stdin".to_string(), text)
        }
    };
    debug!("read_document: {} bytes from {}", text.len(), source);

    parse_json(&text).map_err(|e| {
        ApplicationError::InvalidResponse {
            context: format!("parse JSON from {source}"),
            source: e,
        }
        .into()
    })
}

#[instrument(skip(cli))]
fn cmd_dsl(cli: &Cli, target: &TargetArgs) -> CliResult<()> {
    let target = to_target(target)?;
    let container = container(cli)?;
    let locator = container.resolver().resolve(&target)?;
    let response = container.dsl_service().fetch(&locator)?;
    output::json(&response, cli.pretty)?;
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_meta(cli: &Cli, target: &TargetArgs) -> CliResult<()> {
    let target = to_target(target)?;
    let container = container(cli)?;
    let locator = container.resolver().resolve(&target)?;
    let response = container.meta_service().fetch(&locator)?;
    output::json(&response, cli.pretty)?;
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_docs(cli: &Cli, urls: &[String], from_dsl: Option<&Path>, as_json: bool) -> CliResult<()> {
    let mut urls = urls.to_vec();
    if let Some(path) = from_dsl {
        urls.extend(links_from_dsl_output(&read_document(Some(path))?));
    }
    if urls.is_empty() {
        return Err(CliError::Usage(
            "no URLs provided; pass URLs or --from-dsl".to_string(),
        ));
    }

    let report = container(cli)?.docs_service().fetch_all(&urls);
    let errors = report.errors();
    for err in &errors {
        output::warning(err);
    }
    if report.is_total_failure() {
        return Err(ApplicationError::DocsUnavailable {
            failed: errors.len(),
        }
        .into());
    }

    if as_json {
        output::json(&report.to_json(), cli.pretty)?;
        return Ok(());
    }

    let banner = "=".repeat(BANNER_WIDTH);
    for fetch in &report.fetches {
        output::header(&banner);
        output::header(&format!("URL: {}", fetch.url));
        output::header(&banner);
        match &fetch.outcome {
            Ok(content) if !content.is_empty() => output::info(content),
            _ => output::info("[FETCH FAILED]"),
        }
        output::info("");
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_parse_url(cli: &Cli, url: &str) -> CliResult<()> {
    let locator = container(cli)?
        .resolver()
        .resolve(&Target::Url(url.to_string()))?;
    let report = json!({
        "fileId": locator.file_id,
        "layerId": locator.layer_id,
        "shortLink": is_short_link(url),
        "valid": is_valid_url(url),
    });
    output::json(&report, cli.pretty)?;
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_extract(cli: &Cli, what: ExtractKind, file: Option<&Path>) -> CliResult<()> {
    let dsl = read_document(file)?;
    match what {
        ExtractKind::Links => output::json(&extract_component_links(&dsl), cli.pretty)?,
        ExtractKind::Navigations => output::json(&extract_navigations(&dsl), cli.pretty)?,
        ExtractKind::Texts => output::json(&extract_texts(&dsl), cli.pretty)?,
        ExtractKind::Tokens => output::json(&extract_tokens(&dsl), cli.pretty)?,
        ExtractKind::Tree => output::json(&build_component_tree(&dsl), cli.pretty)?,
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_analyze(
    cli: &Cli,
    target: &TargetArgs,
    input: Option<&Path>,
    stdin: bool,
    format: AnalyzeFormat,
) -> CliResult<()> {
    let dsl = if stdin || input.is_some() {
        read_document(input)?
    } else if !target.is_empty() {
        let target = to_target(target)?;
        let container = container(cli)?;
        let locator = container.resolver().resolve(&target)?;
        container.dsl_service().fetch(&locator)?.dsl
    } else {
        return Err(CliError::InvalidArgs(
            "provide a url, --file-id/--layer-id, --input or --stdin".to_string(),
        ));
    };

    let analysis = analyze(&dsl);
    match format {
        AnalyzeFormat::Tree => output::info(&analysis.render_tree()),
        AnalyzeFormat::Json => output::json(&analysis, cli.pretty)?,
        AnalyzeFormat::Flat => output::info(&analysis.render_flat()),
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&load_settings(cli)?.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let path = global_config_path().ok_or_else(|| ApplicationError::Config {
                message: "cannot determine the user config directory".to_string(),
            })?;
            output::info(&path.display());
        }
    }
    Ok(())
}
