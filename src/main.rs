//! `sheetsearch` — search the music sheet library and render hits as list items.
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use reqwest::Url;
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod page;
mod render;
mod search;
mod sink;

use config::Config;
use page::{Outcome, SearchPage};
use render::Template;
use search::{CannedSearchService, FormFields, HttpSearchService, ResultRecord, SearchService};
use sink::{FileSink, StderrNotifier, StdoutSink};

#[derive(Parser)]
#[command(name = "sheetsearch", about = "Search the music sheet library")]
struct Cli {
    /// Config file [default: $SHEETSEARCH_CONFIG, then $XDG_CONFIG_HOME/sheetsearch/config.toml]
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run one search and print the rendered results
    Search {
        #[command(flatten)]
        form: SearchForm,
        /// Answer from the canned response instead of the service
        #[arg(long)]
        offline: bool,
        /// Canned response JSON file (implies --offline)
        #[arg(long, value_name = "FILE")]
        canned: Option<PathBuf>,
        /// Write the results to FILE instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Enclose the written results in <ul id="sheets_list">
        #[arg(long, requires = "output")]
        wrap: bool,
    },

    /// Print the compiled template, optionally rendering one record
    Template {
        /// Result record as a JSON object
        #[arg(long, value_name = "JSON")]
        record: Option<String>,
    },
}

/// The five search fields.
#[derive(Args, Debug, Default)]
struct SearchForm {
    #[arg(long, default_value_t)]
    title: String,
    #[arg(long, default_value_t)]
    composer: String,
    #[arg(long, default_value_t)]
    arranger: String,
    /// Earliest date added (DD-MM-YYYY)
    #[arg(long, default_value_t)]
    date_added_min: String,
    /// Latest date added (DD-MM-YYYY)
    #[arg(long, default_value_t)]
    date_added_max: String,
}

impl FormFields for SearchForm {
    fn value(&self, field: &str) -> String {
        match field {
            "title" => self.title.as_str(),
            "composer" => self.composer.as_str(),
            "arranger" => self.arranger.as_str(),
            "date_added_min" => self.date_added_min.as_str(),
            "date_added_max" => self.date_added_max.as_str(),
            _ => "",
        }
        .to_owned()
    }
}

/// Everything built once at startup and shared by reference afterwards.
struct App {
    config: Config,
    template: Template,
}

impl App {
    fn init(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => config::default_path().context("locate config")?,
        };
        debug!(path = %path.display(), "Loading config");

        let config = Config::load(&path).context("load config")?;
        let template = render::load(&config.template).context("load template")?;
        Ok(Self { config, template })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sheetsearch=warn")),
        )
        .init();

    let cli = Cli::parse();
    let app = App::init(cli.config)?;

    match cli.cmd {
        Cmd::Search {
            form,
            offline,
            canned,
            output,
            wrap,
        } => {
            match select_backend(&app.config, offline, canned)? {
                Backend::Canned(file) => {
                    let svc =
                        file.map_or_else(CannedSearchService::default, CannedSearchService::File);
                    cmd_search(&app, &svc, &form, output, wrap).await
                }
                Backend::Http(endpoint) => {
                    let svc = HttpSearchService::new(endpoint);
                    cmd_search(&app, &svc, &form, output, wrap).await
                }
            }
        }

        Cmd::Template { record } => {
            cmd_template(&app.template, record.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Which service a `search` run talks to.
#[derive(Debug, PartialEq)]
enum Backend {
    /// Canned answer, from this file or the built-in sample.
    Canned(Option<PathBuf>),
    Http(Url),
}

/// Offline mode comes from `--offline`, `--canned` or `offline = true`.
/// The config's `canned` file only picks the answer once offline.
fn select_backend(config: &Config, offline: bool, canned: Option<PathBuf>) -> Result<Backend> {
    if offline || config.offline || canned.is_some() {
        return Ok(Backend::Canned(canned.or_else(|| config.canned.clone())));
    }

    let endpoint = Url::parse(&config.endpoint)
        .with_context(|| format!("parse endpoint {}", config.endpoint))?;
    Ok(Backend::Http(endpoint))
}

async fn cmd_search<S: SearchService>(
    app: &App,
    svc: &S,
    form: &SearchForm,
    output: Option<PathBuf>,
    wrap: bool,
) -> Result<ExitCode> {
    let page = SearchPage::new(&app.template);
    let mut notifier = StderrNotifier;

    let outcome = match output {
        Some(path) => {
            let mut sink = FileSink::new(path, wrap);
            let outcome = page.submit(svc, form, &mut sink, &mut notifier).await?;
            // A failed search leaves the previous file in place.
            if matches!(outcome, Outcome::Rendered(_)) {
                let dest = sink.path().display().to_string();
                sink.commit().with_context(|| format!("write {dest}"))?;
            }
            outcome
        }
        None => {
            let mut out: StdoutSink = StdoutSink::default();
            page.submit(svc, form, &mut out, &mut notifier).await?
        }
    };

    Ok(match outcome {
        Outcome::Rendered(_) => ExitCode::SUCCESS,
        Outcome::Rejected(_) | Outcome::Failed => ExitCode::FAILURE,
    })
}

/// Dump the segment sequence, then the rendering of `record` if given.
fn cmd_template(template: &Template, record: Option<&str>) -> Result<()> {
    for (i, part) in template.parts().into_iter().enumerate() {
        if i % 2 == 0 {
            println!("{i:>3} literal     {part:?}");
        } else {
            println!("{i:>3} placeholder {part}");
        }
    }

    if let Some(raw) = record {
        let record: ResultRecord = serde_json::from_str(raw).context("parse --record")?;
        let missing = template.missing(&record);
        if !missing.is_empty() {
            warn!(?missing, "Record has no value for some placeholders");
        }
        println!("{}", template.render(&record));
    }

    Ok(())
}
