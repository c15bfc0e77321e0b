use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::browser::{Browser, Event};
use crate::cli::args::CliArgs;
use crate::cli::interactive::{self, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::filter::{Facet, FacetOptions, QueryState};
use crate::logging::LogConfig;
use crate::pager::DEFAULT_PAGE_SIZE;
use crate::render::{self, DetailView, OutputFormat, PageRender};
use crate::store::{self, CatalogSource, LoadError, PackStore};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] config::ConfigError),

    #[error("failed to build runtime: {source}")]
    Runtime {
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no pack with id '{id}'")]
    UnknownPack { id: String },

    #[error("failed to write output file {path}: {source}")]
    OutputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {source}")]
    Stdout {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read command: {source}")]
    Input {
        #[source]
        source: std::io::Error,
    },
}

fn print_banner() {
    eprintln!(
        "{} {} - {}",
        "packbrowser".bold().cyan(),
        env!("CARGO_PKG_VERSION"),
        "texture pack catalog browser".white()
    );
    eprintln!();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: CatalogSource,
    timeout: Duration,
    page_size: usize,
    page: usize,
    query: QueryState,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
    force_color: bool,
    info: Option<String>,
    interactive: bool,
    list_facets: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, AppError> {
    validation::validate(&args).map_err(AppError::Usage)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let source_raw = args
        .source
        .or(cfg.source)
        .unwrap_or_else(|| store::DEFAULT_SOURCE.to_string());
    let source = CatalogSource::parse(&source_raw);

    let timeout = Duration::from_secs(args.timeout.or(cfg.timeout).unwrap_or(10));

    let page_size = args.page_size.or(cfg.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err(AppError::Config(
            "invalid page_size in config, expected positive integer".to_string(),
        ));
    }

    let query = QueryState {
        free_text: args.query.unwrap_or_default(),
        resolution: Facet::parse(&args.resolution.or(cfg.resolution).unwrap_or_default()),
        pack_type: Facet::parse(&args.pack_type.or(cfg.pack_type).unwrap_or_default()),
        featured: Facet::parse(&args.featured.or(cfg.featured).unwrap_or_default()),
    };

    let output = args
        .output
        .or(cfg.output)
        .filter(|p| !p.trim().is_empty())
        .map(|p| config::expand_tilde(&p).to_string_lossy().into_owned());
    let output_format = match args.format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw).ok_or_else(|| {
            AppError::Config(format!(
                "invalid output_format '{raw}', expected text, json or html"
            ))
        })?,
        None => output
            .as_deref()
            .and_then(render::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        source,
        timeout,
        page_size,
        page: args.page.unwrap_or(1),
        query,
        output,
        output_format,
        no_color,
        force_color: args.color,
        info: args.info.filter(|id| !id.trim().is_empty()),
        interactive: args.interactive,
        list_facets: args.list_facets,
    })
}

// Colour settings from the config file apply to diagnostics too.
fn log_config(verbose: u8, run: &RunConfig, stderr_tty: bool) -> LogConfig {
    LogConfig::from_verbosity(verbose).with_ansi(!run.no_color && (run.force_color || stderr_tty))
}

fn load_spinner() -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn load_store(run: &RunConfig) -> Result<PackStore, LoadError> {
    let pb = load_spinner();
    pb.set_message(format!("loading {}", run.source.location()));
    let result = store::load(&run.source, run.timeout).await;
    pb.finish_and_clear();
    result
}

fn open_browser(store: PackStore, run: &RunConfig) -> Browser {
    let mut browser = Browser::with_query(store, run.query.clone(), run.page_size);
    if run.page > 1 {
        browser.handle(Event::GoToPage(run.page));
    }
    browser
}

fn render_current(browser: &Browser, format: OutputFormat) -> Vec<u8> {
    let page = browser.current_page();
    render::render_page(&PageRender::from_page(&page), format)
}

fn render_facets(options: &FacetOptions, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Json => render::render_json(options),
        _ => {
            let mut out = String::new();
            out.push_str(&format!(
                "{} {}\n",
                "resolutions:".bold(),
                options.resolutions.join(", ")
            ));
            out.push_str(&format!("{} {}\n", "types:".bold(), options.types.join(", ")));
            out.into_bytes()
        }
    }
}

async fn emit(run: &RunConfig, rendered: &[u8]) -> Result<(), AppError> {
    match run.output.as_deref() {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .map_err(|e| AppError::OutputFile {
                    path: path.to_string(),
                    source: e,
                })?;
            tracing::info!(path, bytes = rendered.len(), "view written");
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered)
                .and_then(|_| stdout.flush())
                .map_err(|e| AppError::Stdout { source: e })
        }
    }
}

pub async fn run_interactive<R, W>(
    browser: &mut Browser,
    reader: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let write = |out: &mut W, bytes: &[u8]| -> Result<(), AppError> {
        out.write_all(bytes)
            .and_then(|_| out.flush())
            .map_err(|e| AppError::Stdout { source: e })
    };

    write(out, &render_current(browser, format))?;
    let mut lines = reader.lines();
    loop {
        write(out, b"> ")?;
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(AppError::Input { source: e }),
        };
        let command = match interactive::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                write(out, format!("{message}\n").as_bytes())?;
                continue;
            }
        };
        match command {
            Command::Event(event) => {
                browser.handle(event);
                write(out, &render_current(browser, format))?;
            }
            Command::Info(id) => match browser.detail(&id) {
                Some(pack) => {
                    write(out, &render::render_detail(&DetailView::from_pack(pack), format))?
                }
                None => write(out, format!("no pack with id '{id}'\n").as_bytes())?,
            },
            Command::Facets => write(out, &render_facets(&browser.facet_options(), format))?,
            Command::Show => write(out, &render_current(browser, format))?,
            Command::Help => write(out, format!("{}\n", interactive::HELP).as_bytes())?,
            Command::Quit => break,
        }
    }
    write(out, b"\n")?;
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), AppError> {
    if run.force_color {
        colored::control::set_override(true);
    } else if run.no_color {
        colored::control::set_override(false);
    }

    if std::io::stderr().is_terminal() {
        print_banner();
        format_kv_line("Source", run.source.location());
        format_kv_line("Page size", &run.page_size.to_string());
        eprintln!();
    }

    let store = match load_store(&run).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "catalog load failed");
            let page = PageRender::message_only(e.user_message());
            let rendered = match run.output_format {
                OutputFormat::Html => render::html::render_page(&page),
                OutputFormat::Json => render::render_json(&page),
                OutputFormat::Text => render::render_text(&page),
            };
            if !run.interactive {
                emit(&run, &rendered).await?;
                return Err(AppError::Load(e));
            }
            std::io::stdout()
                .write_all(&rendered)
                .map_err(|e| AppError::Stdout { source: e })?;
            PackStore::default()
        }
    };

    if run.list_facets {
        let options = FacetOptions::collect(store.packs());
        return emit(&run, &render_facets(&options, run.output_format)).await;
    }

    if let Some(id) = run.info.as_deref() {
        let pack = store.find_by_id(id).ok_or_else(|| AppError::UnknownPack {
            id: id.to_string(),
        })?;
        let rendered = render::render_detail(&DetailView::from_pack(pack), run.output_format);
        return emit(&run, &rendered).await;
    }

    let mut browser = open_browser(store, &run);
    let summary = browser.summary();
    tracing::info!(
        matched = summary.matched,
        total = summary.total,
        page = summary.page,
        "session ready"
    );

    if run.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        return run_interactive(&mut browser, stdin, &mut stdout, run.output_format).await;
    }

    emit(&run, &render_current(&browser, run.output_format)).await
}

pub fn run_cli() -> Result<(), AppError> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", CliArgs::command().render_long_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(AppError::Usage(e.to_string())),
        },
    };

    let default_path = config::default_config_path();
    if args.init_config {
        let path = args
            .config
            .as_deref()
            .map(config::expand_tilde)
            .or(default_path)
            .ok_or_else(|| AppError::Config("could not determine home directory".to_string()))?;
        if config::write_default_config(&path)? {
            println!("config written: {}", path.display());
        } else {
            println!("config exists: {}", path.display());
        }
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false),
        None => match default_path.as_ref() {
            Some(path) => config::load_config(path, true),
            None => Ok(ConfigFile::default()),
        },
    }?;

    let verbose = args.verbose;
    let run = build_run_config(args, cfg)?;
    let logging = log_config(verbose, &run, std::io::stderr().is_terminal());
    crate::logging::init_logging(&logging).map_err(AppError::Config)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Runtime { source: e })?;

    rt.block_on(run_async(run))
}
