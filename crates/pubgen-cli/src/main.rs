use std::io::{IsTerminal, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pubgen_bib::{BibSelection, postprocess};
use pubgen_core::{
    InspireClient, RecordSource, RetryPolicy, fetch_bibtex_with_retry, fetch_records_with_retry,
    generate_pubstex, load_from_path,
};

mod output;

use output::ColorMode;

const CONFIG_ENV: &str = "PUBGEN_CONFIG";
const DEFAULT_OUTPUT_BIBTEX: &str = "../_bibliography/papers.bib";
const BIBTEX_PREVIEW_CHARS: usize = 3000;

/// Generate a CV publication list (pubs.tex) and website bibliography
/// (papers.bib) from INSPIRE-HEP
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the YAML or TOML config file [env: PUBGEN_CONFIG]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print output instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Only generate papers.bib
    #[arg(long, conflicts_with = "pubstex_only")]
    bibtex_only: bool,

    /// Only generate pubs.tex
    #[arg(long)]
    pubstex_only: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn wants_pubstex(&self) -> bool {
        !self.bibtex_only
    }

    fn wants_bibtex(&self) -> bool {
        !self.pubstex_only
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        error!(error = %err, "run failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Resolve configuration path: CLI flag > env var
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .context("no config file given; pass --config or set PUBGEN_CONFIG")?;

    let source = InspireClient::from_env().context("failed to build INSPIRE client")?;
    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());
    let mut stdout = std::io::stdout().lock();

    generate(
        &cli,
        &config_path,
        &source,
        &RetryPolicy::default(),
        &mut stdout,
        color,
    )
    .await
}

async fn generate(
    cli: &Cli,
    config_path: &Path,
    source: &dyn RecordSource,
    policy: &RetryPolicy,
    w: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let config = load_from_path(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    let query = config
        .author_query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .context("config has no author_query")?;
    let config_dir = config_dir(config_path)?;

    // Every fetch happens before anything is written.
    let records = if cli.wants_pubstex() {
        output::print_phase(w, "Fetching papers from INSPIRE JSON API...", color)?;
        let records = fetch_records_with_retry(source, query, policy)
            .await
            .with_context(|| format!("failed to fetch papers from {}", source.name()))?;
        output::print_fetched_papers(w, records.len())?;
        Some(records)
    } else {
        None
    };

    let raw_bibtex = if cli.wants_bibtex() {
        output::print_phase(w, "Fetching BibTeX from INSPIRE...", color)?;
        let raw = fetch_bibtex_with_retry(source, query, policy)
            .await
            .with_context(|| format!("failed to fetch BibTeX from {}", source.name()))?;
        output::print_fetched_bibtex(w, raw.len())?;
        Some(raw)
    } else {
        None
    };

    if let Some(records) = records {
        let pubstex = generate_pubstex(&records, &config);
        if cli.dry_run {
            output::print_preview(w, "pubs.tex", &pubstex, color)?;
        } else {
            let targets = [&config.output_pubstex, &config.output_pubstex_ci];
            for path in targets.into_iter().flatten().filter(|p| !p.is_empty()) {
                let out = resolve_output(&config_dir, path);
                write_output(&out, &pubstex)?;
                output::print_wrote(w, &out, color)?;
            }
        }
    }

    if let Some(raw) = raw_bibtex {
        let selection = BibSelection {
            excluded: &config.exclude,
            selected: &config.selected_papers,
        };
        let (bibtex, summary) = postprocess(&raw, &selection);
        output::print_bib_summary(w, &summary, color)?;

        if cli.dry_run {
            output::print_preview(
                w,
                &format!("papers.bib (first {BIBTEX_PREVIEW_CHARS} chars)"),
                output::truncate_chars(&bibtex, BIBTEX_PREVIEW_CHARS),
                color,
            )?;
        } else {
            let path = config
                .output_bibtex
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_OUTPUT_BIBTEX);
            let out = resolve_output(&config_dir, path);
            write_output(&out, &bibtex)?;
            output::print_wrote(w, &out, color)?;
        }
    }

    output::print_phase(w, "Done.", color)?;
    Ok(())
}

/// Absolute directory containing the config file.
fn config_dir(config_path: &Path) -> anyhow::Result<PathBuf> {
    let absolute = std::path::absolute(config_path)
        .with_context(|| format!("cannot resolve {}", config_path.display()))?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default())
}

/// `path` relative to `base`, with `.` and `..` folded away.
fn resolve_output(base: &Path, path: &str) -> PathBuf {
    let joined = base.join(path);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Write `contents` to `path`, creating missing parent directories.
fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
