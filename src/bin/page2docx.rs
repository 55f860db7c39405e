use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use page2docx::{run_batch, HttpFetcher, JobStatus, Options};

/// Convert web pages into Word documents.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// URLs to convert.
    urls: Vec<String>,

    /// File with one URL per line (blank lines are skipped).
    #[arg(long)]
    urls_file: Option<PathBuf>,

    /// Class name of the content region (default: whole body).
    #[arg(long)]
    selector: Option<String>,

    /// Comma-separated selectors to remove (`#id`, `.class` or a bare name).
    #[arg(long)]
    skip: Option<String>,

    /// Project name; documents go into a subdirectory of the output root.
    #[arg(long)]
    project: Option<String>,

    /// Output root directory.
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Fetch timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Keep bold, italic and line breaks inside paragraphs.
    #[arg(long)]
    inline_formatting: bool,

    /// Print the batch report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            content_selector: self.selector.clone(),
            skip_selectors: self.skip.clone(),
            project: self.project.clone(),
            output_root: self.output.clone(),
            timeout_secs: self.timeout,
            inline_formatting: self.inline_formatting,
            ..Options::default()
        }
    }

    fn collect_urls(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let mut urls = self.urls.clone();
        if let Some(path) = &self.urls_file {
            let contents = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            urls.extend(contents.lines().map(ToString::to_string));
        }
        Ok(urls)
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = args.options();
    let urls = args.collect_urls()?;

    let fetcher = HttpFetcher::new(&options)?;
    let report = run_batch(&urls, &fetcher, &options)?;

    let now = chrono::Local::now().naive_local();
    if let Some(log) = report.summary.write_error_log(&report.output_dir, &options, now)? {
        info!(path = %log.display(), "error log written");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for result in &report.results {
            let tag = match result.status {
                JobStatus::Success => "ok",
                JobStatus::Warning => "skip",
                JobStatus::Error => "fail",
            };
            match &result.output_path {
                Some(path) => println!("[{tag}] {} -> {}", result.url, path.display()),
                None => println!("[{tag}] {}: {}", result.url, result.message),
            }
        }
        println!("{}", report.summary.message());
    }

    Ok(if report.summary.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
