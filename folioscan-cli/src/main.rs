use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use folioscan_export::{OutputFormat, default_file_name, render, write_csv_file};
use folioscan_ingest::{ParseOptions, StatementParser, source_for_path, statement_lines};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod batch;
mod config;
mod state;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FOLIOSCAN_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "folioscan",
    version,
    long_version = LONG_VERSION,
    about = "Extract mutual fund transactions from consolidated account statements"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statements and write the combined transaction list
    Convert {
        /// Statement files (.pdf with the `pdf` feature, otherwise extracted text)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// csv, json, dicts or table (default: config output.format)
        #[arg(long)]
        format: Option<String>,

        /// Output file. CSV defaults to a timestamped file in output.directory,
        /// the other formats to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Statement password (default: env var named by pdf.password_env)
        #[arg(long)]
        password: Option<String>,

        /// Reject transaction lines seen before both headers
        #[arg(long)]
        strict: bool,
    },

    /// Show how each line of a statement is classified
    Inspect {
        input: PathBuf,

        #[arg(long)]
        password: Option<String>,
    },

    /// Write a default ~/.folioscan/config.toml
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            inputs,
            format,
            output,
            password,
            strict,
        } => convert(inputs, format, output, password, strict).await?,

        Command::Inspect { input, password } => inspect(input, password)?,

        Command::InitConfig => config::init_config()?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_password(flag: Option<String>, cfg: &config::Config) -> Option<String> {
    flag.or_else(|| std::env::var(&cfg.pdf.password_env).ok())
}

async fn convert(
    inputs: Vec<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    password: Option<String>,
    strict: bool,
) -> Result<()> {
    let cfg = config::load_config()?;

    // Reject the format before touching any document.
    let format: OutputFormat = format.as_deref().unwrap_or(cfg.output.format.as_str()).parse()?;

    let options = ParseOptions {
        strict_context: strict || cfg.parser.strict_context,
    };
    let parser = Arc::new(StatementParser::new(options)?);
    let password = resolve_password(password, &cfg);

    let total = inputs.len();
    let outcomes = batch::parse_documents(parser, inputs, password).await;

    let mut records = Vec::new();
    let mut failed = 0usize;
    for outcome in outcomes {
        match outcome.result {
            Ok(parsed) => {
                if parsed.has_issues() {
                    warn!(
                        document = %outcome.path.display(),
                        skipped = parsed.issues.len(),
                        "some transaction lines were skipped"
                    );
                }
                records.extend(parsed.into_records());
            }
            Err(_) => failed += 1,
        }
    }

    match format {
        OutputFormat::Csv => {
            let path = match output {
                Some(p) => p,
                None => cfg
                    .output
                    .directory
                    .join(default_file_name(format, chrono::Local::now().naive_local())),
            };
            write_csv_file(&records, &path).with_context(|| format!("write {}", path.display()))?;
            println!("CSV file \"{}\" created successfully.", path.display());
        }
        _ => {
            let rendered = render(&records, format)?;
            match output {
                Some(p) => std::fs::write(&p, rendered + "\n")
                    .with_context(|| format!("write {}", p.display()))?,
                None => println!("{rendered}"),
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} documents could not be parsed");
    }
    Ok(())
}

fn inspect(input: PathBuf, password: Option<String>) -> Result<()> {
    let cfg = config::load_config()?;
    let password = resolve_password(password, &cfg);
    let source = source_for_path(&input, password)?;
    let text = source.extract_text()?;

    let parser = StatementParser::new(ParseOptions::default())?;
    for (i, line) in statement_lines(&text).iter().enumerate() {
        let label = parser
            .classifier()
            .classify(line)
            .map(|shape| shape.tag().label())
            .unwrap_or("-");
        println!("{:>5}  {:<10}  {}", i + 1, label, line);
    }
    Ok(())
}
