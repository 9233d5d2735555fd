//! numsift command-line interface.
//!
//! ```text
//! numsift extract numbers.csv --format json
//! numsift filter numbers.csv --pattern mirror --sum 43 --format csv -o matches.csv
//! numsift request numbers.csv --pincode 560001 --mobile 9123456789
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use numsift::patterns::{PatternKind, SpecialKind};
use numsift::request::SEARCH_ENDPOINT;
use numsift::{
    CancellationToken, ExtractionResult, FilterConfig, FilterOutcome, FilterResult, NumsiftConfig, SearchCategory,
    SearchRequest,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExtractFormat {
    /// One number per line
    Text,
    /// JSON array of numbers
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FilterFormat {
    /// Summary and the first matches
    Text,
    /// Number,Digit Sum,Single Digit Sum
    Csv,
    /// JSON array of rows with digit sums
    Json,
}

#[derive(Parser)]
#[command(name = "numsift")]
#[command(version, about = "Extract and filter 10-digit numbers from large delimited files", long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Source and sizing options shared by every subcommand.
#[derive(Debug, clap::Args)]
struct SourceArgs {
    /// Delimited text file to scan
    path: PathBuf,

    /// Configuration file (.toml, .yaml, .yml or .json); numsift.toml is discovered otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bytes read per chunk
    #[arg(long)]
    chunk_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every 10-digit number from a file
    Extract {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(short, long, value_enum, default_value = "text")]
        format: ExtractFormat,
    },

    /// Extract numbers and keep those that pass every selected filter
    Filter {
        #[command(flatten)]
        source: SourceArgs,

        /// Keep numbers containing this substring
        #[arg(short, long)]
        search: Option<String>,

        /// Digit pattern: mirror, repeating, sequential, ending, penta, hexa, tetra
        #[arg(short, long)]
        pattern: Option<PatternKind>,

        /// Suffix for the ending pattern (implies --pattern ending, conflicts with any other pattern)
        #[arg(long)]
        ending: Option<String>,

        /// Required digit sum
        #[arg(long)]
        sum: Option<String>,

        /// Compare the single-digit reduction of the digit sum
        #[arg(long)]
        single_digit: bool,

        /// Special type: fancy, xy, rising, falling
        #[arg(long)]
        special: Option<SpecialKind>,

        /// Digits that must all appear (comma-separated)
        #[arg(long, value_delimiter = ',')]
        lucky: Vec<char>,

        /// Digits that must not appear (comma-separated)
        #[arg(long, value_delimiter = ',')]
        unlucky: Vec<char>,

        /// Numbers evaluated per batch
        #[arg(short, long)]
        batch_size: Option<usize>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: FilterFormat,

        /// Write the export here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the search request payload for the numbers in a file
    Request {
        #[command(flatten)]
        source: SourceArgs,

        /// 6-digit pincode
        #[arg(long)]
        pincode: String,

        /// Contact mobile number
        #[arg(long)]
        mobile: String,

        /// postpaid-free, postpaid-paid, prepaid-free or prepaid-paid
        #[arg(long, default_value = "postpaid-free")]
        category: SearchCategory,
    },
}

/// Selection flags of `numsift filter`, applied on top of the loaded config.
#[derive(Debug, Default)]
struct FilterOverrides {
    search: Option<String>,
    pattern: Option<PatternKind>,
    ending: Option<String>,
    sum: Option<String>,
    single_digit: bool,
    special: Option<SpecialKind>,
    lucky: Vec<char>,
    unlucky: Vec<char>,
}

impl FilterOverrides {
    fn apply(self, mut filter: FilterConfig) -> Result<FilterConfig> {
        if let (Some(pattern), Some(_)) = (self.pattern, &self.ending)
            && pattern != PatternKind::Ending
        {
            bail!("--ending only applies to the ending pattern, not --pattern {}", pattern.id());
        }
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }
        if let Some(pattern) = self.pattern {
            filter = filter.with_pattern(pattern);
        }
        if let Some(ending) = self.ending {
            filter = filter.with_ending(ending);
        }
        if let Some(sum) = self.sum {
            filter = filter.with_target_sum(sum, self.single_digit);
        } else if self.single_digit {
            filter.single_digit_sum = true;
        }
        if let Some(special) = self.special {
            filter = filter.with_special(special);
        }
        if !self.lucky.is_empty() || !self.unlucky.is_empty() {
            filter = filter
                .with_preferences(self.lucky, self.unlucky)
                .context("Invalid --lucky/--unlucky digit")?;
        }
        Ok(filter)
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "numsift=debug" } else { "numsift=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(source: &SourceArgs) -> Result<NumsiftConfig> {
    let mut config = match &source.config {
        Some(path) => NumsiftConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => NumsiftConfig::discover()?.unwrap_or_default(),
    };

    if let Some(chunk_size) = source.chunk_size {
        config.chunk_size = chunk_size;
    }
    Ok(config)
}

async fn extract(source: &SourceArgs, config: &NumsiftConfig) -> Result<ExtractionResult> {
    if !numsift::core::io::has_csv_extension(&source.path) {
        tracing::warn!(path = %source.path.display(), "Input is not a .csv file, scanning it as delimited text");
    }
    numsift::extract_file(&source.path, config, &CancellationToken::new())
        .await
        .with_context(|| format!("Failed to extract numbers from {}", source.path.display()))
}

fn request_target(request: &SearchRequest) -> String {
    format!("POST {} ({} numbers)", SEARCH_ENDPOINT, request.nums_array.len())
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn print_filter_result(result: &FilterResult, format: FilterFormat, output: Option<&Path>) -> Result<()> {
    for issue in &result.issues {
        eprintln!("warning: {}", issue);
    }

    if result.is_empty() {
        eprintln!("{}", result.summary());
        return Ok(());
    }

    let mut writer = open_output(output)?;
    match format {
        FilterFormat::Csv => numsift::write_csv(&mut writer, &result.export_rows())?,
        FilterFormat::Json => numsift::write_json(&mut writer, &result.export_rows())?,
        FilterFormat::Text => {
            writeln!(writer, "{}", result.summary())?;
            for token in result.preview() {
                writeln!(writer, "{}", token)?;
            }
            if result.len() > result.preview().len() {
                writeln!(
                    writer,
                    "Showing {} of {} results. Use --format csv to export all numbers.",
                    result.preview().len(),
                    result.len()
                )?;
            }
            writer.flush()?;
        }
    }

    if let Some(path) = output {
        eprintln!("Wrote {} numbers to {}", result.len(), path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract { source, format } => {
            let config = load_config(&source)?;
            let result = extract(&source, &config).await?;

            let mut writer = open_output(None)?;
            match format {
                ExtractFormat::Text => {
                    for token in &result.tokens {
                        writeln!(writer, "{}", token)?;
                    }
                }
                ExtractFormat::Json => {
                    serde_json::to_writer_pretty(&mut writer, &result.tokens)?;
                    writeln!(writer)?;
                }
            }
            writer.flush()?;
            Ok(())
        }

        Commands::Filter {
            source,
            search,
            pattern,
            ending,
            sum,
            single_digit,
            special,
            lucky,
            unlucky,
            batch_size,
            format,
            output,
        } => {
            let mut config = load_config(&source)?;
            if let Some(batch_size) = batch_size {
                config.batch_size = batch_size;
            }
            let overrides = FilterOverrides {
                search,
                pattern,
                ending,
                sum,
                single_digit,
                special,
                lucky,
                unlucky,
            };
            config.filter = overrides.apply(config.filter)?;
            config.validate()?;

            let extracted = extract(&source, &config).await?;
            let outcome = numsift::run_filter(
                &extracted.tokens,
                &config.filter,
                config.batch_size,
                &CancellationToken::new(),
                |progress| eprint!("\rFiltering... {:>3}%", progress.percent),
            )
            .await?;

            match outcome {
                FilterOutcome::NoTokens => {
                    eprintln!("No numbers found in {}", source.path.display());
                    Ok(())
                }
                FilterOutcome::Completed(result) => {
                    eprintln!();
                    print_filter_result(&result, format, output.as_deref())
                }
            }
        }

        Commands::Request {
            source,
            pincode,
            mobile,
            category,
        } => {
            let config = load_config(&source)?;
            let extracted = extract(&source, &config).await?;

            let request = SearchRequest::new(pincode, mobile, extracted.tokens, category)?;
            eprintln!("{}", request_target(&request));
            println!("{}", request.to_json()?);
            Ok(())
        }
    }
}
