use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};
use pdf_imposer::{
    CancelToken, ConversionOptions, ConversionType, ImposeError, PaperFormat,
    calculate_statistics, convert_file, default_output_path, load_pdf,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-imposer",
    about = "Convert PDF documents to and from booklets, or put several pages on each sheet",
    version
)]
#[command(group(ArgGroup::new("mode").args(["booklet", "linearize", "no_reorganisation"])))]
struct Cli {
    /// Input PDF file
    #[arg(required_unless_present_any = ["list_formats", "config"])]
    input: Option<PathBuf>,

    /// Output PDF file (default: <input>-conv.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Convert a linear document into a booklet (default)
    #[arg(short, long)]
    booklet: bool,

    /// Convert a booklet back into a linear document
    #[arg(short, long)]
    linearize: bool,

    /// Put several pages on each sheet without reordering them
    #[arg(short = 'n', long)]
    no_reorganisation: bool,

    /// Repeat each page to fill the sheet instead of placing distinct pages
    #[arg(short, long)]
    copy_pages: bool,

    /// Pages per sheet, as WxH
    #[arg(short, long, value_name = "WxH")]
    pages_per_sheet: Option<String>,

    /// Output paper format; append R for landscape (e.g. A4R)
    #[arg(short, long, value_name = "NAME")]
    format: Option<String>,

    /// Do not overwrite the output file if it exists
    #[arg(short, long)]
    keep: bool,

    /// Load options from a JSON file; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save the resulting options to a JSON file
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// List the known paper formats and exit
    #[arg(long)]
    list_formats: bool,
}

impl Cli {
    fn conversion_type(&self) -> Option<ConversionType> {
        if self.linearize {
            Some(ConversionType::Linearize)
        } else if self.no_reorganisation {
            Some(ConversionType::Reduce)
        } else if self.booklet {
            Some(ConversionType::Bookletize)
        } else {
            None
        }
    }

    /// Merge the command-line flags over `options`
    fn apply_to(&self, options: &mut ConversionOptions) {
        if let Some(input) = &self.input {
            options.input_file = Some(input.clone());
        }
        if let Some(output) = &self.output {
            options.output_file = Some(output.clone());
        }
        if let Some(conversion_type) = self.conversion_type() {
            options.conversion_type = conversion_type;
        }
        if let Some(layout) = &self.pages_per_sheet {
            options.layout = layout.clone();
        }
        if let Some(format) = &self.format {
            options.paper_format = format.clone();
        }
        if self.copy_pages {
            options.copy_pages = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("{:?}", cli);

    if cli.list_formats {
        for name in PaperFormat::names() {
            let format = PaperFormat::lookup(name)?;
            println!("{:<8} {} x {} pt", name, format.width_pt, format.height_pt);
        }
        return Ok(());
    }

    let mut options = match &cli.config {
        Some(path) => ConversionOptions::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConversionOptions::default(),
    };
    cli.apply_to(&mut options);

    let config = options.validate()?;

    if let Some(path) = &cli.save_config {
        options.save(path).await?;
        println!("Saved options → {}", path.display());
    }

    let Some(input) = options.input_file.clone() else {
        bail!("No input file specified");
    };
    let output = options
        .output_file
        .clone()
        .unwrap_or_else(|| default_output_path(&input));

    if cli.stats_only {
        let page_count = load_pdf(&input).await?.get_pages().len();
        let stats = calculate_statistics(page_count, &config);
        println!("Conversion Statistics:");
        println!("  Source pages: {}", stats.source_pages);
        println!("  Pages per sheet: {}", stats.pages_per_sheet);
        println!("  Sequence length: {}", stats.sequence_len);
        println!("  Output pages: {}", stats.output_pages);
        println!("  Blank slots: {}", stats.blank_slots);
        return Ok(());
    }

    if cli.keep && output.exists() {
        bail!(
            "{} already exists; remove --keep to overwrite it",
            output.display()
        );
    }
    options.output_file = Some(output.clone());

    let cancel = CancelToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling conversion");
            ctrl_c.cancel();
        }
    });

    let progress = |message: &str, fraction: f32| {
        println!("{:3.0}%: {}", fraction * 100.0, message);
    };

    match convert_file(&options, progress, cancel).await {
        Ok(summary) => {
            println!(
                "Converted {} pages into {} → {}",
                summary.source_pages,
                summary.output_pages,
                output.display()
            );
            Ok(())
        }
        Err(ImposeError::Cancelled) => bail!("Conversion cancelled"),
        Err(e) => Err(e.into()),
    }
}
