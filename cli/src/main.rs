//! docmodel CLI - document model validation and reconstruction tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docmodel::{
    merge_with_options, order_with_options, section_with_options, JsonFormat, LoadOptions,
    MergeOptions, Node, OrderingOptions, Reconstruct, Resource, SectioningOptions,
};

#[derive(Parser)]
#[command(name = "docmodel")]
#[command(version)]
#[command(about = "Validate, reorder, resection and merge document model JSON", long_about = None)]
struct Cli {
    /// Keep block labels outside the known vocabulary instead of rejecting them
    #[arg(long, global = true)]
    permissive: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a file holds a valid Block, Section or Resource
    Validate {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show document information
    Info {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Sort blocks and sections into reading order
    Order {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        out: OutputArgs,

        /// Column band width used to group blocks into columns
        #[arg(long, default_value_t = docmodel::reconstruct::DEFAULT_COLUMN_BAND)]
        column_band: f64,

        /// Only sort blocks within sections, keep section order
        #[arg(long)]
        keep_section_order: bool,
    },

    /// Regroup blocks into sections at title blocks
    Section {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        out: OutputArgs,

        /// Fail on unrecognized labels instead of moving them to other_blocks
        #[arg(long)]
        reject_unknown: bool,
    },

    /// Order then resection (or the reverse with --section-first)
    #[command(alias = "rc")]
    Reconstruct {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        out: OutputArgs,

        /// Resection before ordering
        #[arg(long)]
        section_first: bool,
    },

    /// Merge resources; earlier files win on metadata
    Merge {
        /// Input JSON files, in precedence order
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        out: OutputArgs,

        /// Fail when files disagree on a metadata field
        #[arg(long)]
        no_overwrite: bool,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

impl OutputArgs {
    fn format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }

    fn emit(&self, resource: &Resource) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref path) = self.output {
            resource.save_file(path, self.format())?;
            eprintln!("{} {}", "Saved to".green(), path.display());
        } else {
            println!("{}", resource.to_json(self.format())?);
        }
        Ok(())
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let load = if cli.permissive {
        LoadOptions::new().permissive()
    } else {
        LoadOptions::new()
    };

    let result = match cli.command {
        Commands::Validate { input } => cmd_validate(&input, &load),
        Commands::Info { input } => cmd_info(&input, &load),
        Commands::Order {
            input,
            out,
            column_band,
            keep_section_order,
        } => cmd_order(&input, &out, &load, column_band, keep_section_order),
        Commands::Section {
            input,
            out,
            reject_unknown,
        } => cmd_section(&input, &out, &load, reject_unknown),
        Commands::Reconstruct {
            input,
            out,
            section_first,
        } => cmd_reconstruct(&input, &out, &load, section_first),
        Commands::Merge {
            inputs,
            out,
            no_overwrite,
        } => cmd_merge(&inputs, &out, &load, no_overwrite),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_validate(input: &Path, load: &LoadOptions) -> Result<(), Box<dyn std::error::Error>> {
    let node = Node::load_file(input, load)?;
    println!(
        "{} {} is a valid {}",
        "OK".green().bold(),
        input.display(),
        node.kind()
    );
    Ok(())
}

fn cmd_info(input: &Path, load: &LoadOptions) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Resource::load_file(input, load)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(filetype) = doc.filetype {
        println!("{}: {}", "Format".bold(), filetype);
    }
    if let Some(ref source) = doc.source {
        println!("{}: {}", "Source".bold(), source);
    }
    if let Some(ref created) = doc.date_created {
        println!("{}: {}", "Created".bold(), created);
    }

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let titled = doc.sections.iter().filter(|s| s.title.is_some()).count();
    println!("{}: {}", "Sections".bold(), doc.section_count());
    println!("{}: {}", "Titled sections".bold(), titled);
    println!("{}: {}", "Other blocks".bold(), doc.other_blocks.len());
    println!("{}: {}", "Blocks".bold(), doc.block_count());

    for (label, count) in doc.label_counts() {
        println!("  {} {}: {}", "├─".dimmed(), label, count);
    }

    let words = doc.plain_text().split_whitespace().count();
    println!("{}: {}", "Words".bold(), words);

    Ok(())
}

fn cmd_order(
    input: &Path,
    out: &OutputArgs,
    load: &LoadOptions,
    column_band: f64,
    keep_section_order: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Resource::load_file(input, load)?;
    let options = OrderingOptions::new()
        .with_column_band(column_band)
        .sort_sections(!keep_section_order);
    out.emit(&order_with_options(&doc, &options))
}

fn cmd_section(
    input: &Path,
    out: &OutputArgs,
    load: &LoadOptions,
    reject_unknown: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Resource::load_file(input, load)?;
    let mut options = SectioningOptions::new();
    if reject_unknown {
        options = options.reject_unknown();
    }
    let sectioned = section_with_options(&doc, &options)?;
    log::info!(
        "{} sections before, {} after",
        doc.section_count(),
        sectioned.section_count()
    );
    out.emit(&sectioned)
}

fn cmd_reconstruct(
    input: &Path,
    out: &OutputArgs,
    load: &LoadOptions,
    section_first: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Resource::load_file(input, load)?;
    let pipeline = if section_first {
        Reconstruct::new().section().order()
    } else {
        Reconstruct::standard()
    };
    out.emit(&pipeline.apply(&doc)?)
}

fn cmd_merge(
    inputs: &[PathBuf],
    out: &OutputArgs,
    load: &LoadOptions,
    no_overwrite: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut resources = Vec::with_capacity(inputs.len());
    for path in inputs {
        pb.set_message(path.display().to_string());
        let doc = Resource::load_file(path, load)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        resources.push(doc);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let options = MergeOptions::new().with_overwrite(!no_overwrite);
    let merged = merge_with_options(&resources, &options)?;
    eprintln!(
        "{} {} files into {} sections",
        "Merged".green(),
        inputs.len(),
        merged.section_count()
    );
    out.emit(&merged)
}

fn cmd_version() {
    println!("{} {}", "docmodel".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document model reconstruction tool");
    println!();
    println!("License: MIT");
}
