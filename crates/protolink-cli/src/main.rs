//! Protolink CLI
//!
//! Loads a compiler plugin request (or a bare descriptor set), links it into a
//! model, and prints what a generator would see:
//! - `inspect`: the linked model as an indented tree, or as JSON
//! - `packages`: packages of the files marked for generation

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use protolink_descriptor::{parse_descriptor_set_json, parse_request_json, CodeGeneratorRequest};
use protolink_model::{Model, ModelConfig};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod inspect;

#[derive(Parser)]
#[command(name = "protolink")]
#[command(
    author,
    version,
    about = "Protolink: cross-linked model of protobuf plugin requests"
)]
struct Cli {
    /// Log verbosity on stderr (`-v` info, `-vv` debug, `-vvv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the linked model.
    Inspect {
        #[command(flatten)]
        input: InputArgs,
        /// Emit JSON instead of a tree.
        #[arg(long)]
        json: bool,
        /// Only files marked for generation.
        #[arg(long)]
        generated_only: bool,
        /// Only visible declarations.
        #[arg(long)]
        visible_only: bool,
    },

    /// List the distinct packages of the files marked for generation.
    Packages {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Request JSON (`CodeGeneratorRequest`), or `-` for stdin.
    input: PathBuf,
    /// Read the input as a `FileDescriptorSet` instead of a request.
    #[arg(long)]
    descriptor_set: bool,
    /// With `--descriptor-set`: a file name to mark for generation (repeatable).
    #[arg(long = "generate", requires = "descriptor_set")]
    generate: Vec<String>,
    /// Model configuration JSON (extension names, enum deprecation rule).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect {
            input,
            json,
            generated_only,
            visible_only,
        } => {
            let model = load_model(&input)?;
            let filter = inspect::Filter {
                generated_only,
                visible_only,
            };
            if json {
                let summary = inspect::summarize(&model, filter);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", inspect::render_tree(&model, filter));
            }
        }
        Commands::Packages { input } => {
            let model = load_model(&input)?;
            let packages = model.packages_to_generate();
            if packages.is_empty() {
                eprintln!("{} no files marked for generation", "info:".yellow().bold());
            }
            for package in packages {
                println!("{package}");
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read request from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_request(args: &InputArgs) -> Result<CodeGeneratorRequest> {
    let text = read_input(&args.input)?;
    if args.descriptor_set {
        let set = parse_descriptor_set_json(&text)
            .with_context(|| format!("invalid descriptor set {}", args.input.display()))?;
        Ok(CodeGeneratorRequest::from_descriptor_set(set, args.generate.clone()))
    } else {
        parse_request_json(&text)
            .with_context(|| format!("invalid request {}", args.input.display()))
    }
}

fn load_model(args: &InputArgs) -> Result<Model> {
    let config = match &args.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };
    let request = load_request(args)?;
    tracing::info!(
        files = request.proto_file.len(),
        to_generate = request.file_to_generate.len(),
        "loaded request"
    );
    Model::from_request(&request, config).context("failed to link request")
}
