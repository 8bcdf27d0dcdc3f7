use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use docdata_core::config::{self, GroupingConfig};
use docdata_core::parse;
use docdata_core::parse::document::SwaggerDoc;
use docdata_core::transform::build_collections;

const PLACEHOLDER: &str = "*This is a place holder*";

#[derive(Parser)]
#[command(
    name = "docdata",
    about = "Render a Swagger 2.0 spec into documentation site data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the documentation data payload from a spec
    Generate {
        /// Path to the swagger spec (YAML or JSON)
        #[arg(short, long, conflicts_with = "docs", requires = "output")]
        input: Option<PathBuf>,

        /// Path to write the JSON data payload
        #[arg(short, long, conflicts_with = "docs", requires = "input")]
        output: Option<PathBuf>,

        /// Docs root; spec, payload, and placeholder locations are derived
        /// from it
        #[arg(short, long)]
        docs: Option<PathBuf>,

        /// Grouping table override (YAML)
        #[arg(long)]
        groups: Option<PathBuf>,
    },

    /// Parse and build without writing anything
    Validate {
        /// Path to the swagger spec (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Grouping table override (YAML)
        #[arg(long)]
        groups: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            docs,
            groups,
        } => cmd_generate(input, output, docs, groups),

        Commands::Validate { input, groups } => cmd_validate(input, groups),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "docdata", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Resolved input/output locations for one run. In docs mode the
/// conventional spec, payload, and placeholder locations all hang off the
/// docs root.
struct Layout {
    input: PathBuf,
    output: PathBuf,
    resources: Option<PathBuf>,
}

fn layout(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    docs: Option<PathBuf>,
) -> Result<Layout> {
    if let Some(root) = docs {
        return Ok(Layout {
            input: root.join("assets/swagger/swagger.yaml"),
            output: root.join("_data/api.json"),
            resources: Some(root.join("_resources")),
        });
    }
    match (input, output) {
        (Some(input), Some(output)) => Ok(Layout {
            input,
            output,
            resources: None,
        }),
        _ => bail!("either --docs or both --input and --output are required"),
    }
}

fn load_doc(path: &Path) -> Result<SwaggerDoc> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let doc = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(doc)
}

/// Load the grouping table. A missing override file falls back to the
/// built-in defaults, the same as passing no `--groups` at all.
fn load_grouping(groups: Option<PathBuf>) -> Result<GroupingConfig> {
    match groups {
        Some(path) => Ok(config::load_grouping(&path)
            .map_err(|e| anyhow::anyhow!(e))?
            .unwrap_or_default()),
        None => Ok(GroupingConfig::default()),
    }
}

/// Ensure one placeholder content file per mapped collection. Existing
/// files are left alone.
fn bootstrap_placeholders(dir: &Path, grouping: &GroupingConfig) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    for collection in grouping.collections.keys() {
        let path = dir.join(format!("{}.md", collection.replace(' ', "_")));
        if path.exists() {
            continue;
        }
        fs::write(&path, PLACEHOLDER)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  created {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    docs: Option<PathBuf>,
    groups: Option<PathBuf>,
) -> Result<()> {
    let layout = layout(input, output, docs)?;
    let grouping = load_grouping(groups)?;
    let doc = load_doc(&layout.input)?;
    log::info!("loaded {} from {}", doc.info.title, layout.input.display());

    // The whole payload is built before anything touches the filesystem, so
    // a failed build leaves no partial output behind.
    let collections = build_collections(&doc, &grouping)?;
    let payload = serde_json::to_string_pretty(&collections)?;

    if let Some(parent) = layout.output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&layout.output, payload)
        .with_context(|| format!("failed to write {}", layout.output.display()))?;
    eprintln!(
        "wrote {} collections to {}",
        collections.len(),
        layout.output.display()
    );

    if let Some(resources) = &layout.resources {
        bootstrap_placeholders(resources, &grouping)?;
    }
    Ok(())
}

fn cmd_validate(input: PathBuf, groups: Option<PathBuf>) -> Result<()> {
    let grouping = load_grouping(groups)?;
    let doc = load_doc(&input)?;

    eprintln!("Valid swagger {} spec: {}", doc.swagger, doc.info.title);
    eprintln!("  Tags: {}", doc.tags.len());
    eprintln!("  Definitions: {}", doc.definitions.len());
    eprintln!("  Paths: {}", doc.paths.len());

    let collections = build_collections(&doc, &grouping)?;
    eprintln!("  Collections: {}", collections.len());

    eprintln!("Validation successful.");
    Ok(())
}
