use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hn_app::{AppResult, Store};
use hn_inp::{FILE_EXTENSION, FormatSchema, kind_keyword};

#[derive(Parser)]
#[command(name = "hn-cli")]
#[command(about = "Hydronet CLI - hydraulic transient network tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file's structure and references
    Validate {
        /// Path to the project file (.json or .yaml)
        project_path: PathBuf,
    },
    /// Show the elements of a project file
    Show {
        /// Path to the project file (.json or .yaml)
        project_path: PathBuf,
    },
    /// Export a project file to an INP solver deck
    Export {
        /// Path to the project file (.json or .yaml)
        project_path: PathBuf,
        /// Output .inp path (defaults to the project path with .inp)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import an INP deck into a project file
    Import {
        /// Path to the .inp file
        inp_path: PathBuf,
        /// Output project path (defaults to the inp path with .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Show { project_path } => cmd_show(&project_path),
        Commands::Export {
            project_path,
            output,
        } => cmd_export(&project_path, output.as_deref()),
        Commands::Import { inp_path, output } => cmd_import(&inp_path, output.as_deref()),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let mut store = Store::new();
    store.load_project(project_path)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_show(project_path: &Path) -> AppResult<()> {
    let mut store = Store::new();
    store.load_project(project_path)?;
    let network = store.network();

    println!("Project: {}", store.project_name());
    println!(
        "  {} nodes, {} conduits, {} output requests",
        network.nodes().len(),
        network.edges().len(),
        network.output_requests().len()
    );

    println!("\nNodes:");
    for node in network.nodes() {
        println!(
            "  {} [{}] seq={} ({} params)",
            node.id,
            kind_keyword(node.kind),
            node.sequence,
            node.params.len()
        );
    }

    println!("\nConduits:");
    for edge in network.edges() {
        println!("  {} {} -> {}", edge.id, edge.source, edge.target);
    }

    let params = network.computational_params();
    println!(
        "\nControls: dtcomp={} dtout={} tmax={}",
        params.dtcomp, params.dtout, params.tmax
    );

    Ok(())
}

fn cmd_export(project_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let mut store = Store::new();
    store.load_project(project_path)?;

    let text = store.export_inp(&FormatSchema::whamo())?;
    let out_path = match output {
        Some(path) => path.to_path_buf(),
        None => project_path.with_extension(FILE_EXTENSION),
    };
    std::fs::write(&out_path, text)?;
    println!("✓ Exported INP deck to {}", out_path.display());
    Ok(())
}

fn cmd_import(inp_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let text = std::fs::read_to_string(inp_path)?;
    let project_name = inp_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("network")
        .to_string();

    let mut store = Store::new();
    let warnings = store.import_inp(&text, project_name)?;

    for warning in &warnings {
        println!(
            "  warning: line {} [{}]: {}",
            warning.line, warning.keyword, warning.reason
        );
    }

    let out_path = match output {
        Some(path) => path.to_path_buf(),
        None => inp_path.with_extension("json"),
    };
    store.save_project(&out_path)?;
    println!(
        "✓ Imported {} nodes, {} conduits to {} ({} warnings)",
        store.network().nodes().len(),
        store.network().edges().len(),
        out_path.display(),
        warnings.len()
    );
    Ok(())
}
