//! Doclabel: region labeling for document pages.
//!
//! Doclabel keeps labeled rectangles (titles, headings, body text) per page
//! of a folder of documents, stores them in JSON sidecar files next to a
//! workspace, and exports the labeled pages as COCO or YOLO object-detection
//! datasets.
//!
//! # Modules
//!
//! - [`ir`]: Annotation types, geometry, label catalog and file formats
//! - [`document`]: Rendering and text collaborators, plus the PDF backend
//! - [`store`]: Per-document annotation store with sidecar persistence
//! - [`edit`]: Pointer-driven box editing state machine
//! - [`detect`]: Font-size heading detector
//! - [`text`]: Text reconstruction inside a rectangle
//! - [`session`]: The open document and its view state
//! - [`export`]: COCO/YOLO dataset export
//! - [`error`]: Error types for doclabel operations

pub mod config;
pub mod detect;
pub mod document;
pub mod edit;
pub mod error;
pub mod export;
pub mod ir;
pub mod session;
pub mod store;
pub mod text;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::warn;

pub use config::Workspace;
pub use error::DoclabelError;

use detect::{HeadingDetector, HeadingThresholds};
use document::{default_opener, list_documents, Document, TextSource};
use export::{ExportFormat, ExportOptions, ImageFormatKind};
use ir::io_sidecar::read_sidecar;
use ir::LabelCatalog;
use store::AnnotationStore;

/// The doclabel CLI application.
#[derive(Parser)]
#[command(name = "doclabel")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding annotation sidecar files.
    #[arg(
        long,
        global = true,
        env = "DOCLABEL_ANNOTATIONS_DIR",
        default_value = config::DEFAULT_ANNOTATIONS_DIR
    )]
    annotations_dir: PathBuf,

    /// Directory exports are written to.
    #[arg(
        long,
        global = true,
        env = "DOCLABEL_EXPORT_DIR",
        default_value = config::DEFAULT_EXPORT_DIR
    )]
    export_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the documents of a folder with their annotation counts.
    List(ListArgs),
    /// Print the annotations stored for one document.
    Show(ShowArgs),
    /// Detect headings from font sizes and add them to the sidecar.
    Detect(DetectArgs),
    /// Fill in the text of every annotation of a document.
    Extract(ExtractArgs),
    /// Render a folder of documents into a COCO and/or YOLO dataset.
    Export(ExportArgs),
}

#[derive(clap::Args)]
struct ListArgs {
    /// Folder containing PDF documents.
    folder: PathBuf,
}

#[derive(clap::Args)]
struct ShowArgs {
    /// Document whose sidecar to print.
    document: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct DetectArgs {
    /// Document to scan.
    document: PathBuf,

    /// One-based page to scan (all pages when omitted).
    #[arg(long)]
    page: Option<usize>,
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Document whose annotations get their text backfilled.
    document: PathBuf,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Folder containing PDF documents.
    folder: PathBuf,

    /// Dataset format ('coco', 'yolo', or 'all').
    #[arg(long, default_value = "all")]
    format: String,

    /// Page image format ('jpg' or 'png').
    #[arg(long, default_value = "jpg")]
    image_format: String,

    /// Output format for the summary ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the doclabel CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), DoclabelError> {
    let cli = Cli::parse();
    let workspace = Workspace::new(cli.annotations_dir, cli.export_dir);

    match cli.command {
        Some(Commands::List(args)) => run_list(&workspace, args),
        Some(Commands::Show(args)) => run_show(&workspace, args),
        Some(Commands::Detect(args)) => run_detect(&workspace, args),
        Some(Commands::Extract(args)) => run_extract(&workspace, args),
        Some(Commands::Export(args)) => run_export(&workspace, args),
        None => {
            println!("doclabel {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Label document regions and export them as detection datasets.");
            println!();
            println!("Run 'doclabel --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the list subcommand.
fn run_list(workspace: &Workspace, args: ListArgs) -> Result<(), DoclabelError> {
    let documents = list_documents(&args.folder)?;
    for document in &documents {
        let annotations = read_sidecar(&workspace.sidecar_for(document))?;
        println!("{}\t{}", file_name(document), annotations.len());
    }
    Ok(())
}

/// Execute the show subcommand.
fn run_show(workspace: &Workspace, args: ShowArgs) -> Result<(), DoclabelError> {
    let sidecar = workspace.sidecar_for(&args.document);
    let annotations = read_sidecar(&sidecar)?;

    match args.output.as_str() {
        "json" => {
            let json = ir::io_sidecar::to_sidecar_string(&annotations).map_err(|source| {
                DoclabelError::SidecarWrite {
                    path: sidecar.clone(),
                    source,
                }
            })?;
            println!("{}", json);
        }
        "text" => {
            println!("{}: {} annotation(s)", file_name(&args.document), annotations.len());
            for ann in &annotations {
                let b = ann.bbox.normalized();
                println!(
                    "  page {:>3}  {:<5}  [{:.1}, {:.1}, {:.1}, {:.1}]  {}",
                    ann.page + 1,
                    ann.label.name(),
                    b.xmin(),
                    b.ymin(),
                    b.xmax(),
                    b.ymax(),
                    ann.text.replace('\n', " ")
                );
            }
        }
        other => {
            return Err(DoclabelError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }
    Ok(())
}

/// Execute the detect subcommand.
fn run_detect(workspace: &Workspace, args: DetectArgs) -> Result<(), DoclabelError> {
    let catalog = LabelCatalog::standard();
    let detector = HeadingDetector::new(&catalog, HeadingThresholds::default())?;
    let document = default_opener().open(&args.document)?;
    let sidecar = workspace.sidecar_for(&args.document);
    let mut store = AnnotationStore::load(&sidecar)?;

    let pages = match args.page {
        Some(0) => {
            return Err(DoclabelError::PageOutOfRange {
                page: 0,
                page_count: document.page_count(),
            })
        }
        Some(page) => {
            document.check_page(page - 1)?;
            vec![page - 1]
        }
        None => (0..document.page_count()).collect(),
    };

    let mut added = 0;
    for page in pages {
        let found = detector.detect(page, &document.spans(page)?);
        added += found.len();
        store.extend(found);
    }

    store.save(&sidecar, document.as_ref())?;
    println!(
        "{}: {} heading(s) detected, {} annotation(s) total",
        file_name(&args.document),
        added,
        store.len()
    );
    Ok(())
}

/// Execute the extract subcommand.
fn run_extract(workspace: &Workspace, args: ExtractArgs) -> Result<(), DoclabelError> {
    let document = default_opener().open(&args.document)?;
    let sidecar = workspace.sidecar_for(&args.document);
    let mut store = AnnotationStore::load(&sidecar)?;

    store.save(&sidecar, document.as_ref())?;
    let with_text = store.iter().filter(|a| !a.text.is_empty()).count();
    println!(
        "{}: text filled for {}/{} annotation(s)",
        file_name(&args.document),
        with_text,
        store.len()
    );
    Ok(())
}

/// Execute the export subcommand.
fn run_export(workspace: &Workspace, args: ExportArgs) -> Result<(), DoclabelError> {
    let options = ExportOptions {
        format: args.format.parse::<ExportFormat>()?,
        image_format: args.image_format.parse::<ImageFormatKind>()?,
    };
    if !matches!(args.output.as_str(), "text" | "json") {
        return Err(DoclabelError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            args.output
        )));
    }

    let documents = list_documents(&args.folder)?;
    let catalog = LabelCatalog::standard();
    let summary = export::run_export(
        &documents,
        default_opener().as_ref(),
        workspace,
        &catalog,
        &options,
    )?;

    if args.output == "json" {
        let json = serde_json::to_string_pretty(&summary).map_err(|source| {
            DoclabelError::CocoJsonWrite {
                path: workspace.export_dir.clone(),
                source,
            }
        })?;
        println!("{}", json);
    } else {
        println!("Exported to {}:", workspace.export_dir.display());
        print!("{}", summary);
    }
    if summary.warning_count() > 0 {
        warn!("export finished with {} warning(s)", summary.warning_count());
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
