use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use evacplan::config::Config;
use evacplan::export::{export_plan, write_export};
use evacplan::input::EditorSession;
use evacplan::project::{PdfSource, StoreOptions, load_project};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "evacplan")]
#[command(version, about = "Draw evacuation plans over floor-plan PDFs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a project's overlay to a PNG image
    Render {
        /// Project file
        project: PathBuf,

        /// Output PNG path
        #[arg(long, short = 'o', value_name = "FILE")]
        output: PathBuf,

        /// Image width in pixels (defaults to the export container width)
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels (defaults to the export container height)
        #[arg(long)]
        height: Option<u32>,
    },

    /// Stamp a project's symbols onto the first page of its floor-plan PDF
    Export {
        /// Project file
        project: PathBuf,

        /// Floor-plan PDF (defaults to the one referenced by the project)
        #[arg(long, value_name = "FILE")]
        pdf: Option<PathBuf>,

        /// Output PDF path (defaults to `<name>-evacuation-plan.pdf` next to the project)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print shape, symbol and wall counts
    Inspect {
        /// Project file
        project: PathBuf,
    },

    /// Write the default configuration file
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            project,
            output,
            width,
            height,
        } => render(&project, &output, width, height),
        Command::Export {
            project,
            pdf,
            output,
        } => export(&project, pdf, output),
        Command::Inspect { project } => inspect(&project),
        Command::InitConfig => {
            let path = Config::create_default_file()?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
    }
}

fn render(
    project_path: &Path,
    output: &Path,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<()> {
    let config = Config::load()?;
    let project = load_project(project_path, &StoreOptions::default())?;

    let width = width.unwrap_or(config.export.container_width.round() as u32);
    let height = height.unwrap_or(config.export.container_height.round() as u32);
    if width == 0 || height == 0 {
        bail!("image size {width}x{height} is empty");
    }

    let session = EditorSession::with_frame(config.editor_settings(), project.to_frame());
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)
        .context("Failed to create image surface")?;
    {
        let ctx = cairo::Context::new(&surface).context("Failed to create Cairo context")?;
        session.render(&ctx);
    }

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to write PNG to {}", output.display()))?;

    log::info!("Rendered '{}' to {}", project.name, output.display());
    println!("{}", output.display());
    Ok(())
}

fn export(project_path: &Path, pdf: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let project = load_project(project_path, &StoreOptions::default())?;

    let Some(pdf_path) = pdf.or_else(|| project.pdf.clone()) else {
        bail!(
            "project '{}' has no floor-plan PDF; pass one with --pdf",
            project.name
        );
    };
    let source = PdfSource::from_path(&pdf_path)?;

    let frame = project.to_frame();
    let bytes = export_plan(
        source.bytes(),
        &frame.symbols,
        config.export.container_width,
        config.export.container_height,
        &config.export_options(),
    )?;

    let output = output.unwrap_or_else(|| {
        project_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(project.export_file_name())
    });
    write_export(&output, &bytes)?;

    log::info!(
        "Exported '{}' ({} symbol(s)) to {}",
        project.name,
        frame.symbols.len(),
        output.display()
    );
    println!("{}", output.display());
    Ok(())
}

fn inspect(project_path: &Path) -> Result<()> {
    let project = load_project(project_path, &StoreOptions::default())?;
    let frame = project.to_frame();
    let walls = frame.walls().count();

    println!("Project: {}", project.name);
    if let Some(pdf) = &project.pdf {
        println!("PDF: {}", pdf.display());
    }
    println!("Shapes: {}", frame.shapes.len());
    println!("Symbols: {}", frame.symbols.len() - walls);
    println!("Walls: {walls}");
    Ok(())
}
