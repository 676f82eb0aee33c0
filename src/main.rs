use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nesting_svg::{RenderOptions, Renderer, read_invalid_geometry, read_job, render_empty_canvas};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "nesting-svg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render nesting part geometry as SVG", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a part JSON document to SVG
    Convert {
        /// Part document, either a bare part or {"Part": .., "InvalidGeometry": ..}
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Invalid geometry curves to overlay, replacing any in the input
        #[arg(long)]
        invalid: Option<PathBuf>,

        /// Stroke width of the document
        #[arg(long, default_value = "1.0")]
        stroke_width: f64,

        /// Render without a spline evaluator; parts with splines fail
        #[arg(long)]
        no_splines: bool,
    },

    /// Write an empty SVG canvas
    Empty {
        width: u32,
        height: u32,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            invalid,
            stroke_width,
            no_splines,
        } => cmd_convert(
            &input,
            output.as_deref(),
            invalid.as_deref(),
            stroke_width,
            no_splines,
        ),
        Commands::Empty {
            width,
            height,
            output,
        } => write_output(output.as_deref(), &render_empty_canvas(width, height)),
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    invalid: Option<&Path>,
    stroke_width: f64,
    no_splines: bool,
) -> Result<()> {
    let mut job = read_job(input)
        .with_context(|| format!("Error reading part file '{}'", input.display()))?;

    if let Some(path) = invalid {
        let curves = read_invalid_geometry(path)
            .with_context(|| format!("Error reading invalid geometry file '{}'", path.display()))?;
        job.invalid_geometry = Some(curves);
    }

    let mut options = RenderOptions::default().with_stroke_width(stroke_width);
    if !no_splines {
        options = options.with_builtin_evaluator();
    }

    let svg = Renderer::new(options)
        .render_part(&job.part, job.invalid_geometry.as_deref())
        .with_context(|| format!("Error converting '{}'", input.display()))?;

    write_output(output, &svg)?;
    info!("Converted '{}'", input.display());
    Ok(())
}

fn write_output(output: Option<&Path>, svg: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, svg)
            .with_context(|| format!("Error writing output file '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}
