//! Segment a chart image and print what was found
//!
//! # Usage
//!
//! ```bash
//! camp chart.png --adjacency eight --dump labels.png --recognize -v
//! ```

use camp::io::{read_image, write_image};
use camp::recog::{
    FigureRecognitor, NoOcr, Pipeline, RecognizerRegistry, Segmentizer, TextRecognitor,
};
use camp::region::ConnectivityType;
use camp::PipelineConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Pixel neighbourhood used for the adjacency graph
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Adjacency {
    Four,
    Eight,
}

impl From<Adjacency> for ConnectivityType {
    fn from(a: Adjacency) -> Self {
        match a {
            Adjacency::Four => ConnectivityType::FourWay,
            Adjacency::Eight => ConnectivityType::EightWay,
        }
    }
}

#[derive(Parser)]
#[command(name = "camp")]
#[command(about = "Segment a chart image into same-color regions")]
struct Args {
    /// Input image
    input: PathBuf,

    /// JSON pipeline configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured adjacency
    #[arg(short, long, value_enum)]
    adjacency: Option<Adjacency>,

    /// Write the label map in pseudo-random colors to this file
    #[arg(short, long)]
    dump: Option<PathBuf>,

    /// Seed for the dump palette
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Also run text and figure recognition
    #[arg(short, long)]
    recognize: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(adjacency) = args.adjacency {
        config.segmentation.adjacency = adjacency.into();
    }

    let pix = read_image(&args.input)?;
    info!(
        path = %args.input.display(),
        width = pix.width(),
        height = pix.height(),
        "loaded image"
    );

    let mut pipeline = Pipeline::new().with_stage(Segmentizer::new(config.segmentation));
    if args.recognize {
        pipeline.push(TextRecognitor::new(NoOcr, config.text.clone())?);
        pipeline.push(FigureRecognitor::new(RecognizerRegistry::builtin()));
    }
    let store = pipeline.run(&pix)?;

    let seg = store.segmentation("camp")?;
    let background: Vec<String> = seg.background().iter().map(|id| id.to_string()).collect();
    println!("size:       {}x{}", seg.width(), seg.height());
    println!("colors:     {}", seg.ncolors());
    println!("segments:   {}", seg.len());
    println!("edges:      {}", seg.edges());
    println!("background: {}", background.join(" "));

    if args.recognize {
        let text = store.text("camp")?;
        println!("graphical:  {}", text.graphical.len());
        for entry in &text.text {
            println!("text {} {:?}: {:?}", entry.group.id(), entry.bounds, entry.text);
        }
        for figure in &store.figures("camp")?.figures {
            println!(
                "figure {} {:?} score={:.3}",
                figure.id, figure.kind, figure.score
            );
        }
    }

    if let Some(path) = &args.dump {
        let dump = seg.labels().render(args.seed)?;
        write_image(&dump, path)?;
        info!(path = %path.display(), "wrote label dump");
    }
    Ok(())
}
