mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ort::execution_providers::CPUExecutionProvider;
use ort_classifier::artifact::ModelArtifact;
use ort_classifier::SkinToneClassifier;
use shade_common::catalog;
use shade_pipeline::capture::{FileSource, FrameSource};
use shade_pipeline::session::AnalysisSession;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to the face photo to analyze (.jpeg/.png).
    image: PathBuf,
    /// Model artifact directory holding model.json + model.onnx.
    #[arg(long, short, default_value = "_models/skin_tone")]
    model_dir: PathBuf,
    /// Product catalog JSON file (makeup feed export).
    #[arg(long, short, default_value = "data/makeup_products.json")]
    catalog: PathBuf,
    /// Result page to display.
    #[arg(long, short, default_value = "1")]
    page: usize,
    /// Also write the full analysis as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,trueshade=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    ort::init()
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .commit()?;

    let products = catalog::read_catalog(&args.catalog)
        .with_context(|| format!("loading catalog {:?}", args.catalog))?;
    log::info!("Catalog: {} products from {:?}", products.len(), args.catalog);

    let artifact = ModelArtifact::load(&args.model_dir)
        .with_context(|| format!("loading model artifact {:?}", args.model_dir))?;
    let session = AnalysisSession::new(products, move || SkinToneClassifier::load(&artifact));
    session.warm_up().context("classifier warmup")?;

    let mut source = FileSource::new(&args.image);
    let frame = source.next_frame()?;

    session.analyze(&frame)?;
    if args.page != 1 {
        session.go_to_page(args.page);
    }

    let result = session
        .result()
        .context("analysis finished without a result")?;

    println!("Skin tone: {} (class {})", result.palette.title, result.class_id);
    println!("{}", result.palette.description);
    println!("Palette: {}", result.palette.target_colors.join(" "));
    println!();

    if result.products.is_empty() {
        // Analysis worked; the catalog just has nothing close. Distinct from
        // an error.
        println!("No products in this catalog come close to this palette.");
    } else {
        let view = session.page_view().context("no page to display")?;
        println!(
            "{} matching products, page {} of {}:",
            result.products.len(),
            view.number,
            view.total_pages
        );
        for item in &view.items {
            println!("{}", report::render_product_line(item));
        }
        if view.total_pages > 1 {
            let buttons: Vec<String> = view
                .visible_numbers
                .iter()
                .map(|n| {
                    if *n == view.number {
                        format!("[{n}]")
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            println!();
            println!("Pages: {}", buttons.join(" "));
        }
    }

    if let Some(json_path) = &args.json {
        let analysis = report::AnalysisReport::new(&result);
        log::info!("Writing analysis json: {json_path:?}");
        analysis.export_json(json_path)?;
    }

    Ok(())
}
