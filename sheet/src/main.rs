use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use grid_core::SheetConfig;
use sheet_core::{DEFAULT_EXPORT_DPI, ExportFormat};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: sheet <config.json> <output.(png|pdf|svg)> [dpi]";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }
    let input = &args[1];
    let output = Path::new(&args[2]);
    let dpi = match args.get(3) {
        Some(s) => parse_dpi(s)?,
        None => DEFAULT_EXPORT_DPI,
    };
    let Some(format) = ExportFormat::from_path(output) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let txt = fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    let config = SheetConfig::from_json(&txt).with_context(|| format!("parsing {input}"))?;
    if config.draw_area_at(dpi).is_degenerate() {
        warn!("margins leave no drawable area; exporting a blank page");
    }

    let bytes = sheet_core::export(&config, format, dpi)
        .with_context(|| format!("exporting {}", output.display()))?;
    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    let (w, h) = config.page_px(dpi);
    info!(
        path = %output.display(),
        width = w,
        height = h,
        bytes = bytes.len(),
        "sheet written"
    );
    Ok(())
}

fn parse_dpi(s: &str) -> anyhow::Result<f64> {
    let dpi: f64 = s.parse().with_context(|| format!("dpi {s:?} is not a number"))?;
    if !(dpi.is_finite() && dpi > 0.0) {
        bail!("dpi must be greater than zero, got {dpi}");
    }
    Ok(dpi)
}
