//! clustermap-render - draw a cluster topology file as a PNG.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use clustermap::topology::{self, BuildOptions, TopologyConfig};
use clustermap::{ImageCache, LabelFont, raster};
use std::sync::Arc;

use crate::cli::Args;
use crate::logging::setup_logging;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let mut config = TopologyConfig::load(&args.config)
        .with_context(|| format!("Failed to load topology {}", args.config.display()))?;
    if let Some(dir) = &args.image_dir {
        config.image_dir = Some(dir.clone());
    }

    let mut options = BuildOptions::from_config(&config).context("Failed to prepare build")?;
    if let Some(font) = &args.font {
        let font = LabelFont::open(font, clustermap::label::DEFAULT_LABEL_PX)
            .with_context(|| format!("Failed to load font {}", font.display()))?;
        options.label = Some(Arc::new(font));
    }

    tracing::info!(
        name = %config.name,
        nodes = config.node_count(),
        node_only = args.node_only,
        "Rendering topology"
    );

    let mut cache = ImageCache::new();
    let image = if args.node_only {
        let node = topology::build_first_node(&mut cache, &config, &options)?
            .context("Topology has no nodes")?;
        node.render()?
    } else {
        topology::build_cluster(&mut cache, &config, &options)?.render()?
    };

    let output = args.output_path(&config.name);
    raster::save_png(&image, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}
