//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "clustermap-render",
    version,
    about = "Render a cluster topology file to a PNG diagram"
)]
pub struct Args {
    /// Topology file (JSON)
    pub config: PathBuf,

    /// Output PNG path [default: <name>.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory part images are resolved against [default: next to the config]
    #[arg(long)]
    pub image_dir: Option<PathBuf>,

    /// TTF/OTF font for node labels
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Render only the first node instead of the whole cluster
    #[arg(long)]
    pub node_only: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Where the diagram goes.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{name}.png")))
    }
}
