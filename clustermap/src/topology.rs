//! Cluster topology files and the diagrams built from them.
//!
//! A topology file describes node types (GPU, CPU and RAM image groups) and
//! how many of each make up the cluster. Builders turn it into an object
//! tree: component groups become image grids, a node frames its GPUs next to
//! its CPUs and memory, and the cluster is a grid of nodes.
//!
//! ```json
//! {
//!   "name": "mila",
//!   "cluster": {
//!     "grid": [1, 2],
//!     "size": [1200, 2000],
//!     "nodes": [
//!       { "count": 2, "node": {
//!         "size": [1200, 1000],
//!         "gpus": { "image": "v100.png", "count": 4, "grid": [1, 4], "size": [600, 1000] },
//!         "cpus": { "image": "cpu.png", "count": 2, "grid": [1, 2], "size": [400, 1000], "rotate": 90 },
//!         "ram":  { "image": "ram.png", "count": 16, "grid": [2, 8], "size": [800, 1000] }
//!       } }
//!     ]
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::image_cache::ImageCache;
use crate::label::{DEFAULT_LABEL_PX, LabelFont};
use crate::layout::{GridLayout, HAlign, VAlign};
use crate::object::{BoundingBox, Composite, ImageKind, ImageObject, Object};
use crate::primitives::{GridShape, Padding, Size};

/// Proportional padding used between nodes and around node parts.
pub const DEFAULT_PADDING: f64 = 0.05;

fn default_padding() -> f64 {
    DEFAULT_PADDING
}

fn default_count() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopologyConfig {
    pub name: String,
    /// Directory relative image paths are resolved against.
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default)]
    pub label_font: Option<PathBuf>,
    pub cluster: ClusterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    pub grid: GridShape,
    pub size: Size,
    pub nodes: Vec<NodeGroup>,
}

/// `count` identical nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeGroup {
    #[serde(default = "default_count")]
    pub count: usize,
    pub node: NodeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Label drawn on the node frame; nodes are numbered when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub size: Size,
    pub gpus: ComponentGroup,
    pub cpus: ComponentGroup,
    pub ram: ComponentGroup,
}

/// A grid of identical parts drawn from one image.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentGroup {
    pub image: PathBuf,
    pub count: usize,
    pub grid: GridShape,
    pub size: Size,
    /// Extra counter-clockwise rotation in degrees.
    #[serde(default)]
    pub rotate: i32,
    /// Proportional grid padding; the grid default when absent.
    #[serde(default)]
    pub padding: Option<f64>,
    #[serde(default)]
    pub halign: HAlign,
    #[serde(default)]
    pub valign: VAlign,
}

impl TopologyConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a topology file. Without an explicit `image_dir`, images are
    /// looked up next to the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_json(&std::fs::read_to_string(path)?)?;
        if config.image_dir.is_none() {
            config.image_dir = path.parent().map(Path::to_path_buf);
        }
        tracing::debug!(
            path = %path.display(),
            name = %config.name,
            node_types = config.cluster.nodes.len(),
            "loaded topology"
        );
        Ok(config)
    }

    /// Total number of nodes across all groups.
    pub fn node_count(&self) -> usize {
        self.cluster.nodes.iter().map(|g| g.count).sum()
    }
}

/// Settings shared by every builder.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub image_dir: PathBuf,
    pub padding: f64,
    pub label: Option<Arc<LabelFont>>,
}

impl BuildOptions {
    /// Options from a config, loading its label font if one is named.
    pub fn from_config(config: &TopologyConfig) -> Result<Self> {
        let image_dir = config.image_dir.clone().unwrap_or_default();
        let label = match &config.label_font {
            Some(path) => {
                let path = if path.is_relative() { image_dir.join(path) } else { path.clone() };
                Some(Arc::new(LabelFont::open(path, DEFAULT_LABEL_PX)?))
            }
            None => None,
        };
        Ok(Self {
            image_dir,
            padding: config.padding,
            label,
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() { self.image_dir.join(path) } else { path.to_path_buf() }
    }
}

/// `group.count` images of one kind in a grid.
pub fn build_component_group(
    cache: &mut ImageCache,
    name: &str,
    kind: ImageKind,
    group: &ComponentGroup,
    options: &BuildOptions,
) -> Result<Composite> {
    let path = options.resolve(&group.image);
    let mut objects = Vec::with_capacity(group.count);
    for i in 0..group.count {
        let mut part = ImageObject::open(cache, format!("{}{i}", kind.as_str()), &path, kind)?;
        if group.rotate != 0 {
            part = part.rotated(group.rotate)?;
        }
        objects.push(part.into());
    }

    let mut layout = GridLayout::new(group.grid, group.size)?
        .with_halign(group.halign)
        .with_valign(group.valign);
    if let Some(padding) = group.padding {
        layout = layout.with_padding(Padding::all(padding));
    }
    Composite::new(name, layout, objects)
}

/// One framed node: GPUs on the left, CPUs and memory side by side on the
/// right, the whole fitted to `node.size`.
pub fn build_node(
    cache: &mut ImageCache,
    name: &str,
    node: &NodeConfig,
    options: &BuildOptions,
) -> Result<Object> {
    let padding = Padding::all(options.padding);
    let gpus = build_component_group(cache, "gpus", ImageKind::Gpu, &node.gpus, options)?;
    let cpus = build_component_group(cache, "cpus", ImageKind::Cpu, &node.cpus, options)?;
    let ram = build_component_group(cache, "ram", ImageKind::Ram, &node.ram, options)?;

    let side_size = Size::new(
        cpus.size().width + ram.size().width,
        cpus.size().height.max(ram.size().height),
    );
    let side = Composite::new(
        "cpu_and_ram",
        GridLayout::new((2, 1), side_size)?.with_padding(padding),
        vec![cpus.into(), ram.into()],
    )?;
    let body = Composite::new(
        "node",
        GridLayout::new((2, 1), node.size)?.with_padding(padding),
        vec![gpus.into(), side.into()],
    )?;

    let mut frame = BoundingBox::new(name, body).with_padding(padding.scaled_to(node.size));
    if let Some(font) = &options.label {
        frame = frame.with_label(Arc::clone(font));
    }
    frame.set_size(node.size)?;
    tracing::debug!(name, size = %node.size, "built node");
    Ok(frame.into())
}

/// Every node of the cluster in one grid.
pub fn build_cluster(
    cache: &mut ImageCache,
    config: &TopologyConfig,
    options: &BuildOptions,
) -> Result<Composite> {
    let mut nodes = Vec::with_capacity(config.node_count());
    for group in &config.cluster.nodes {
        for _ in 0..group.count {
            let name = node_name(group.node.name.as_deref(), nodes.len());
            nodes.push(build_node(cache, &name, &group.node, options)?);
        }
    }

    let (hits, misses) = cache.stats();
    tracing::info!(
        cluster = %config.name,
        nodes = nodes.len(),
        grid = %config.cluster.grid,
        images = cache.len(),
        hits,
        misses,
        "built cluster"
    );

    let layout = GridLayout::new(config.cluster.grid, config.cluster.size)?
        .with_padding(Padding::all(config.padding));
    Composite::new(config.name.clone(), layout, nodes)
}

/// The first node of the cluster on its own.
pub fn build_first_node(
    cache: &mut ImageCache,
    config: &TopologyConfig,
    options: &BuildOptions,
) -> Result<Option<Object>> {
    let Some(group) = config.cluster.nodes.first() else {
        return Ok(None);
    };
    let name = node_name(group.node.name.as_deref(), 0);
    build_node(cache, &name, &group.node, options).map(Some)
}

fn node_name(base: Option<&str>, index: usize) -> String {
    match base {
        Some(base) => format!("{base}-{index}"),
        None => format!("node{index}"),
    }
}
