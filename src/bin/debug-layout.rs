/// Diagnostic tool to verify the scan → squarify → placement pipeline
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use compact_str::CompactString;
use squarify_rs::layout::{self, place, PlacementConfig, Rectangle};
use squarify_rs::{Nested, Node, Weighted};

/// A scanned file: the leaf content of the treemap.
#[derive(Debug, Clone)]
struct FileEntry {
    name: CompactString,
    size: u64,
}

impl Weighted for FileEntry {
    fn weight(&self) -> f64 {
        self.size as f64
    }
}

#[derive(Default)]
struct ScannedDir {
    files: Vec<FileEntry>,
    subdirs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("squarify_rs=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let scan_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let width: f64 = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("invalid width '{arg}'"))?,
        None => 1920.0,
    };
    let height: f64 = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("invalid height '{arg}'"))?,
        None => 1080.0,
    };

    println!("=== DIAGNOSTIC: Scan → Squarify → Placement ===");
    println!("Scanning: {}", scan_path.display());

    // Scan
    let dirs = scan(&scan_path)?;
    let file_count: usize = dirs.values().map(|d| d.files.len()).sum();
    println!("\n[1] Scan completed: {} dirs, {} files", dirs.len(), file_count);

    // Group
    let Some(input) = build_group(&scan_path, &dirs) else {
        bail!("nothing with a non-zero size under {}", scan_path.display());
    };
    let total_bytes = input.reduce(0u64, |sum, file| sum + file.size);
    println!(
        "\n[2] Nested input built: {:.2} MB in {} files",
        total_bytes as f64 / 1_048_576.0,
        input.reduce(0usize, |count, _| count + 1)
    );

    // Layout
    let bounds = Rectangle::try_new(width, height)?;
    let tree = layout::try_compute_layout(input, bounds)?;
    let root = Node::from(tree);
    println!(
        "\n[3] Treemap computed: weight {:.0}, {} leaves, depth {}, lazy left: {}",
        root.weight(),
        root.leaves().len(),
        depth(&root),
        root.contains_lazy()
    );

    let Node::Internal(tree) = &root else {
        bail!("treemap root is not an internal node");
    };
    let rects = place(tree, 0.0, 0.0, bounds, &PlacementConfig::default());
    let mut leaves: Vec<_> = rects.iter().filter(|r| r.is_leaf()).collect();
    println!("\n[4] Placement: {} rectangles, {} leaves", rects.len(), leaves.len());

    // Show top 10 largest leaves
    println!("\n[5] Top 10 largest leaves by area:");
    leaves.sort_by(|a, b| b.area().total_cmp(&a.area()));
    for (i, rect) in leaves.iter().take(10).enumerate() {
        let Some(file) = rect.content else { continue };
        println!(
            "    [{}] '{}' - rect: {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1}) - size: {:.2} MB (depth={})",
            i,
            file.name,
            rect.w,
            rect.h,
            rect.area(),
            rect.x,
            rect.y,
            file.size as f64 / 1_048_576.0,
            rect.depth
        );
    }

    // Check for anomalies
    println!("\n[6] Checking for anomalies:");
    let area_sum: f64 = leaves.iter().map(|r| r.area()).sum();
    println!("    Total leaf area: {:.0}px²", area_sum);
    println!("    Viewport area:   {:.0}px²", bounds.area());
    println!("    Coverage: {:.1}%", area_sum / bounds.area().max(1.0) * 100.0);

    let ratios: Vec<f64> = leaves
        .iter()
        .filter(|r| r.w > 0.0 && r.h > 0.0)
        .map(|r| (r.w / r.h).max(r.h / r.w))
        .collect();
    if !ratios.is_empty() {
        let worst = ratios.iter().copied().fold(1.0, f64::max);
        let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
        println!("    Aspect ratio: mean {:.2}, worst {:.2}", mean, worst);
    }

    Ok(())
}

/// Walk `root` and index files and subdirectories by their parent directory.
fn scan(root: &Path) -> anyhow::Result<HashMap<PathBuf, ScannedDir>> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut dirs: HashMap<PathBuf, ScannedDir> = HashMap::new();
    dirs.insert(root.to_path_buf(), ScannedDir::default());

    for entry in jwalk::WalkDir::new(root).skip_hidden(false).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.depth == 0 {
            continue;
        }

        let path = entry.path();
        let Some(parent) = path.parent().map(Path::to_path_buf) else {
            continue;
        };

        if entry.file_type().is_dir() {
            dirs.entry(path.clone()).or_default();
            dirs.entry(parent).or_default().subdirs.push(path);
        } else if entry.file_type().is_file() {
            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    tracing::warn!("No metadata for {}: {}", path.display(), e);
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy();
            dirs.entry(parent).or_default().files.push(FileEntry {
                name: CompactString::new(&name),
                size,
            });
        }
    }

    Ok(dirs)
}

/// One group per directory. Zero-byte files and empty directories are left
/// out: they would get no area and only produce degenerate ratios.
fn build_group(dir: &Path, dirs: &HashMap<PathBuf, ScannedDir>) -> Option<Nested<FileEntry>> {
    let scanned = dirs.get(dir)?;

    let mut items: Vec<Nested<FileEntry>> = scanned
        .files
        .iter()
        .filter(|file| file.size > 0)
        .cloned()
        .map(Nested::leaf)
        .collect();
    items.extend(
        scanned
            .subdirs
            .iter()
            .filter_map(|subdir| build_group(subdir, dirs)),
    );

    if items.is_empty() {
        tracing::debug!("Skipping empty directory {}", dir.display());
        return None;
    }
    Some(Nested::group(items))
}

fn depth(node: &Node<FileEntry>) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(node, 0usize)];
    while let Some((node, level)) = stack.pop() {
        deepest = deepest.max(level);
        stack.extend(node.children().iter().map(|child| (child, level + 1)));
    }
    deepest
}
