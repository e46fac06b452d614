//! Convert command implementation.
//!
//! Decodes an image (or every image in a directory), compiles it to map
//! records and writes the geometry and prefab definition text files.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use notify::{EventKind, RecursiveMode, Watcher};
use walkdir::WalkDir;

use crate::compile::{compile, CompileStats};
use crate::config::ConvertConfig;
use crate::error::{ReflexError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::{default_prefab_output, write_text};
use crate::source::{is_image_path, load_grid, SourceOptions};
use crate::validation::validate_config;

/// Convert an image into map brushes, effects or prefabs
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Image file, or directory of images, to convert
    #[arg(required = true)]
    pub input: PathBuf,

    /// Configuration file (default: ./reflexpx.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Output file, or output directory when converting a directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output file for prefab definitions (default: <output>.prefabs.txt)
    #[arg(long)]
    pub prefab_output: Option<PathBuf>,

    /// Print geometry to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Size per pixel in world units
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Default material name
    #[arg(long)]
    pub material: Option<String>,

    /// Clip padding; a negative value disables the clip brush
    #[arg(long, allow_hyphen_values = true)]
    pub clip_padding: Option<f64>,

    /// Share one prefab per repeated colour
    #[arg(long)]
    pub prefabs: bool,

    /// Append to existing output files
    #[arg(long)]
    pub append: bool,

    /// Reconvert whenever the input or config changes
    #[arg(long)]
    pub watch: bool,
}

impl ConvertArgs {
    /// Apply command-line overrides on top of a loaded configuration.
    fn apply_overrides(&self, config: &mut ConvertConfig) {
        if let Some(size) = self.cell_size {
            config.cell_size = size;
        }
        if let Some(material) = &self.material {
            config.material = material.clone();
        }
        if let Some(padding) = self.clip_padding {
            config.clip_padding = padding;
        }
        if self.prefabs {
            config.use_prefabs = true;
        }
        if self.append {
            config.append = true;
        }
    }
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let config_path = convert_once(&args, printer)?;

    if args.watch {
        watch(&args, config_path.as_deref(), printer)?;
    }

    Ok(())
}

/// Load config, validate it and convert the input once.
/// Returns the config file that was used, if any.
fn convert_once(args: &ConvertArgs, printer: &Printer) -> Result<Option<PathBuf>> {
    let (mut config, config_path) = ConvertConfig::resolve(args.config.as_deref(), Path::new("."))?;
    if let Some(path) = &config_path {
        printer.status("Loading", &display_path(path));
    }
    args.apply_overrides(&mut config);

    let validation = validate_config(&config);
    for d in validation.warnings() {
        printer.warning("Warning", &d.message);
    }
    validation.into_result()?;

    if args.input.is_dir() {
        convert_dir(args, &config, printer)?;
    } else {
        let output = args.output.clone().unwrap_or_else(|| args.input.with_extension("txt"));
        let target = if args.stdout {
            Target::Stdout
        } else {
            Target::File(output)
        };
        let stats = convert_file(&args.input, &target, args.prefab_output.as_deref(), &config, printer)?;
        print_summary(&stats, printer);
    }

    Ok(config_path)
}

/// Where geometry text goes.
enum Target {
    File(PathBuf),
    Stdout,
}

/// One image compiled and rendered to text, not yet written.
struct Rendered {
    geometry: String,
    definitions: Option<String>,
    stats: CompileStats,
}

/// Decode and compile one image, rendering both text streams in memory.
fn render_file(input: &Path, config: &ConvertConfig, printer: &Printer) -> Result<Rendered> {
    let grid = load_grid(input, &SourceOptions::from_config(config))?;
    printer.status(
        "Decoding",
        &format!("{} ({}x{})", display_path(input), grid.width(), grid.height()),
    );

    let compiled = compile(&grid, config)?;
    Ok(Rendered {
        geometry: compiled.geometry_text(),
        definitions: config.use_prefabs.then(|| compiled.definitions_text()),
        stats: compiled.stats,
    })
}

/// Write a rendered image to its target and, with prefabs on, its
/// definitions file.
fn write_rendered(
    rendered: &Rendered,
    input: &Path,
    target: &Target,
    prefab_output: Option<&Path>,
    config: &ConvertConfig,
    printer: &Printer,
) -> Result<()> {
    match target {
        Target::Stdout => print!("{}", rendered.geometry),
        Target::File(path) => {
            write_text(path, &rendered.geometry, config.append)?;
            printer.success("Wrote", &printer.cyan(&display_path(path)));
        }
    }

    if let Some(text) = &rendered.definitions {
        let path = match (prefab_output, target) {
            (Some(p), _) => p.to_path_buf(),
            (None, Target::File(out)) => default_prefab_output(out),
            (None, Target::Stdout) => default_prefab_output(&input.with_extension("txt")),
        };
        write_text(&path, text, config.append)?;
        printer.success("Wrote", &printer.cyan(&display_path(&path)));
    }

    Ok(())
}

/// Convert one image.
fn convert_file(
    input: &Path,
    target: &Target,
    prefab_output: Option<&Path>,
    config: &ConvertConfig,
    printer: &Printer,
) -> Result<CompileStats> {
    let rendered = render_file(input, config, printer)?;
    write_rendered(&rendered, input, target, prefab_output, config, printer)?;
    Ok(rendered.stats)
}

/// Convert every image below a directory with the same configuration.
///
/// Every image is decoded and rendered before the first file is written,
/// so a bad image leaves no output behind.
fn convert_dir(args: &ConvertArgs, config: &ConvertConfig, printer: &Printer) -> Result<()> {
    if args.stdout || args.prefab_output.is_some() {
        return Err(ReflexError::Config {
            message: "--stdout and --prefab-output need a single input image".to_string(),
            help: Some("Convert the files one by one, or drop those flags".to_string()),
        });
    }

    let out_dir = args.output.clone().unwrap_or_else(|| args.input.clone());
    printer.status("Converting", &display_path(&args.input));
    let images = find_images(&args.input);
    if images.is_empty() {
        printer.warning("Warning", &format!("No images found in {}", display_path(&args.input)));
        return Ok(());
    }

    let mut pending = Vec::with_capacity(images.len());
    for image in &images {
        let relative = image.strip_prefix(&args.input).unwrap_or(image);
        let output = out_dir.join(relative).with_extension("txt");
        pending.push((image.as_path(), Target::File(output), render_file(image, config, printer)?));
    }

    let mut total = CompileStats::default();
    for (image, target, rendered) in &pending {
        write_rendered(rendered, image, target, None, config, printer)?;

        let stats = &rendered.stats;
        total.cells += stats.cells;
        total.visible += stats.visible;
        total.skipped += stats.skipped;
        total.brushes += stats.brushes;
        total.effects += stats.effects;
        total.prefab_instances += stats.prefab_instances;
        total.definitions += stats.definitions;
        total.clip |= stats.clip;
    }

    printer.info("Converted", &plural(images.len(), "image", "images"));
    print_summary(&total, printer);
    Ok(())
}

/// Supported images below `root`, sorted by path.
pub fn find_images(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_image_path(e.path()))
        .map(|e| e.into_path())
        .collect()
}

fn print_summary(stats: &CompileStats, printer: &Printer) {
    let mut parts = Vec::new();
    if stats.brushes > 0 || (stats.effects == 0 && stats.prefab_instances == 0) {
        parts.push(plural(stats.brushes, "brush", "brushes"));
    }
    if stats.effects > 0 {
        parts.push(plural(stats.effects, "effect", "effects"));
    }
    if stats.prefab_instances > 0 {
        parts.push(format!(
            "{} of {}",
            plural(stats.prefab_instances, "prefab instance", "prefab instances"),
            plural(stats.definitions, "definition", "definitions")
        ));
    }
    if stats.clip {
        parts.push("clip".to_string());
    }

    printer.success(
        "Finished",
        &format!(
            "{} {}",
            printer.bold(&parts.join(", ")),
            printer.dim(&format!("({} skipped)", plural(stats.skipped, "pixel", "pixels")))
        ),
    );
}

/// Reconvert on every change to the input or config until interrupted.
fn watch(args: &ConvertArgs, config_path: Option<&Path>, printer: &Printer) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| ReflexError::Watch {
        message: format!("Failed to start file watcher: {}", e),
    })?;

    let mode = if args.input.is_dir() {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    watcher.watch(&args.input, mode).map_err(|e| ReflexError::Watch {
        message: format!("Failed to watch {}: {}", args.input.display(), e),
    })?;
    if let Some(path) = config_path {
        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|e| ReflexError::Watch {
                message: format!("Failed to watch {}: {}", path.display(), e),
            })?;
    }

    printer.info("Watching", &format!("{} (Ctrl-C to stop)", display_path(&args.input)));

    for event in rx {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                printer.error("Error", &e.to_string());
                continue;
            }
        };

        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            continue;
        }

        // Our own text output may live in a watched directory.
        let relevant = event
            .paths
            .iter()
            .any(|p| is_image_path(p) || config_path.is_some_and(|c| p.file_name() == c.file_name()));
        if !relevant {
            continue;
        }

        if let Err(e) = convert_once(args, printer) {
            printer.error("Error", &e.to_string());
        }
    }

    Ok(())
}
