use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bc_core::Image;
use bc_pipeline::{PipelineConfig, run_u8};
use bc_trace::{BorderKind, ContourSet, trace_u8};
use clap::{Args, Parser, Subcommand};
use image::GrayImage;
use log::info;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "bc_gallery")]
#[command(about = "Run contour extraction on external image fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trace contours and dump the forest as JSON
    #[command(name = "trace")]
    Trace(TraceArgs),
    /// Run the full pipeline: render PNG plus vertex records
    #[command(name = "pipeline")]
    Pipeline(PipelineArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct TraceArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct PipelineArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Depth selector: 0 = all, >0 = exactly that depth, <0 = down to |level|
    #[arg(long, default_value_t = -2)]
    level: i32,
    /// Simplification tolerance in pixels
    #[arg(long, default_value_t = 3.0)]
    epsilon: f32,
}

#[derive(Debug, Clone, Serialize)]
struct ContourDto {
    index: usize,
    kind: &'static str,
    depth: usize,
    parent: Option<usize>,
    next: Option<usize>,
    prev: Option<usize>,
    first_child: Option<usize>,
    points: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct ForestDto {
    width: usize,
    height: usize,
    contours: Vec<ContourDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaTrace {
    contour_count: usize,
    max_depth: usize,
    outer_count: usize,
    hole_count: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaPipeline {
    level: i32,
    epsilon: f32,
    contour_count: usize,
    max_depth: usize,
    record_count: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Trace(args) => run_trace(args),
        Command::Pipeline(args) => run_pipeline(args),
    }
}

fn run_trace(args: TraceArgs) -> Result<()> {
    let out_dir = prepare_out_dir(&args.common.out, "trace")?;
    let img = load_input_u8(&args.common.input)?;

    let set = trace_u8(&img.as_view())
        .with_context(|| format!("tracing {}", args.common.input.display()))?;
    info!(
        "traced {}: {} contours, max depth {}",
        args.common.input.display(),
        set.len(),
        set.max_depth()
    );

    write_json(out_dir.join("forest.json"), &forest_dto(&set, &img))?;
    write_json(
        out_dir.join("meta.json"),
        &MetaTrace {
            contour_count: set.len(),
            max_depth: set.max_depth(),
            outer_count: count_kind(&set, BorderKind::Outer),
            hole_count: count_kind(&set, BorderKind::Hole),
        },
    )?;

    Ok(())
}

fn run_pipeline(args: PipelineArgs) -> Result<()> {
    let out_dir = prepare_out_dir(&args.common.out, "pipeline")?;
    let img = load_input_u8(&args.common.input)?;

    let config = PipelineConfig {
        level: args.level,
        epsilon: args.epsilon,
    };
    let out = run_u8(&img.as_view(), &config)
        .with_context(|| format!("running pipeline on {}", args.common.input.display()))?;
    info!(
        "pipeline on {}: {} contours, {} records",
        args.common.input.display(),
        out.contours.len(),
        out.records.len()
    );

    save_u8_image(out_dir.join("render.png"), &out.rendered)?;

    let records: Vec<[i32; 3]> = out.records.iter().map(|r| [r.x, r.y, r.contour]).collect();
    write_json(out_dir.join("records.json"), &records)?;
    write_json(
        out_dir.join("meta.json"),
        &MetaPipeline {
            level: args.level,
            epsilon: args.epsilon,
            contour_count: out.contours.len(),
            max_depth: out.contours.max_depth(),
            record_count: out.records.len(),
        },
    )?;

    Ok(())
}

fn forest_dto(set: &ContourSet, img: &Image<u8>) -> ForestDto {
    let depths = set.depths();
    let contours = set
        .contours
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let node = set.hierarchy[i];
            ContourDto {
                index: i,
                kind: kind_name(c.kind),
                depth: depths[i],
                parent: node.parent,
                next: node.next,
                prev: node.prev,
                first_child: node.first_child,
                points: c.points.iter().map(|p| [p.x, p.y]).collect(),
            }
        })
        .collect();

    ForestDto {
        width: img.width(),
        height: img.height(),
        contours,
    }
}

fn count_kind(set: &ContourSet, kind: BorderKind) -> usize {
    set.contours.iter().filter(|c| c.kind == kind).count()
}

fn kind_name(kind: BorderKind) -> &'static str {
    match kind {
        BorderKind::Outer => "outer",
        BorderKind::Hole => "hole",
    }
}

fn prepare_out_dir(out: &Path, case_name: &str) -> Result<PathBuf> {
    let dir = out.join(case_name);
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    Ok(dir)
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    if !path.is_file() {
        bail!("input is not a readable file: {}", path.display());
    }

    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn save_u8_image(path: PathBuf, img: &Image<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(
        img.width() as u32,
        img.height() as u32,
        img.data().to_vec(),
    )
    .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}
