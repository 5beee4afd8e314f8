//! Example: full pipeline on a synthetic nested-rectangles image.
//!
//! Builds a foreground rectangle containing a hole that itself contains a
//! smaller island, runs trace → simplify → render → encode, and writes the
//! rendered strokes as a PNG plus the vertex records and hierarchy as JSON.
//! Per-stage counts and timing are printed to stdout.
//!
//! Run from the workspace root:
//!   cargo run -p binary-contours --example nested_rects -- --help
//!   cargo run -p binary-contours --example nested_rects -- --level 1

use std::time::Instant;

use anyhow::{Context, Result};
use binary_contours::{Image, PipelineConfig, run_u8};
use clap::Parser;
use image::GrayImage;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Run the contour pipeline on a synthetic nested-rectangles image")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 256)]
    width: usize,

    /// Image height in pixels
    #[arg(long, default_value_t = 256)]
    height: usize,

    /// Depth selector: 0 = all, >0 = exactly that depth, <0 = down to |level|
    #[arg(long, default_value_t = -2)]
    level: i32,

    /// Simplification tolerance in pixels
    #[arg(long, default_value_t = 3.0)]
    epsilon: f32,

    /// Output PNG for the rendered strokes
    #[arg(long, default_value = "nested_rects.png")]
    out_image: String,

    /// Output JSON for records and hierarchy
    #[arg(long, default_value = "nested_rects.json")]
    out_json: String,
}

#[derive(Serialize)]
struct ContourDto {
    index: usize,
    kind: &'static str,
    depth: usize,
    parent: Option<usize>,
    vertices: usize,
}

#[derive(Serialize)]
struct ResultDto {
    width: usize,
    height: usize,
    level: i32,
    epsilon: f32,
    contours: Vec<ContourDto>,
    /// Flat x, y, contour triples, one per simplified vertex.
    records: Vec<[i32; 3]>,
}

/// Three nested rectangles: filled outer block, hole, island in the hole.
fn synthesize(width: usize, height: usize) -> Image<u8> {
    let mut data = vec![0_u8; width * height];

    let mut fill = |x0: usize, y0: usize, x1: usize, y1: usize, v: u8| {
        for y in y0..y1.min(height) {
            for x in x0..x1.min(width) {
                data[y * width + x] = v;
            }
        }
    };

    let (w, h) = (width, height);
    fill(w / 8, h / 8, w * 7 / 8, h * 7 / 8, 255);
    fill(w / 4, h / 4, w * 3 / 4, h * 3 / 4, 0);
    fill(w * 3 / 8, h * 3 / 8, w * 5 / 8, h * 5 / 8, 255);

    Image::from_vec(width, height, data).expect("synthesized dimensions match")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let img = synthesize(args.width, args.height);
    let config = PipelineConfig {
        level: args.level,
        epsilon: args.epsilon,
    };

    let t0 = Instant::now();
    let out = run_u8(&img.as_view(), &config).context("running pipeline")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let depths = out.contours.depths();
    println!(
        "{}x{}: {} contours, max depth {}, {} records  ({elapsed_ms:.2} ms)",
        args.width,
        args.height,
        out.contours.len(),
        out.contours.max_depth(),
        out.records.len()
    );

    for (i, c) in out.contours.contours.iter().enumerate() {
        println!(
            "  contour {i}: depth {}, {} vertices",
            depths[i],
            c.points.len()
        );
    }

    let gray = GrayImage::from_raw(
        out.rendered.width() as u32,
        out.rendered.height() as u32,
        out.rendered.data().to_vec(),
    )
    .context("constructing output image")?;
    gray.save(&args.out_image)
        .with_context(|| format!("saving {}", args.out_image))?;

    let dto = ResultDto {
        width: args.width,
        height: args.height,
        level: args.level,
        epsilon: args.epsilon,
        contours: out
            .contours
            .contours
            .iter()
            .enumerate()
            .map(|(i, c)| ContourDto {
                index: i,
                kind: match c.kind {
                    binary_contours::BorderKind::Outer => "outer",
                    binary_contours::BorderKind::Hole => "hole",
                },
                depth: depths[i],
                parent: out.contours.hierarchy[i].parent,
                vertices: c.points.len(),
            })
            .collect(),
        records: out.records.iter().map(|r| [r.x, r.y, r.contour]).collect(),
    };

    let file = std::fs::File::create(&args.out_json)
        .with_context(|| format!("creating {}", args.out_json))?;
    serde_json::to_writer_pretty(file, &dto)
        .with_context(|| format!("writing JSON to {}", args.out_json))?;

    println!("wrote {} and {}", args.out_image, args.out_json);
    Ok(())
}
