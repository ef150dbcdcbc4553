use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::{Rgb, RgbImage};
use log::{info, warn};
use manga_panels::{
    Connectivity, DEFAULT_BINARIZATION_THRESHOLD, DEFAULT_MIN_PANEL_HEIGHT,
    DEFAULT_MIN_PANEL_WIDTH, Image, PanelBox, PanelSegmenter, SegmentReport, SegmenterConfig,
};
use serde::{Deserialize, Serialize};

const PAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "bmp"];

#[derive(Parser, Debug)]
#[command(name = "mp_panels")]
#[command(about = "Detect manga panels and list them in right-to-left reading order")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Segment a single page image.
    #[command(name = "segment")]
    Segment(SegmentArgs),
    /// Segment every page image of a chapter directory, in file-name order.
    #[command(name = "chapter")]
    Chapter(ChapterArgs),
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// JSON file with segmentation options; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Luma cutoff in 0..=255; darker-or-equal pixels are ink.
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i32>,
    /// Regions at most this wide are dropped.
    #[arg(long, allow_negative_numbers = true)]
    min_width: Option<i32>,
    /// Regions at most this tall are dropped.
    #[arg(long, allow_negative_numbers = true)]
    min_height: Option<i32>,
    #[arg(long, value_enum)]
    connectivity: Option<ConnectivityArg>,
}

#[derive(Args, Debug, Clone)]
struct SegmentArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[command(flatten)]
    config: ConfigArgs,
    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write a PNG of the page with numbered panel outlines.
    #[arg(long)]
    overlay: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct ChapterArgs {
    #[arg(long, required = true)]
    dir: PathBuf,
    #[command(flatten)]
    config: ConfigArgs,
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ConnectivityArg {
    C4,
    C8,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(value: ConnectivityArg) -> Self {
        match value {
            ConnectivityArg::C4 => Connectivity::C4,
            ConnectivityArg::C8 => Connectivity::C8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    binarization_threshold: Option<i32>,
    min_panel_width: Option<i32>,
    min_panel_height: Option<i32>,
    connectivity: Option<ConnectivityArg>,
}

#[derive(Debug, Clone, Serialize)]
struct PanelDto {
    index: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

#[derive(Debug, Clone, Serialize)]
struct StatsDto {
    foreground_pixels: usize,
    external_regions: usize,
    rejected_regions: usize,
    elapsed_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
struct PageReportDto {
    file: String,
    decoded: bool,
    width: usize,
    height: usize,
    num_panels: usize,
    panels: Vec<PanelDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<StatsDto>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Segment(args) => run_segment(args),
        Command::Chapter(args) => run_chapter(args),
    }
}

fn run_segment(args: SegmentArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let segmenter = build_segmenter(&args.config)?;

    let page = load_page(&args.input);
    let file = args.input.display().to_string();
    let dto = match &page {
        Some(img) => {
            let report = segmenter.segment_detailed(&img.as_view());
            if let Some(overlay_path) = &args.overlay {
                render_overlay(img, &report.panels)?
                    .save(overlay_path)
                    .with_context(|| format!("writing overlay {}", overlay_path.display()))?;
            }
            page_report_dto(file, &report)
        }
        None => {
            if args.overlay.is_some() {
                warn!("no overlay written: {file} could not be decoded");
            }
            undecoded_report_dto(file)
        }
    };
    info!("{}: {} panel(s)", dto.file, dto.num_panels);

    emit_json(args.out.as_deref(), &dto)
}

fn run_chapter(args: ChapterArgs) -> Result<()> {
    let segmenter = build_segmenter(&args.config)?;
    let pages = list_pages(&args.dir)?;
    if pages.is_empty() {
        warn!("no page images found in {}", args.dir.display());
    }

    let mut reports = Vec::with_capacity(pages.len());
    for path in &pages {
        let page = load_page(path);
        let report = segment_page(&segmenter, path, page.as_ref());
        info!("{}: {} panel(s)", path.display(), report.num_panels);
        reports.push(report);
    }

    let total: usize = reports.iter().map(|r| r.num_panels).sum();
    info!("{} page(s), {} panel(s) in total", reports.len(), total);

    emit_json(args.out.as_deref(), &reports)
}

fn build_segmenter(args: &ConfigArgs) -> Result<PanelSegmenter> {
    let file = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json::<ConfigFile>(path)?
        }
        None => ConfigFile::default(),
    };

    let config = merge_config(&file, args);
    PanelSegmenter::new(config).context("invalid segmentation configuration")
}

/// Flag values win over the config file, which wins over the defaults.
fn merge_config(file: &ConfigFile, args: &ConfigArgs) -> SegmenterConfig {
    SegmenterConfig {
        binarization_threshold: args
            .threshold
            .or(file.binarization_threshold)
            .unwrap_or(DEFAULT_BINARIZATION_THRESHOLD),
        min_panel_width: args
            .min_width
            .or(file.min_panel_width)
            .unwrap_or(DEFAULT_MIN_PANEL_WIDTH),
        min_panel_height: args
            .min_height
            .or(file.min_panel_height)
            .unwrap_or(DEFAULT_MIN_PANEL_HEIGHT),
        connectivity: args
            .connectivity
            .or(file.connectivity)
            .map(Connectivity::from)
            .unwrap_or_default(),
    }
}

/// Decodes a page as RGB. Undecodable files are logged and yield `None`;
/// callers report them as pages without panels.
fn load_page(path: &Path) -> Option<Image<[u8; 3]>> {
    match decode_rgb(path) {
        Ok(img) => Some(img),
        Err(err) => {
            warn!("{err:#}");
            None
        }
    }
}

fn decode_rgb(path: &Path) -> Result<Image<[u8; 3]>> {
    let rgb = image::open(path)
        .with_context(|| format!("decoding page image {}", path.display()))?
        .to_rgb8();
    let (w, h) = rgb.dimensions();
    let data = rgb.pixels().map(|p| p.0).collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing page image from {}", path.display()))
}

fn segment_page(
    segmenter: &PanelSegmenter,
    path: &Path,
    page: Option<&Image<[u8; 3]>>,
) -> PageReportDto {
    let file = path.display().to_string();
    match page {
        Some(img) => page_report_dto(file, &segmenter.segment_detailed(&img.as_view())),
        None => undecoded_report_dto(file),
    }
}

fn undecoded_report_dto(file: String) -> PageReportDto {
    PageReportDto {
        file,
        decoded: false,
        width: 0,
        height: 0,
        num_panels: 0,
        panels: Vec::new(),
        stats: None,
    }
}

fn page_report_dto(file: String, report: &SegmentReport) -> PageReportDto {
    PageReportDto {
        file,
        decoded: true,
        width: report.image_width,
        height: report.image_height,
        num_panels: report.num_panels(),
        panels: panel_dtos(&report.panels),
        stats: Some(StatsDto {
            foreground_pixels: report.foreground_pixels,
            external_regions: report.external_regions,
            rejected_regions: report.rejected_regions,
            elapsed_ms: report.timings.total_ms,
        }),
    }
}

fn panel_dtos(panels: &[PanelBox]) -> Vec<PanelDto> {
    panels
        .iter()
        .enumerate()
        .map(|(index, p)| PanelDto {
            index,
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
        })
        .collect()
}

fn list_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("chapter path is not a directory: {}", dir.display());
    }

    let mut pages = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("reading entry in {}", dir.display()))?
            .path();
        if path.is_file() && is_page_image(&path) {
            pages.push(path);
        }
    }

    pages.sort();
    Ok(pages)
}

fn is_page_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn render_overlay(page: &Image<[u8; 3]>, panels: &[PanelBox]) -> Result<RgbImage> {
    let raw = page.data().iter().flatten().copied().collect();
    let mut rgb = RgbImage::from_raw(page.width() as u32, page.height() as u32, raw)
        .context("constructing RgbImage from page pixels")?;

    for (i, p) in panels.iter().enumerate() {
        draw_box(&mut rgb, p, overlay_color(i), 3);
        draw_index_marker(&mut rgb, p, i + 1, overlay_color(i));
    }

    Ok(rgb)
}

fn overlay_color(index: usize) -> Rgb<u8> {
    const PALETTE: [[u8; 3]; 4] = [[230, 40, 40], [40, 140, 230], [40, 180, 60], [220, 150, 20]];
    Rgb(PALETTE[index % PALETTE.len()])
}

fn draw_box(img: &mut RgbImage, b: &PanelBox, color: Rgb<u8>, thickness: u32) {
    let (x0, y0) = (b.x as u32, b.y as u32);
    let (x1, y1) = (b.right() as u32, b.bottom() as u32);

    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            let on_edge = x < x0 + thickness
                || x + thickness >= x1
                || y < y0 + thickness
                || y + thickness >= y1;
            if on_edge {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Marks reading position `n` as `n` small squares along the panel's top edge.
fn draw_index_marker(img: &mut RgbImage, b: &PanelBox, n: usize, color: Rgb<u8>) {
    let size = 8u32;
    let y0 = b.y as u32 + 6;
    for k in 0..n as u32 {
        let x0 = b.x as u32 + 6 + k * (size + 3);
        for y in y0..(y0 + size).min(img.height()) {
            for x in x0..(x0 + size).min(img.width()) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn emit_json(out: Option<&Path>, value: &impl Serialize) -> Result<()> {
    match out {
        Some(path) => write_json(path, value),
        None => {
            let text = serde_json::to_string_pretty(value).context("serializing json")?;
            println!("{text}");
            Ok(())
        }
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
