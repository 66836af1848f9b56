//! BaseCAD 命令行入口
//!
//! 在 JSON / DXF / SVG 之间转换草图，或查看草图内容。

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use basecad_core::geometry::DrawingObject;
use basecad_editor::{EditorConfig, EditorSession, MemoryStore};
use basecad_file::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "basecad", version, about = "BaseCAD sketch converter")]
struct Args {
    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 编辑器配置文件（TOML）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 转换草图格式（JSON 或 DXF 输入）
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// 输出格式，缺省时按扩展名识别
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
    /// 显示草图中的图元统计
    Info { input: PathBuf },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Svg,
    Dxf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Svg => ExportFormat::Svg,
            FormatArg::Dxf => ExportFormat::Dxf,
        }
    }
}

fn open_session(config: EditorConfig, input: &Path) -> Result<EditorSession<MemoryStore>> {
    let payload = std::fs::read_to_string(input).with_context(|| format!("Cannot read {}", input.display()))?;
    let mut session = EditorSession::open(config, MemoryStore::new())?;
    session
        .import_text(&payload)
        .with_context(|| format!("Cannot import {}", input.display()))?;
    Ok(session)
}

fn convert(config: EditorConfig, input: &Path, output: &Path, format: Option<FormatArg>) -> Result<()> {
    let session = open_session(config, input)?;
    let format = match format {
        Some(f) => f.into(),
        None => ExportFormat::from_path(output)?,
    };
    let content = session.export(format)?;
    std::fs::write(output, content).with_context(|| format!("Cannot write {}", output.display()))?;
    info!(
        "Converted {} objects: {} -> {} ({})",
        session.document().len(),
        input.display(),
        output.display(),
        format.extension()
    );
    Ok(())
}

fn show_info(config: EditorConfig, input: &Path) -> Result<()> {
    let session = open_session(config, input)?;
    let document = session.document();

    let count = |kind: &str| document.objects().iter().filter(|o| o.type_name() == kind).count();
    println!("{}", input.display());
    println!("  objects: {}", document.len());
    for kind in ["line", "rect", "circle", "path"] {
        println!("  {:<8}{}", kind, count(kind));
    }
    let segments: usize = document
        .objects()
        .iter()
        .map(|o| match o {
            DrawingObject::Path(p) => p.segment_count(),
            _ => 0,
        })
        .sum();
    if segments > 0 {
        println!("  path segments: {}", segments);
    }
    if let Some(bounds) = document.bounds() {
        println!(
            "  bounds: ({}, {}) - ({}, {})  {} x {}",
            bounds.min.x,
            bounds.min.y,
            bounds.max.x,
            bounds.max.y,
            bounds.width(),
            bounds.height()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(FmtSubscriber::builder().with_max_level(level).finish())?;

    let config = match &args.config {
        Some(path) => EditorConfig::load(path).with_context(|| format!("Cannot load config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    match args.command {
        Command::Convert { input, output, format } => convert(config, &input, &output, format),
        Command::Info { input } => show_info(config, &input),
    }
}
