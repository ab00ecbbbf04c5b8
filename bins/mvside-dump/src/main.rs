//! mvside-dump - 运动向量导出工具
//!
//! 读取解码器状态转储 (JSON), 逐帧执行运动向量导出, 再从帧附加数据中读回记录,
//! 以 CSV 或 JSON 形式输出. 输出列与常见的 extract_mvs 工具一致.

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process;

use mvside::logging::{self, LoggingConfig};
use mvside_codec::mv_export::{MbMotionInfo, MvExportContext, export_motion_vectors};
use mvside_codec::{CodecId, MotionVector, SideDataType, VideoFrame};
use mvside_core::ExportSideData;

/// 运动向量导出工具
#[derive(Parser, Debug)]
#[command(name = "mvside-dump", version, about = "从解码器状态转储中导出运动向量")]
struct Cli {
    /// 解码器状态转储文件 (JSON)
    input: PathBuf,

    /// 输出 JSON 格式 (默认 CSV)
    #[arg(long)]
    json: bool,

    /// 不设置运动向量导出标志 (用于验证无附加数据的路径)
    #[arg(long)]
    no_export: bool,

    /// 静默模式 (不输出统计信息)
    #[arg(short, long)]
    quiet: bool,

    /// 日志级别
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// 日志文件目录
    #[arg(long)]
    log_dir: Option<String>,
}

// ============================================================
// 转储文件结构
// ============================================================

/// 转储文件: 一路视频流的若干帧解码器状态
#[derive(Debug, Deserialize)]
struct DumpFile {
    /// 编解码器名称, 如 "h264"、"vp8"、"hevc"
    codec: String,
    width: u32,
    height: u32,
    #[serde(default)]
    frames: Vec<FrameDump>,
}

/// 单帧解码器状态
#[derive(Debug, Deserialize)]
struct FrameDump {
    #[serde(default)]
    mb_width: usize,
    #[serde(default)]
    mb_height: usize,
    /// 缺省为 mb_width + 1
    #[serde(default)]
    mb_stride: Option<usize>,
    #[serde(default)]
    quarter_sample: bool,
    #[serde(default)]
    mb_types: Option<Vec<u32>>,
    #[serde(default)]
    motion_val: [Option<Vec<[i16; 2]>>; 2],
}

impl FrameDump {
    fn motion_info(&self) -> MbMotionInfo<'_> {
        MbMotionInfo {
            mb_width: self.mb_width,
            mb_height: self.mb_height,
            mb_stride: self.mb_stride.unwrap_or(self.mb_width.saturating_add(1)),
            quarter_sample: self.quarter_sample,
            mb_types: self.mb_types.as_deref(),
            motion_val: [
                self.motion_val[0].as_deref(),
                self.motion_val[1].as_deref(),
            ],
        }
    }
}

/// 输出行
#[derive(Debug, Clone, PartialEq, Serialize)]
struct MvRow {
    framenum: u64,
    source: i32,
    blockw: u8,
    blockh: u8,
    srcx: i16,
    srcy: i16,
    dstx: i16,
    dsty: i16,
    flags: u64,
    motion_x: i32,
    motion_y: i32,
    motion_scale: u16,
}

impl MvRow {
    fn new(framenum: u64, mv: &MotionVector) -> Self {
        Self {
            framenum,
            source: mv.source,
            blockw: mv.w,
            blockh: mv.h,
            srcx: mv.src_x,
            srcy: mv.src_y,
            dstx: mv.dst_x,
            dsty: mv.dst_y,
            flags: mv.flags,
            motion_x: mv.motion_x,
            motion_y: mv.motion_y,
            motion_scale: mv.motion_scale,
        }
    }

    fn to_csv(&self) -> String {
        format!(
            "{},{:2},{:2},{:2},{:4},{:4},{:4},{:4},{:#x},{:4},{:4},{:4}",
            self.framenum,
            self.source,
            self.blockw,
            self.blockh,
            self.srcx,
            self.srcy,
            self.dstx,
            self.dsty,
            self.flags,
            self.motion_x,
            self.motion_y,
            self.motion_scale,
        )
    }
}

const CSV_HEADER: &str =
    "framenum,source,blockw,blockh,srcx,srcy,dstx,dsty,flags,motion_x,motion_y,motion_scale";

// ============================================================
// 主逻辑
// ============================================================

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("错误: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    logging::init(&LoggingConfig {
        level: cli.log_level.clone(),
        directory: cli.log_dir.clone(),
        file_prefix: "mvside-dump".to_string(),
    })?;

    let dump = load_dump(&cli.input)?;
    let flags = if cli.no_export {
        ExportSideData::empty()
    } else {
        ExportSideData::MVS
    };
    let rows = collect_rows(&dump, flags)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{CSV_HEADER}");
        for row in &rows {
            println!("{}", row.to_csv());
        }
    }

    if !cli.quiet {
        eprintln!(
            "{}: {} 帧, {} 条运动向量",
            dump.codec,
            dump.frames.len(),
            rows.len()
        );
    }
    Ok(())
}

fn load_dump(path: &Path) -> Result<DumpFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取转储文件 '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("转储文件格式错误 '{}'", path.display()))
}

/// 对每帧执行导出并读回附加数据
fn collect_rows(dump: &DumpFile, flags: ExportSideData) -> Result<Vec<MvRow>> {
    let codec_id: CodecId = dump
        .codec
        .parse()
        .with_context(|| format!("无法识别编解码器 '{}'", dump.codec))?;

    let mut rows = Vec::new();
    for (index, frame_dump) in dump.frames.iter().enumerate() {
        let framenum = index as u64 + 1;
        let ctx = MvExportContext::new(codec_id, dump.width, dump.height)
            .with_export_side_data(flags)
            .with_frame_number(framenum);
        let mut frame = VideoFrame::new(dump.width, dump.height);
        export_motion_vectors(&ctx, &mut frame, &frame_dump.motion_info());

        let Some(side_data) = frame.side_data(SideDataType::MotionVectors) else {
            log::debug!("第 {framenum} 帧没有运动向量");
            continue;
        };
        let mvs = side_data
            .motion_vectors()
            .with_context(|| format!("第 {framenum} 帧附加数据解析失败"))?;
        rows.extend(mvs.iter().map(|mv| MvRow::new(framenum, mv)));
    }
    Ok(rows)
}
