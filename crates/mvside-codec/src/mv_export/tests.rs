use super::*;
use crate::mb_type::MbType;
use crate::motion_vector::MotionVector;

fn export_ctx(codec_id: CodecId, width: u32, height: u32) -> MvExportContext {
    MvExportContext::new(codec_id, width, height).with_export_side_data(ExportSideData::MVS)
}

fn motion_info<'a>(
    mb_width: usize,
    mb_height: usize,
    quarter_sample: bool,
    mb_types: Option<&'a [u32]>,
    l0: Option<&'a [[i16; 2]]>,
    l1: Option<&'a [[i16; 2]]>,
) -> MbMotionInfo<'a> {
    MbMotionInfo {
        mb_width,
        mb_height,
        mb_stride: mb_width + 1,
        quarter_sample,
        mb_types,
        motion_val: [l0, l1],
    }
}

/// 导出到新帧并解析附加数据
fn run_export(
    ctx: &MvExportContext,
    info: &MbMotionInfo<'_>,
) -> (VideoFrame, Option<Vec<MotionVector>>) {
    let mut frame = VideoFrame::new(ctx.width, ctx.height);
    export_motion_vectors(ctx, &mut frame, info);
    let mvs = frame
        .side_data(SideDataType::MotionVectors)
        .map(|sd| sd.motion_vectors().unwrap());
    (frame, mvs)
}

fn bits(mb_type: MbType) -> u32 {
    mb_type.bits()
}

#[test]
fn test_whole_block_forward_record() {
    let ctx = export_ctx(CodecId::Mpeg4, 16, 16);
    let mb_types = [bits(MbType::TYPE_16X16 | MbType::L0)];
    let mut grid = vec![[0i16; 2]; 6];
    grid[0] = [-7, 5];
    let info = motion_info(1, 1, true, Some(&mb_types), Some(&grid), None);

    let (_, mvs) = run_export(&ctx, &info);
    let mvs = mvs.expect("应有运动向量附加数据");
    assert_eq!(
        mvs,
        vec![MotionVector {
            source: -1,
            w: 16,
            h: 16,
            src_x: 7,
            src_y: 9,
            dst_x: 8,
            dst_y: 8,
            flags: 0,
            motion_x: -7,
            motion_y: 5,
            motion_scale: 4,
        }]
    );
}

#[test]
fn test_worst_case_bound_reached_by_bidirectional_8x8() {
    let ctx = export_ctx(CodecId::H264, 48, 32);
    let mb_types = vec![bits(MbType::TYPE_8X8 | MbType::L0L1); 4 * 2];
    // H.264: 每宏块 4x4 个网格单元, 步长 3 << 2 = 12
    let grid: Vec<[i16; 2]> = (0..96).map(|i| [i as i16, -(i as i16)]).collect();
    let info = motion_info(3, 2, true, Some(&mb_types), Some(&grid), Some(&grid));

    let buffer = extract_motion_vectors(&ctx, &info).unwrap().unwrap();
    assert_eq!(buffer.capacity(), 3 * 2 * 2 * 4);
    assert_eq!(buffer.len(), buffer.capacity());
    for mv in buffer.as_slice() {
        assert!(matches!(mv.w, 8 | 16));
        assert!(matches!(mv.h, 8 | 16));
        assert!(mv.source == -1 || mv.source == 1);
        assert_eq!(mv.flags, 0);
    }
}

#[test]
fn test_output_order_direction_then_sub_block() {
    let ctx = export_ctx(CodecId::H264, 16, 16);
    let mb_types = [bits(MbType::TYPE_8X8 | MbType::L0L1)];
    let l0: Vec<[i16; 2]> = (0..16).map(|i| [i, 0]).collect();
    let l1: Vec<[i16; 2]> = (0..16).map(|i| [0, i]).collect();
    let info = motion_info(1, 1, true, Some(&mb_types), Some(&l0), Some(&l1));

    let (_, mvs) = run_export(&ctx, &info);
    let mvs = mvs.unwrap();
    assert_eq!(mvs.len(), 8);
    let dsts: Vec<(i16, i16)> = mvs.iter().map(|mv| (mv.dst_x, mv.dst_y)).collect();
    assert_eq!(
        dsts,
        vec![
            (4, 4),
            (12, 4),
            (4, 12),
            (12, 12),
            (4, 4),
            (12, 4),
            (4, 12),
            (12, 12)
        ]
    );
    assert!(mvs[..4].iter().all(|mv| mv.source == -1));
    assert!(mvs[4..].iter().all(|mv| mv.source == 1));
    // stride = 4, sample_log2 = 2: 子块索引 0, 2, 8, 10
    let l0_x: Vec<i32> = mvs[..4].iter().map(|mv| mv.motion_x).collect();
    assert_eq!(l0_x, vec![0, 2, 8, 10]);
    let l1_y: Vec<i32> = mvs[4..].iter().map(|mv| mv.motion_y).collect();
    assert_eq!(l1_y, vec![0, 2, 8, 10]);
}

#[test]
fn test_interlaced_16x8_doubles_vertical_motion() {
    let ctx = export_ctx(CodecId::Mpeg2Video, 16, 16);
    let mb_types = [bits(MbType::TYPE_16X8 | MbType::INTERLACED | MbType::L0)];
    // stride = (1 << 1) + 1 = 3, 子块索引 0 与 3
    let mut grid = vec![[0i16; 2]; 6];
    grid[0] = [2, 3];
    grid[3] = [4, -5];
    let info = motion_info(1, 1, false, Some(&mb_types), Some(&grid), None);

    let (_, mvs) = run_export(&ctx, &info);
    let mvs = mvs.unwrap();
    assert_eq!(mvs.len(), 2);
    assert_eq!((mvs[0].motion_y, mvs[1].motion_y), (6, -10));
    assert_eq!((mvs[0].dst_x, mvs[0].dst_y), (8, 4));
    assert_eq!((mvs[1].dst_x, mvs[1].dst_y), (8, 12));
    assert_eq!((mvs[0].w, mvs[0].h), (16, 8));
    // -10 / 2 = -5
    assert_eq!(mvs[1].src_y, 7);
}

#[test]
fn test_progressive_8x16_keeps_vertical_motion() {
    let ctx = export_ctx(CodecId::Mpeg2Video, 16, 16);
    let mb_types = [bits(MbType::TYPE_8X16 | MbType::L0)];
    let grid = vec![[1i16, 3]; 6];
    let info = motion_info(1, 1, false, Some(&mb_types), Some(&grid), None);

    let (_, mvs) = run_export(&ctx, &info);
    let mvs = mvs.unwrap();
    assert_eq!(mvs.len(), 2);
    assert!(mvs.iter().all(|mv| mv.motion_y == 3 && mv.w == 8 && mv.h == 16));
    assert_eq!((mvs[1].dst_x, mvs[1].dst_y), (12, 8));
}

#[test]
fn test_missing_direction0_grid_is_noop() {
    let ctx = export_ctx(CodecId::H264, 16, 16);
    let mb_types = [bits(MbType::TYPE_16X16 | MbType::L0L1)];
    let grid = vec![[1i16, 1]; 16];
    let info = motion_info(1, 1, true, Some(&mb_types), None, Some(&grid));

    assert!(extract_motion_vectors(&ctx, &info).unwrap().is_none());
    let (frame, mvs) = run_export(&ctx, &info);
    assert!(mvs.is_none());
    assert!(frame.side_data.is_empty());
}

#[test]
fn test_export_disabled_is_noop() {
    let ctx = MvExportContext::new(CodecId::H264, 16, 16);
    let mb_types = [bits(MbType::TYPE_16X16 | MbType::L0)];
    let grid = vec![[1i16, 1]; 16];
    let info = motion_info(1, 1, true, Some(&mb_types), Some(&grid), None);

    let (frame, _) = run_export(&ctx, &info);
    assert!(frame.side_data.is_empty());
}

#[test]
fn test_missing_mb_types_only_matters_for_partitioned() {
    let grid = vec![[4i16, 0]; 4];
    let info = motion_info(1, 1, false, None, Some(&grid), None);

    let (_, mvs) = run_export(&export_ctx(CodecId::Mpeg4, 16, 16), &info);
    assert!(mvs.is_none());
    let (_, mvs) = run_export(&export_ctx(CodecId::Vp8, 16, 16), &info);
    assert_eq!(mvs.map(|v| v.len()), Some(4));
}

#[test]
fn test_all_intra_frame_attaches_nothing() {
    let ctx = export_ctx(CodecId::Mpeg2Video, 32, 16);
    let mb_types = vec![bits(MbType::INTRA16X16); 3];
    let grid = vec![[9i16, 9]; 12];
    let info = motion_info(2, 1, false, Some(&mb_types), Some(&grid), Some(&grid));

    let buffer = extract_motion_vectors(&ctx, &info).unwrap().unwrap();
    assert!(buffer.is_empty());
    let (frame, _) = run_export(&ctx, &info);
    assert!(frame.side_data(SideDataType::MotionVectors).is_none());
}

#[test]
fn test_vc1_ignores_list_usage_flags() {
    let mb_types = [bits(MbType::TYPE_16X16)];
    let l0 = vec![[2i16, 2]; 6];
    let l1 = vec![[-2i16, -2]; 6];
    let info = motion_info(1, 1, false, Some(&mb_types), Some(&l0), Some(&l1));

    let (_, mvs) = run_export(&export_ctx(CodecId::Vc1, 16, 16), &info);
    let mvs = mvs.unwrap();
    assert_eq!(mvs.len(), 2);
    assert_eq!((mvs[0].source, mvs[0].src_x), (-1, 9));
    assert_eq!((mvs[1].source, mvs[1].src_x), (1, 7));

    // 同样的输入, 其他解码器按使用标志跳过
    let (_, mvs) = run_export(&export_ctx(CodecId::Mpeg4, 16, 16), &info);
    assert!(mvs.is_none());
}

#[test]
fn test_absent_backward_grid_is_skipped() {
    let ctx = export_ctx(CodecId::Mpeg4, 16, 16);
    let mb_types = [bits(MbType::TYPE_16X16 | MbType::L0L1)];
    let grid = vec![[0i16, 0]; 6];
    let info = motion_info(1, 1, false, Some(&mb_types), Some(&grid), None);

    let (_, mvs) = run_export(&ctx, &info);
    let mvs = mvs.unwrap();
    assert_eq!(mvs.len(), 1);
    assert_eq!(mvs[0].source, -1);
}

#[test]
fn test_mb_stride_addresses_type_table() {
    let ctx = export_ctx(CodecId::Mpeg4, 16, 32);
    // mb_stride = 2: 第二行宏块类型位于索引 2, 索引 1 为填充
    let mb_types = [
        bits(MbType::TYPE_16X16 | MbType::L0),
        bits(MbType::TYPE_8X8 | MbType::L0),
        bits(MbType::TYPE_8X16 | MbType::L0),
    ];
    let grid = vec![[0i16, 0]; 12];
    let info = motion_info(1, 2, false, Some(&mb_types), Some(&grid), None);

    let (_, mvs) = run_export(&ctx, &info);
    let sizes: Vec<(u8, u8)> = mvs.unwrap().iter().map(|mv| (mv.w, mv.h)).collect();
    assert_eq!(sizes, vec![(16, 16), (8, 16), (8, 16)]);
}

#[test]
fn test_vp8_single_macroblock() {
    let ctx = export_ctx(CodecId::Vp8, 16, 16);
    let grid = vec![[4i16, 0]; 4];
    let info = motion_info(1, 1, false, None, Some(&grid), None);

    let (_, mvs) = run_export(&ctx, &info);
    let mvs = mvs.unwrap();
    assert_eq!(mvs.len(), 4);
    let expected_dst = [(4, 4), (12, 4), (4, 12), (12, 12)];
    for (mv, &(x, y)) in mvs.iter().zip(expected_dst.iter()) {
        assert_eq!((mv.w, mv.h, mv.source), (8, 8, -1));
        assert_eq!((mv.dst_x, mv.dst_y), (x, y));
        assert_eq!((mv.src_x, mv.src_y), (x + 2, y));
        assert_eq!(mv.motion_scale, 2);
    }
}

#[test]
fn test_vp8_ignores_backward_grid() {
    let ctx = export_ctx(CodecId::Vp8, 32, 16);
    let l0 = vec![[0i16, 0]; 8];
    let l1 = vec![[8i16, 8]; 8];
    let info = motion_info(2, 1, false, None, Some(&l0), Some(&l1));

    let (_, mvs) = run_export(&ctx, &info);
    let mvs = mvs.unwrap();
    assert_eq!(mvs.len(), 8);
    assert!(mvs.iter().all(|mv| mv.source == -1 && mv.motion_x == 0));
}

#[test]
fn test_hevc_flat_grid() {
    let ctx = export_ctx(CodecId::H265, 16, 8);
    let grid = vec![[0i16, 0]; 2];
    let info = MbMotionInfo {
        motion_val: [Some(&grid), None],
        ..Default::default()
    };

    let (_, mvs) = run_export(&ctx, &info);
    let mvs = mvs.unwrap();
    assert_eq!(mvs.len(), 2);
    assert_eq!((mvs[0].dst_x, mvs[0].dst_y), (0, 0));
    assert_eq!((mvs[1].dst_x, mvs[1].dst_y), (8, 0));
    assert!(mvs.iter().all(|mv| mv.w == 8 && mv.h == 8 && mv.source == -1));
}

#[test]
fn test_hevc_quarter_sample_scale_and_row_major() {
    let ctx = export_ctx(CodecId::H265, 16, 16);
    let grid = vec![[0i16, 0], [4, 0], [0, -4], [-9, 9]];
    let info = MbMotionInfo {
        quarter_sample: true,
        motion_val: [Some(&grid), None],
        ..Default::default()
    };

    let buffer = extract_motion_vectors(&ctx, &info).unwrap().unwrap();
    assert_eq!(buffer.capacity(), 8);
    let mvs = buffer.as_slice();
    assert_eq!((mvs[1].src_x, mvs[1].dst_x), (9, 8));
    assert_eq!((mvs[2].dst_y, mvs[2].src_y), (8, 7));
    assert_eq!((mvs[3].src_x, mvs[3].src_y), (6, 10));
    assert!(mvs.iter().all(|mv| mv.motion_scale == 4));
}

#[test]
fn test_side_data_exact_size_and_idempotent() {
    let ctx = export_ctx(CodecId::H264, 32, 16);
    let mb_types = vec![
        bits(MbType::TYPE_16X8 | MbType::L0),
        bits(MbType::TYPE_8X8 | MbType::L0L1),
        0,
    ];
    let grid: Vec<[i16; 2]> = (0..64).map(|i| [i * 3 - 50, 7 - i]).collect();
    let info = motion_info(2, 1, true, Some(&mb_types), Some(&grid), Some(&grid));

    let (first, mvs) = run_export(&ctx, &info);
    let (second, _) = run_export(&ctx, &info);
    let count = mvs.unwrap().len();
    assert_eq!(count, 2 + 8);

    let a = first.side_data(SideDataType::MotionVectors).unwrap();
    let b = second.side_data(SideDataType::MotionVectors).unwrap();
    assert_eq!(a.size(), count * MotionVector::SIZE);
    assert_eq!(a.data, b.data);
}

#[test]
fn test_truncated_grid_leaves_frame_untouched() {
    let ctx = export_ctx(CodecId::H264, 32, 32);
    let mb_types = vec![bits(MbType::TYPE_16X16 | MbType::L0); 6];
    let grid = vec![[1i16, 1]; 10];
    let info = motion_info(2, 2, true, Some(&mb_types), Some(&grid), None);

    assert!(matches!(
        extract_motion_vectors(&ctx, &info),
        Err(MvsError::InvalidData(_))
    ));
    let (frame, _) = run_export(&ctx, &info);
    assert!(frame.side_data.is_empty());
}

#[test]
fn test_truncated_type_table_leaves_frame_untouched() {
    let ctx = export_ctx(CodecId::Mpeg4, 32, 32);
    let mb_types = vec![bits(MbType::TYPE_16X16 | MbType::L0); 2];
    let grid = vec![[1i16, 1]; 64];
    let info = motion_info(2, 2, false, Some(&mb_types), Some(&grid), None);

    let (frame, _) = run_export(&ctx, &info);
    assert!(frame.side_data.is_empty());
}

#[test]
fn test_allocation_failure_leaves_frame_untouched() {
    let ctx = export_ctx(CodecId::Vp8, 16, 16);
    let grid = vec![[0i16, 0]; 4];
    let info = motion_info(usize::MAX / 4, 3, false, None, Some(&grid), None);

    assert!(matches!(
        extract_motion_vectors(&ctx, &info),
        Err(MvsError::OutOfMemory(_))
    ));
    let (frame, _) = run_export(&ctx, &info);
    assert!(frame.side_data.is_empty());
}

#[test]
fn test_unsupported_codec_is_noop() {
    let ctx = export_ctx(CodecId::Vp9, 16, 16);
    let grid = vec![[0i16, 0]; 4];
    let info = motion_info(1, 1, false, None, Some(&grid), None);
    assert!(extract_motion_vectors(&ctx, &info).unwrap().is_none());
}

#[test]
fn test_checked_entry_matches_plain_entry() {
    let ctx = export_ctx(CodecId::Mpeg2Video, 16, 16);
    let mb_types = [bits(MbType::TYPE_16X16 | MbType::L0)];
    let grid = vec![[3i16, 3]; 6];
    let info = motion_info(1, 1, false, Some(&mb_types), Some(&grid), None);

    let mut checked = VideoFrame::new(16, 16);
    export_motion_vectors_checked(&ctx, &mut checked, &info);
    let (plain, _) = run_export(&ctx, &info);
    assert_eq!(checked.side_data, plain.side_data);

    let mut frame = VideoFrame::new(16, 16);
    let no_types = motion_info(1, 1, false, None, Some(&grid), None);
    export_motion_vectors_checked(&ctx, &mut frame, &no_types);
    assert!(frame.side_data.is_empty());
}

#[test]
fn test_concurrent_frames_share_nothing() {
    let ctx = export_ctx(CodecId::H264, 32, 32);
    let mb_types = vec![bits(MbType::TYPE_8X8 | MbType::L0L1); 6];
    let grid: Vec<[i16; 2]> = (0..128).map(|i| [i, i / 2]).collect();
    let info = motion_info(2, 2, true, Some(&mb_types), Some(&grid), Some(&grid));

    let (reference, _) = run_export(&ctx, &info);
    let results: Vec<VideoFrame> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| run_export(&ctx, &info).0)).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for frame in results {
        assert_eq!(frame.side_data, reference.side_data);
    }
}
