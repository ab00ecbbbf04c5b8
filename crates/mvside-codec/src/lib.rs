//! # mvside-codec
//!
//! 解码器运动向量导出层, 提供宏块类型、帧附加数据与运动向量记录抽象.
//!
//! 本 crate 把各类解码器内部的运动补偿状态 (H.264/MPEG/VC-1 宏块划分、
//! VP8 简化模型、HEVC 平铺网格) 统一转换为与编码格式无关的运动向量数组,
//! 并作为附加数据挂载到解码帧上.
//!
//! ## 使用示例
//!
//! ```rust
//! use mvside_codec::mv_export::{MbMotionInfo, MvExportContext, export_motion_vectors};
//! use mvside_codec::{CodecId, MbType, SideDataType, VideoFrame};
//! use mvside_core::ExportSideData;
//!
//! let ctx = MvExportContext::new(CodecId::Mpeg2Video, 16, 16)
//!     .with_export_side_data(ExportSideData::MVS);
//! let mb_types = [(MbType::TYPE_16X16 | MbType::L0).bits()];
//! let motion = vec![[6i16, -2]; 6];
//! let info = MbMotionInfo {
//!     mb_width: 1,
//!     mb_height: 1,
//!     mb_stride: 2,
//!     quarter_sample: false,
//!     mb_types: Some(&mb_types),
//!     motion_val: [Some(&motion), None],
//! };
//!
//! let mut frame = VideoFrame::new(16, 16);
//! export_motion_vectors(&ctx, &mut frame, &info);
//! let mvs = frame.side_data(SideDataType::MotionVectors).unwrap().motion_vectors().unwrap();
//! assert_eq!(mvs.len(), 1);
//! assert_eq!((mvs[0].src_x, mvs[0].src_y), (11, 7));
//! ```

pub mod codec_id;
pub mod frame;
pub mod mb_type;
pub mod motion_vector;
pub mod mv_export;

// 重导出常用类型
pub use codec_id::CodecId;
pub use frame::{FrameSideData, PictureType, SideDataType, VideoFrame};
pub use mb_type::MbType;
pub use motion_vector::MotionVector;
