pub mod assembler;
pub mod context;

pub use assembler::{
    assemble_frame, compute_chart, natal_aspect_points, FrameChart, NatalChart, NATAL_LAYER,
};
pub use context::{build_context, is_day_birth, ChartContext, ChartInput};
