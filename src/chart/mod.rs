/// Chart layer: style selection and plotters-based rendering into an RGB
/// pixel buffer shared by the on-screen preview and the PNG export.
pub mod render;

pub use render::{render_chart, ChartError, ChartStyle, RenderedChart};
