//! VecSketch Render Library
//!
//! Renderer abstraction for VecSketch canvases, plus loading of background
//! images and saving of rendered frames. The default implementation
//! rasterizes on the CPU with tiny-skia.

mod io;
mod raster;
mod renderer;

pub use io::{ExportFormat, encode, load_background, output_path, save_frame};
pub use raster::RasterRenderer;
pub use renderer::{Frame, RenderContext, RenderError, RenderResult, Renderer};
