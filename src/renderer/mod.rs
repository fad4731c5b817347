//! Rendering
//!
//! Scenes draw into a `QuadBatch`; on the web the batch is uploaded to a
//! small WebGPU pipeline that fills solid-color triangles.

pub mod batch;
pub mod font;
pub mod pipeline;
pub mod vertex;

pub use batch::{Quad, QuadBatch};
pub use font::{Font, Fonts, Image};
pub use pipeline::RenderState;
pub use vertex::Vertex;
