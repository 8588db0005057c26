/// Shadow module - cascaded shadow maps for the directional light

mod buffer;
mod cascade;
mod renderer;

pub use buffer::ShadowBuffer;
pub use cascade::{build_cascades, cascade_for_depth, frustum_corners, ShadowCascade, MIN_EXTENT};
pub use renderer::{ShadowRenderer, ShadowState};
