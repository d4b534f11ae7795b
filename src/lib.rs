//! Garland is a procedural animation core for a festive overlay.
//!
//! Ornaments (snowflakes, socks, candy figures, foliage, cherries) hang from a "top line" image and
//! swing under a stylized damped-pendulum model, while a string of lights twinkles and drifts
//! below. The public API is session-oriented:
//!
//! - Load every image into [`PreparedAssets`] (all-or-nothing)
//! - Create an [`Overlay`] from a [`SceneConfig`], a [`Viewport`] and a [`RandomSource`]
//! - Call [`Overlay::tick`] once per frame, then draw with [`Overlay::render`] into a
//!   [`RenderSink`] such as [`CpuSink`] or [`InMemorySink`]
//!
//! Ornaments attach at the opaque bounds of their images ([`compute_opaque_bounds`]), so
//! transparent padding in the source files never shifts the pivot.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod layout;
mod sim;

/// Render sinks.
pub mod render;
/// Scene configuration and live ornament model.
pub mod scene;
/// Session-oriented overlay API.
pub mod session;

pub use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{GarlandError, GarlandResult};
pub use crate::foundation::rng::{ConstRandom, RandomSource, Rng64};

pub use crate::assets::bounds::{
    AttachPoint, OPAQUE_ALPHA_THRESHOLD, OpaqueBounds, attach_offset, compute_opaque_bounds,
};
pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::store::{
    AssetKey, AssetSource, DirAssetSource, MemoryAssetSource, PreparedAssets, PreparedImage,
    normalize_rel_path,
};

pub use crate::layout::anchors::{AnchorOffset, Edge, ReferenceFrame, layout_anchor, layout_anchors};
pub use crate::layout::lights::build_lights;

pub use crate::sim::clock::{DEFAULT_DT_CAP_MS, FrameClock};
pub use crate::sim::lights::{Light, LightConfig, MAX_LIGHT_LANES, MAX_LIGHTS_PER_LANE};
pub use crate::sim::pendulum::{
    DriveParams, MIN_PENDULUM_LENGTH, Pendulum, PendulumClassConfig, PendulumTuning, Sway,
    SwayConfig,
};
pub use crate::sim::spin::{SpinConfig, SpinState};

pub use crate::render::cpu::{CpuSink, CpuSinkSettings, FrameRGBA};
pub use crate::render::sink::{DrawCmd, InMemorySink, RenderSink};
pub use crate::scene::config::{LayoutConfig, PhysicsConfig, SceneConfig, default_ornaments};
pub use crate::scene::model::{CarrySpec, Motion, Ornament, OrnamentClass, OrnamentSpec};
pub use crate::scene::tether::{SagCurve, TetherConfig, TetherKind, TetherStyle};
pub use crate::session::overlay::{AssetInfo, Overlay};
