//! framescrub drives a scroll-synchronized image-sequence animation.
//!
//! A [`FrameScrubber`] preloads an ordered set of still frames, maps scroll position to a frame
//! index with exponential smoothing and draws the current frame into an injected [`Surface`]
//! with aspect-correct placement and an edge-of-sequence fade.
//!
//! - Describe the sequence with a [`ScrubConfig`]
//! - Mount a [`FrameScrubber`] on a surface ([`CpuSurface`], [`RecordingSurface`], or your own)
//! - Feed it scroll/resize input directly or through a [`RenderLoop`]
//!
//! Small page-chrome helpers ([`RevealController`], [`ParallaxController`],
//! [`ActiveSpecTracker`]) cover the effects that usually sit next to a scrubbing hero.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod layout;
mod page;
mod render;
mod runtime;
mod scrub;

pub use crate::foundation::core::{Affine, FrameIndex, Rect, Size};
pub use crate::foundation::error::{ScrubError, ScrubResult};

pub use crate::assets::cache::{
    FrameCache, FrameCacheBuilder, FrameSlot, PreloadOpts, PreloadReport, PreparedFrame, preload,
};
pub use crate::assets::decode::decode_frame;
pub use crate::assets::fetch::{
    FrameFetcher, FsFrameFetcher, MemoryFrameFetcher, is_remote_location,
};
pub use crate::assets::http::{HttpFrameFetcher, RoutingFrameFetcher};
pub use crate::assets::sequence::{FrameSequence, FrameTemplate};
pub use crate::config::ScrubConfig;
pub use crate::layout::fit::{FitMode, aspect_fit};
pub use crate::layout::viewport::{SurfaceLayout, Viewport};
pub use crate::page::active::{ActiveSpecTracker, DEFAULT_ACTIVE_THRESHOLD};
pub use crate::page::parallax::{ParallaxController, ParallaxLayer};
pub use crate::page::reveal::{DEFAULT_REVEAL_THRESHOLD, RevealController};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::fade::{DEFAULT_FADE_THRESHOLD, edge_fade_opacity};
pub use crate::render::surface::{DrawCommand, FrameRGBA, RecordingSurface, Surface};
pub use crate::runtime::clock::{CountedClock, FrameClock, IntervalClock};
pub use crate::runtime::render_loop::{InputSender, RenderLoop, RenderLoopHandle, ScrubInput};
pub use crate::scrub::mapping::{ScrollMetrics, target_frame_for_fraction};
pub use crate::scrub::scrubber::{FrameScrubber, ScrubStats, SequenceEndHook, TickOutcome};
pub use crate::scrub::smoothing::{DEFAULT_EASE, ScrubState};
