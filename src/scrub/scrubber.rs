use crate::{
    assets::cache::{FrameCache, PreloadOpts, PreloadReport, preload},
    assets::fetch::FrameFetcher,
    assets::sequence::FrameSequence,
    config::ScrubConfig,
    foundation::core::{FrameIndex, Size},
    foundation::error::{ScrubError, ScrubResult},
    layout::fit::aspect_fit,
    layout::viewport::{SurfaceLayout, Viewport},
    render::fade::edge_fade_opacity,
    render::surface::Surface,
    scrub::mapping::ScrollMetrics,
    scrub::smoothing::ScrubState,
};

/// One-shot notification fired when the sequence is essentially complete.
pub type SequenceEndHook = Box<dyn FnOnce() + Send>;

/// Counters describing scrubber activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrubStats {
    /// Smoothing ticks processed.
    pub ticks: u64,
    /// Draw requests that reached the surface.
    pub draws: u64,
    /// Draw requests skipped because the frame was missing.
    pub skipped_draws: u64,
}

/// Result of one render tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    /// Frame selected for display, `floor(current)`.
    pub frame: FrameIndex,
    /// Smoothed position after the tick.
    pub position: f64,
    /// Whether the surface was drawn.
    pub drawn: bool,
    /// Whether this tick fired the end-of-sequence hook.
    pub ended: bool,
}

/// Scroll-driven image-sequence player.
///
/// A scrubber only exists once preloading has settled, so every scroll and resize it receives is
/// applied against a fully resolved cache. Input handlers ([`FrameScrubber::on_scroll`]) update
/// numeric state only; drawing happens in [`FrameScrubber::tick`],
/// [`FrameScrubber::on_resize`] and [`FrameScrubber::draw_frame`].
pub struct FrameScrubber<S: Surface> {
    surface: S,
    config: ScrubConfig,
    sequence: FrameSequence,
    cache: FrameCache,
    state: ScrubState,
    layout: SurfaceLayout,
    on_sequence_end: Option<SequenceEndHook>,
    ended: bool,
    stats: ScrubStats,
}

impl<S: Surface> FrameScrubber<S> {
    /// Bind `surface`, lay it out, preload every frame, then show frame 0.
    ///
    /// Blocks until all fetches have settled. Individual frame failures are tolerated and
    /// reported; only invalid configuration or surface errors fail construction.
    #[tracing::instrument(skip_all, fields(frames = config.total_frames))]
    pub fn mount(
        mut surface: S,
        config: ScrubConfig,
        fetcher: &dyn FrameFetcher,
        viewport: Viewport,
        preload_opts: &PreloadOpts,
    ) -> ScrubResult<(Self, PreloadReport)> {
        config.validate()?;
        let sequence = config.sequence()?;
        let layout = bind_surface(&mut surface, &viewport)?;

        let (cache, report) = preload(&sequence, fetcher, preload_opts)?;
        if !report.is_complete() {
            tracing::warn!(
                missing = report.failed.len(),
                total = report.total,
                "mounting with missing frames"
            );
        }

        let scrubber = Self::assemble(surface, config, sequence, cache, layout)?;
        Ok((scrubber, report))
    }

    /// Build from an already preloaded cache; same post-preload steps as [`FrameScrubber::mount`].
    pub fn with_cache(
        mut surface: S,
        config: ScrubConfig,
        cache: FrameCache,
        viewport: Viewport,
    ) -> ScrubResult<Self> {
        config.validate()?;
        let sequence = config.sequence()?;
        if cache.len() != sequence.len() as usize {
            return Err(ScrubError::validation(format!(
                "cache holds {} slots but sequence has {} frames",
                cache.len(),
                sequence.len()
            )));
        }
        let layout = bind_surface(&mut surface, &viewport)?;
        Self::assemble(surface, config, sequence, cache, layout)
    }

    fn assemble(
        surface: S,
        config: ScrubConfig,
        sequence: FrameSequence,
        cache: FrameCache,
        layout: SurfaceLayout,
    ) -> ScrubResult<Self> {
        let state = ScrubState::new(sequence.len());
        let mut out = Self {
            surface,
            config,
            sequence,
            cache,
            state,
            layout,
            on_sequence_end: None,
            ended: false,
            stats: ScrubStats::default(),
        };
        out.draw_frame(FrameIndex(0))?;
        out.surface.set_visible(true);
        tracing::debug!(
            backing_width = layout.backing_width,
            backing_height = layout.backing_height,
            "scrubber mounted"
        );
        Ok(out)
    }

    /// Register the one-shot end-of-sequence hook, replacing any previous one.
    ///
    /// Has no effect once the sequence has already ended.
    pub fn set_sequence_end_hook(&mut self, hook: SequenceEndHook) {
        if !self.ended {
            self.on_sequence_end = Some(hook);
        }
    }

    /// Retarget from a scroll event. Returns the new target position.
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) -> f64 {
        self.state.apply_scroll_target(metrics)
    }

    /// Re-layout after a viewport change and redraw the displayed frame.
    pub fn on_resize(&mut self, viewport: &Viewport) -> ScrubResult<()> {
        let layout = SurfaceLayout::from_viewport(viewport);
        self.surface.configure(&layout)?;
        self.layout = layout;
        self.draw_frame(self.state.displayed())?;
        Ok(())
    }

    /// Advance smoothing by one step and draw the resulting frame.
    pub fn tick(&mut self) -> ScrubResult<TickOutcome> {
        self.stats.ticks += 1;
        let frame = self.state.advance_smoothing(self.config.ease);
        let drawn = self.draw_frame(frame)?;
        let ended = self.check_sequence_end();
        Ok(TickOutcome {
            frame,
            position: self.state.current(),
            drawn,
            ended,
        })
    }

    /// Render frame `index` (clamped into the sequence).
    ///
    /// Missing frames are a no-op that leaves the previous frame on screen; returns whether the
    /// surface was drawn.
    pub fn draw_frame(&mut self, index: FrameIndex) -> ScrubResult<bool> {
        let index = self.sequence.clamp(index);
        let Some(frame) = self.cache.get(index) else {
            self.stats.skipped_draws += 1;
            return Ok(false);
        };

        self.surface.clear();
        let dest = aspect_fit(
            self.layout.logical,
            Size::new(f64::from(frame.width), f64::from(frame.height)),
            self.config.fit,
        );
        let opacity = edge_fade_opacity(self.sequence.len(), index, self.config.fade_threshold);
        self.surface.set_opacity(opacity);
        self.surface.draw_frame(frame, dest)?;
        self.stats.draws += 1;
        Ok(true)
    }

    fn check_sequence_end(&mut self) -> bool {
        if self.ended {
            return false;
        }
        let threshold = f64::from(self.sequence.len()) - self.config.end_signal_offset;
        if self.state.current() < threshold {
            return false;
        }
        self.ended = true;
        tracing::debug!(position = self.state.current(), "sequence end reached");
        if let Some(hook) = self.on_sequence_end.take() {
            hook();
        }
        true
    }

    /// Whether the end-of-sequence signal has fired. Never reverts.
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Current scrub state.
    pub fn state(&self) -> &ScrubState {
        &self.state
    }

    /// Frame currently selected for display.
    pub fn displayed_frame(&self) -> FrameIndex {
        self.state.displayed()
    }

    /// Frame sequence being scrubbed.
    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    /// Preloaded frames.
    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    /// Active configuration.
    pub fn config(&self) -> &ScrubConfig {
        &self.config
    }

    /// Layout from the last resize.
    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// Activity counters.
    pub fn stats(&self) -> ScrubStats {
        self.stats
    }

    /// Borrow the bound surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the bound surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Release the bound surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

fn bind_surface<S: Surface>(surface: &mut S, viewport: &Viewport) -> ScrubResult<SurfaceLayout> {
    let layout = SurfaceLayout::from_viewport(viewport);
    surface.set_visible(false);
    surface.configure(&layout)?;
    Ok(layout)
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/scrubber.rs"]
mod tests;
