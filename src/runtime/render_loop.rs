use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc,
};
use std::thread::JoinHandle;

use crate::{
    foundation::error::{ScrubError, ScrubResult},
    layout::viewport::Viewport,
    render::surface::Surface,
    runtime::clock::FrameClock,
    scrub::mapping::ScrollMetrics,
    scrub::scrubber::{FrameScrubber, TickOutcome},
};

/// Input event queued for the render loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrubInput {
    /// Document scrolled.
    Scroll(ScrollMetrics),
    /// Viewport resized.
    Resize(Viewport),
}

/// Cloneable handle used by event sources to feed the render loop.
#[derive(Clone, Debug)]
pub struct InputSender {
    tx: mpsc::Sender<ScrubInput>,
}

impl InputSender {
    /// Queue a scroll event.
    pub fn scroll(&self, metrics: ScrollMetrics) -> ScrubResult<()> {
        self.send(ScrubInput::Scroll(metrics))
    }

    /// Queue a resize event.
    pub fn resize(&self, viewport: Viewport) -> ScrubResult<()> {
        self.send(ScrubInput::Resize(viewport))
    }

    /// Queue any input event.
    pub fn send(&self, input: ScrubInput) -> ScrubResult<()> {
        self.tx
            .send(input)
            .map_err(|_| ScrubError::render("render loop has stopped"))
    }
}

/// Display-synchronized driver that owns a [`FrameScrubber`].
///
/// Every tick drains queued input (applied as numeric state only), then advances smoothing and
/// draws. The loop keeps ticking while idle so smoothing converges after scrolling stops.
pub struct RenderLoop<S: Surface> {
    scrubber: FrameScrubber<S>,
    tx: mpsc::Sender<ScrubInput>,
    rx: mpsc::Receiver<ScrubInput>,
}

impl<S: Surface> RenderLoop<S> {
    /// Wrap a mounted scrubber.
    pub fn new(scrubber: FrameScrubber<S>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { scrubber, tx, rx }
    }

    /// Sender for scroll/resize input.
    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Borrow the driven scrubber.
    pub fn scrubber(&self) -> &FrameScrubber<S> {
        &self.scrubber
    }

    /// Apply every queued input event in arrival order. Returns how many were applied.
    ///
    /// Stops at the first failing event; later events stay queued.
    pub fn drain_input(&mut self) -> ScrubResult<usize> {
        let mut applied = 0;
        while let Ok(input) = self.rx.try_recv() {
            self.apply(input)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn apply(&mut self, input: ScrubInput) -> ScrubResult<()> {
        match input {
            ScrubInput::Scroll(metrics) => {
                self.scrubber.on_scroll(&metrics);
                Ok(())
            }
            ScrubInput::Resize(viewport) => self.scrubber.on_resize(&viewport),
        }
    }

    /// Drain input, then run one scrubber tick.
    pub fn run_tick(&mut self) -> ScrubResult<TickOutcome> {
        self.drain_input()?;
        self.scrubber.tick()
    }

    /// Like [`RenderLoop::run_tick`], but failures are logged and the loop carries on.
    ///
    /// A rejected resize leaves the previous layout in place.
    fn tick_logged(&mut self) {
        self.drain_input_logged();
        if let Err(err) = self.scrubber.tick() {
            tracing::warn!(error = %err, "render tick failed");
        }
    }

    fn drain_input_logged(&mut self) {
        while let Ok(input) = self.rx.try_recv() {
            if let Err(err) = self.apply(input) {
                tracing::warn!(error = %err, ?input, "input rejected");
            }
        }
    }

    /// Tick on the current thread until `clock` is exhausted or `stop` is set.
    ///
    /// Errors from individual inputs or ticks never end the loop. Input queued before stopping
    /// is applied before the scrubber is returned.
    pub fn run(mut self, clock: &mut dyn FrameClock, stop: &AtomicBool) -> FrameScrubber<S> {
        while !stop.load(Ordering::Acquire) && clock.wait_next() {
            if stop.load(Ordering::Acquire) {
                break;
            }
            self.tick_logged();
        }
        self.drain_input_logged();
        self.scrubber
    }

    /// Run the loop on a dedicated thread.
    pub fn spawn<C>(self, mut clock: C) -> ScrubResult<RenderLoopHandle<S>>
    where
        S: Send + 'static,
        C: FrameClock + 'static,
    {
        let sender = self.sender();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let join = std::thread::Builder::new()
            .name("framescrub-render".to_owned())
            .spawn(move || self.run(&mut clock, &thread_stop))
            .map_err(|e| ScrubError::render(format!("spawn render loop thread: {e}")))?;
        Ok(RenderLoopHandle {
            sender,
            stop,
            join: Some(join),
        })
    }
}

/// Cancellation handle for a spawned [`RenderLoop`].
pub struct RenderLoopHandle<S: Surface> {
    sender: InputSender,
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<FrameScrubber<S>>>,
}

impl<S: Surface> RenderLoopHandle<S> {
    /// Sender for scroll/resize input.
    pub fn sender(&self) -> InputSender {
        self.sender.clone()
    }

    /// Return `true` while the loop thread is alive.
    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Stop the loop and take back the scrubber.
    pub fn stop(mut self) -> ScrubResult<FrameScrubber<S>> {
        self.stop.store(true, Ordering::Release);
        let join = self
            .join
            .take()
            .ok_or_else(|| ScrubError::render("render loop already joined"))?;
        join.join()
            .map_err(|_| ScrubError::render("render loop thread panicked"))
    }
}

impl<S: Surface> Drop for RenderLoopHandle<S> {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take()
            && join.join().is_err()
        {
            tracing::error!("render loop thread panicked");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/render_loop.rs"]
mod tests;
