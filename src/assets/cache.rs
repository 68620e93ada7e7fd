use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    assets::{decode::decode_frame, fetch::FrameFetcher, sequence::FrameSequence},
    foundation::core::FrameIndex,
    foundation::error::{ScrubError, ScrubResult},
};

/// Decoded frame in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Settled state of one cache slot.
#[derive(Clone, Debug)]
pub enum FrameSlot {
    /// The frame was fetched and decoded.
    Loaded(Arc<PreparedFrame>),
    /// Fetch or decode failed; rendering this index is a no-op.
    Missing,
}

impl FrameSlot {
    /// Loaded frame, if any.
    pub fn frame(&self) -> Option<&PreparedFrame> {
        match self {
            Self::Loaded(f) => Some(f),
            Self::Missing => None,
        }
    }

    /// Return `true` for [`FrameSlot::Loaded`].
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Immutable index → frame cache produced by [`preload`].
#[derive(Clone, Debug)]
pub struct FrameCache {
    slots: Vec<FrameSlot>,
}

impl FrameCache {
    /// Number of slots, equal to the sequence length.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when the cache has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at `index`, or `None` when out of range.
    pub fn slot(&self, index: FrameIndex) -> Option<&FrameSlot> {
        self.slots.get(index.as_usize())
    }

    /// Loaded frame at `index`; `None` for missing or out-of-range slots.
    pub fn get(&self, index: FrameIndex) -> Option<&PreparedFrame> {
        self.slot(index).and_then(FrameSlot::frame)
    }

    /// Number of loaded slots.
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_loaded()).count()
    }

    /// Indices of missing slots in ascending order.
    pub fn missing_indices(&self) -> Vec<FrameIndex> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_loaded())
            .map(|(i, _)| FrameIndex(i as u32))
            .collect()
    }
}

/// Accumulates per-frame load results until every slot has settled.
#[derive(Debug)]
pub struct FrameCacheBuilder {
    slots: Vec<Option<FrameSlot>>,
}

impl FrameCacheBuilder {
    /// Builder with `len` pending slots.
    pub fn new(len: u32) -> Self {
        Self {
            slots: vec![None; len as usize],
        }
    }

    /// Settle slot `index` from a fetch/decode result.
    ///
    /// Failures become [`FrameSlot::Missing`]. Each slot settles exactly once.
    pub fn record_load_result(
        &mut self,
        index: FrameIndex,
        result: ScrubResult<PreparedFrame>,
    ) -> ScrubResult<()> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index.as_usize()).ok_or_else(|| {
            ScrubError::validation(format!("frame {index} is outside sequence of {len}"))
        })?;
        if slot.is_some() {
            return Err(ScrubError::validation(format!(
                "frame {index} was already recorded"
            )));
        }
        *slot = Some(match result {
            Ok(frame) => FrameSlot::Loaded(Arc::new(frame)),
            Err(_) => FrameSlot::Missing,
        });
        Ok(())
    }

    /// Number of slots still waiting for a result.
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Freeze the cache once every slot has settled.
    pub fn finish(self) -> ScrubResult<(FrameCache, PreloadReport)> {
        let pending = self.pending();
        if pending > 0 {
            return Err(ScrubError::validation(format!(
                "cannot finish preload with {pending} pending frames"
            )));
        }
        let slots: Vec<FrameSlot> = self.slots.into_iter().flatten().collect();
        let cache = FrameCache { slots };
        let failed = cache.missing_indices();
        let report = PreloadReport {
            total: cache.len() as u32,
            loaded: cache.loaded_count() as u32,
            failed,
        };
        Ok((cache, report))
    }
}

/// Preload tuning.
#[derive(Clone, Debug, Default)]
pub struct PreloadOpts {
    /// Override rayon worker threads; `None` uses the global default.
    pub threads: Option<usize>,
}

/// Outcome of a settled preload.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PreloadReport {
    /// Sequence length.
    pub total: u32,
    /// Frames stored as loaded.
    pub loaded: u32,
    /// Frames stored as missing, ascending.
    pub failed: Vec<FrameIndex>,
}

impl PreloadReport {
    /// Return `true` when every frame loaded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fetch and decode every frame of `sequence`, tolerating per-frame failures.
///
/// All fetches are issued onto the pool at once and settle in any order; this returns only after
/// every slot has a result. A failing frame never aborts the others.
#[tracing::instrument(skip(sequence, fetcher), fields(frames = sequence.len()))]
pub fn preload(
    sequence: &FrameSequence,
    fetcher: &dyn FrameFetcher,
    opts: &PreloadOpts,
) -> ScrubResult<(FrameCache, PreloadReport)> {
    let pool = build_thread_pool(opts.threads)?;

    let results: Vec<(FrameIndex, ScrubResult<PreparedFrame>)> = pool.install(|| {
        (0..sequence.len())
            .into_par_iter()
            .map(|i| {
                let index = FrameIndex(i);
                (index, load_frame(sequence, fetcher, index))
            })
            .collect()
    });

    let mut builder = FrameCacheBuilder::new(sequence.len());
    for (index, result) in results {
        if let Err(err) = &result {
            tracing::warn!(frame = index.0, error = %err, "frame unavailable");
        }
        builder.record_load_result(index, result)?;
    }

    let (cache, report) = builder.finish()?;
    tracing::debug!(
        loaded = report.loaded,
        failed = report.failed.len(),
        "preload settled"
    );
    Ok((cache, report))
}

fn load_frame(
    sequence: &FrameSequence,
    fetcher: &dyn FrameFetcher,
    index: FrameIndex,
) -> ScrubResult<PreparedFrame> {
    let location = sequence.location(index);
    let bytes = fetcher.fetch(&location)?;
    decode_frame(&bytes)
        .map_err(|e| ScrubError::asset(format!("decode frame '{location}': {e}")))
}

fn build_thread_pool(threads: Option<usize>) -> ScrubResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScrubError::validation(
            "preload 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScrubError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
