use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::assets::fetch::MemoryFrameFetcher;
use crate::assets::sequence::FrameTemplate;

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn fetcher_without(seq: &FrameSequence, skip: &[u32]) -> MemoryFrameFetcher {
    let png = tiny_png();
    let mut f = MemoryFrameFetcher::new();
    for idx in seq.indices() {
        if !skip.contains(&idx.0) {
            f.insert(seq.location(idx), png.clone());
        }
    }
    f
}

struct CountingFetcher {
    inner: MemoryFrameFetcher,
    calls: AtomicUsize,
}

impl FrameFetcher for CountingFetcher {
    fn fetch(&self, location: &str) -> ScrubResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(location)
    }
}

#[test]
fn preload_settles_with_partial_failures() {
    let seq = FrameSequence::new(248, FrameTemplate::new("hero/")).unwrap();
    let missing = [0u32, 17, 100, 246, 247];
    let fetcher = fetcher_without(&seq, &missing);

    let (cache, report) = preload(&seq, &fetcher, &PreloadOpts::default()).unwrap();

    assert_eq!(report.total, 248);
    assert_eq!(report.loaded, 243);
    assert_eq!(
        report.failed,
        missing.iter().copied().map(FrameIndex).collect::<Vec<_>>()
    );
    assert!(!report.is_complete());
    assert_eq!(cache.len(), 248);
    for i in 0..248u32 {
        assert_eq!(
            cache.get(FrameIndex(i)).is_some(),
            !missing.contains(&i),
            "slot {i}"
        );
    }
}

#[test]
fn preload_fetches_each_frame_exactly_once() {
    let seq = FrameSequence::new(32, FrameTemplate::new("f")).unwrap();
    let fetcher = CountingFetcher {
        inner: fetcher_without(&seq, &[]),
        calls: AtomicUsize::new(0),
    };
    let opts = PreloadOpts { threads: Some(4) };

    let (cache, report) = preload(&seq, &fetcher, &opts).unwrap();

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 32);
    assert!(report.is_complete());
    assert_eq!(cache.loaded_count(), 32);
}

#[test]
fn undecodable_bytes_settle_as_missing() {
    let seq = FrameSequence::new(3, FrameTemplate::new("f")).unwrap();
    let mut fetcher = fetcher_without(&seq, &[]);
    fetcher.insert(seq.location(FrameIndex(1)), b"not an image".to_vec());

    let (cache, report) = preload(&seq, &fetcher, &PreloadOpts::default()).unwrap();
    assert_eq!(report.failed, vec![FrameIndex(1)]);
    assert!(matches!(cache.slot(FrameIndex(1)), Some(FrameSlot::Missing)));
}

#[test]
fn zero_threads_is_rejected() {
    let seq = FrameSequence::new(1, FrameTemplate::new("f")).unwrap();
    let fetcher = MemoryFrameFetcher::new();
    let opts = PreloadOpts { threads: Some(0) };
    assert!(preload(&seq, &fetcher, &opts).is_err());
}

#[test]
fn builder_settles_each_slot_once() {
    let mut b = FrameCacheBuilder::new(2);
    assert_eq!(b.pending(), 2);
    b.record_load_result(FrameIndex(0), Err(ScrubError::asset("gone")))
        .unwrap();
    assert!(
        b.record_load_result(FrameIndex(0), Err(ScrubError::asset("again")))
            .is_err()
    );
    assert!(
        b.record_load_result(FrameIndex(5), Err(ScrubError::asset("oob")))
            .is_err()
    );
    assert_eq!(b.pending(), 1);
}

#[test]
fn builder_refuses_to_finish_with_pending_slots() {
    let b = FrameCacheBuilder::new(3);
    assert!(b.finish().is_err());
}

#[test]
fn out_of_range_lookup_is_none() {
    let mut b = FrameCacheBuilder::new(1);
    b.record_load_result(FrameIndex(0), Err(ScrubError::asset("gone")))
        .unwrap();
    let (cache, _) = b.finish().unwrap();
    assert!(cache.slot(FrameIndex(3)).is_none());
    assert!(cache.get(FrameIndex(0)).is_none());
}
