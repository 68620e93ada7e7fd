pub(crate) mod mapping;
pub(crate) mod scrubber;
pub(crate) mod smoothing;
