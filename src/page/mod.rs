pub(crate) mod active;
pub(crate) mod parallax;
pub(crate) mod reveal;
