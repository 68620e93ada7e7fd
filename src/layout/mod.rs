pub(crate) mod fit;
pub(crate) mod viewport;
