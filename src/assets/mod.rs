pub(crate) mod cache;
pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod http;
pub(crate) mod sequence;
