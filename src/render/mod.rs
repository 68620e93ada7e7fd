pub(crate) mod cpu;
pub(crate) mod fade;
pub(crate) mod surface;
