pub(crate) mod invocation;
pub(crate) mod magick;
