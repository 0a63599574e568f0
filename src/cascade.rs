pub(crate) mod destination;
pub(crate) mod discovery;
pub(crate) mod driver;
pub(crate) mod source;
