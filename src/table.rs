pub(crate) mod angles;
pub(crate) mod indexer;
pub(crate) mod layout;
pub(crate) mod sizes;
