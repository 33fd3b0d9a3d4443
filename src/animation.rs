pub(crate) mod opts;
pub(crate) mod scheduler;
pub(crate) mod ticker;
