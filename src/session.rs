pub(crate) mod offline;
pub(crate) mod player;
