pub(crate) mod records;
pub(crate) mod seed;
