pub(crate) mod bounds;
pub(crate) mod decode;
pub(crate) mod store;
