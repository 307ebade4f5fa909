pub(crate) mod calendar;
pub(crate) mod core;
pub(crate) mod error;
