pub(crate) mod aggregate;
