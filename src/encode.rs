pub(crate) mod legend;
pub(crate) mod marker;
