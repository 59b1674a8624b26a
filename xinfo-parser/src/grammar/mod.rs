mod evaluate;
mod fields;
mod registry;

pub(crate) use evaluate::{Pattern, identity};
pub(crate) use registry::lookup;
