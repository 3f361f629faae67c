mod eval;
mod value;

pub(crate) use eval::calculate;
