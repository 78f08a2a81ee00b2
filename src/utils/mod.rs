//! Text helpers used around the machine core.

pub mod grouping;
