#[macro_use]
extern crate bitflags;

pub mod core;
pub mod geom;
