
#[allow(unused)]
#[macro_use]
extern crate tracing;

pub mod args;
pub mod log;
pub mod pagination;
pub mod utils;
