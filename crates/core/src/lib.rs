#![forbid(unsafe_code)]

pub mod model;
pub mod page;
pub mod wire;
