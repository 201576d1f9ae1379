#[macro_use]
pub mod macros;

pub mod concrete;
pub mod errors;
pub mod ir;
pub mod syntax;
pub mod translate;
pub mod typing;
pub mod utils;
