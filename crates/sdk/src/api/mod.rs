//! Operation catalog: one method per image server endpoint.

pub mod classes;
pub mod code;
pub mod packages;
pub mod projects;
pub mod screen;
pub mod search;
pub mod settings;
pub mod testing;

pub use classes::*;
pub use code::*;
pub use packages::*;
pub use projects::*;
pub use screen::*;
pub use search::*;
pub use settings::*;
pub use testing::*;
