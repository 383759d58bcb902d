pub mod config;
pub mod game;
pub mod generator;
pub mod matrix;
pub mod puzzle;
pub mod session;
pub mod stats;
mod utils;

pub use utils::CellFloat;
pub use utils::RowOperations;
pub use utils::UpperTriangular;
pub use utils::{format_cell, WIN_TOLERANCE};

pub use puzzle::{GameObserver, NoopObserver, Puzzle};
