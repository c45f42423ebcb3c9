pub mod direction;
pub mod error;
pub mod grid;
pub mod state;
