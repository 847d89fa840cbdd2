#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use outcome::*;
pub use stats::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod config;
mod engine;
mod error;
mod outcome;
mod stats;
mod types;
