//! Solidity compiler configuration and a driver for `solc`'s standard JSON
//! interface.
mod settings;
mod solc;

pub use {
    settings::{BytecodeHash, CompilerSettings, Metadata, Optimizer},
    solc::{Solc, StandardJsonOutput},
};
