//! docnode - documented entity inspector
//!
//! Reads compiler-generated XML documentation files and shows the entities
//! they describe, with descriptions derived from their doc comments.
//!
//! ## Quick Start
//!
//! ```bash
//! # List everything documented in an assembly
//! docnode inspect MyLib.xml
//!
//! # Only methods, as JSON
//! docnode inspect MyLib.xml --kind method --json
//!
//! # Write a project-local configuration file
//! docnode config init
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
