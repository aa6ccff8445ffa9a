//! # Glescraft Entry Point
//!
//! Generates and draws a world headlessly and logs how it went.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

#[cfg(not(target_family = "wasm"))]
fn main() {
    if let Err(err) = glescraft::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_family = "wasm")]
fn main() {}
