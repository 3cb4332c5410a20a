//! # CLI Module
//!
//! Command implementations behind the `vibester` binary. The binary itself
//! only parses arguments and loads the configuration; the work happens here.
//!
//! - [`serve`] - runs the web app until the process is stopped
//!
//! ## Usage
//!
//! ```bash
//! vibester serve                          # listen on SERVER_ADDRESS
//! vibester serve --address 0.0.0.0:8080   # override the address
//! vibester serve --open                   # and open the landing page
//! vibester completions zsh                # shell completions
//! ```

mod serve;

pub use serve::serve;
