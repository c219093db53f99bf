// Selection core: catalog discovery, contact field model, selection state, filter engine.
// Everything in here is pure. Prompting and I/O live in `session` and `storage`.

pub mod catalog;
pub mod contacts;
pub mod filter;
pub mod state;
