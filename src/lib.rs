//! Hermes Ring - Lock-Free MPMC Ring Buffer
//!
//! Ring berkapasitas tetap untuk mengoper reference antar producer dan
//! consumer tanpa lock, tanpa blocking wait, dan tanpa alokasi setelah
//! konstruksi.
//!
//! Arsitektur:
//! - Capacity manager: power of two + mask
//! - Index pair: `head`/`tail`, masing-masing di cache line sendiri
//! - Slot array: state machine per-slot, satu slot satu cache line

pub mod config;
pub mod core;
pub mod error;

pub use crate::config::{CursorAdvance, RingConfig};
pub use crate::core::{Ring, CACHE_LINE};
pub use crate::error::{Empty, Error, Full, Result};
