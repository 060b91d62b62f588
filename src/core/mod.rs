//! Core module: Lock-Free MPMC Ring
//!
//! Prinsip desain:
//! - Lock-Free: Hanya compare-and-exchange, tidak ada Mutex/Condvar
//! - No-Allocation: Semua slot pre-allocated saat init
//! - Cache-line isolation: Setiap slot dan cursor di cache line sendiri

mod cache_line;
mod capacity;
mod ring;
mod slot;

pub use cache_line::{detected_line_size, CACHE_LINE};
pub use capacity::{round_up_to_power_of_two, Capacity};
pub use ring::Ring;
