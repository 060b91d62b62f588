//! Konfigurasi saat konstruksi untuk [`Ring`](crate::Ring).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::Ring;
use crate::error::Result;

/// Cara `put`/`get` memajukan cursor head/tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CursorAdvance {
    /// Satu kali compare-and-exchange pada cursor, hasilnya diabaikan.
    /// Cursor hanya hint; state slot adalah gerbang yang sebenarnya. Thread
    /// yang menemukan slot sibuk akan yield lalu restart dari load cursor.
    ///
    /// Saat contention, value bisa mendarat di slot yang sudah dilewati
    /// cursor. Value itu baru terkirim setelah cursor memutar kembali, jadi
    /// drain bisa melaporkan `Empty` padahal masih ada value yang parkir.
    Optimistic,

    /// Advance cursor diulang sampai thread ini menang, jadi setiap operasi
    /// yang lolos memiliki posisi sendiri. Slot yang sibuk ditunggu (yield,
    /// coba slot yang sama) dan tidak ditinggalkan. Setiap `put` yang
    /// berhasil diambil tepat satu kali oleh `get`, sesuai urutan cursor.
    #[default]
    Exclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RingConfig {
    /// Jumlah slot yang diminta, dibulatkan ke power of two saat build.
    pub capacity: usize,
    pub advance: CursorAdvance,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            advance: CursorAdvance::default(),
        }
    }
}

impl RingConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn advance(mut self, advance: CursorAdvance) -> Self {
        self.advance = advance;
        self
    }

    pub fn build<'a, T: ?Sized>(self) -> Result<Ring<'a, T>> {
        Ring::with_config(self)
    }
}
