//! Lock-Free Multi-Producer Multi-Consumer (MPMC) Ring
//!
//! Ring menyimpan *reference* (`&'a T`), bukan value. Ring tidak pernah
//! mengalokasi, meng-copy, atau membebaskan `T`; lifetime `'a` adalah
//! kesepakatan antara producer dan consumer.
//!
//! Dua lapis sinkronisasi:
//! - Cursor `head`/`tail`: di-advance dengan compare-and-exchange.
//! - State per-slot: gerbang admission yang sebenarnya
//!   (`Writable -> Writing -> Readable -> Reading -> Writable`).
//!
//! Tidak ada Mutex, tidak ada alokasi setelah inisialisasi. Thread yang
//! kalah balapan spin (state sama) atau yield ke scheduler (state lain).

use std::fmt;
use std::hint;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crossbeam_utils::CachePadded;
use tracing::{debug, trace, warn};

use super::cache_line::{detected_line_size, CACHE_LINE};
use super::capacity::Capacity;
use super::slot::{Slot, SlotState};
use crate::config::{CursorAdvance, RingConfig};
use crate::error::{Empty, Error, Full, Result};

/// Lock-Free MPMC Ring
///
/// `head` dan `tail` masing-masing menempati cache line sendiri, begitu juga
/// setiap slot, untuk menghindari false sharing antara producer dan consumer.
///
/// ```
/// use hermes_ring::Ring;
///
/// let value = 42;
/// let ring: Ring<'_, u64> = Ring::new(6);
///
/// ring.put(&value).unwrap();
/// assert_eq!(ring.get(), Ok(&42));
/// assert!(ring.get().is_err());
/// ```
#[repr(C)]
pub struct Ring<'a, T: ?Sized> {
    // Producer side. Posisi terus naik (wrapping), index slot = posisi & mask
    head: CachePadded<AtomicUsize>,
    // Consumer side
    tail: CachePadded<AtomicUsize>,
    // Pre-allocated sekali di constructor
    slots: Box<[CachePadded<Slot<'a, T>>]>,
    capacity: Capacity,
    advance: CursorAdvance,
}

impl<'a, T: ?Sized> Ring<'a, T> {
    /// Membuat ring dengan jumlah slot = power of two >= `capacity`.
    /// Usable capacity satu lebih kecil dari itu.
    ///
    /// # Panics
    /// Panic jika power of two tersebut tidak muat di `usize`.
    /// Gunakan [`Ring::try_new`] untuk versi yang mengembalikan error.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(ring) => ring,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self> {
        Self::with_config(RingConfig::new(capacity))
    }

    pub fn with_config(config: RingConfig) -> Result<Self> {
        let capacity = Capacity::new(config.capacity)?;

        // Alokasi slice tidak boleh melebihi isize::MAX byte
        let bytes = capacity
            .slots()
            .checked_mul(mem::size_of::<CachePadded<Slot<'a, T>>>());
        if !matches!(bytes, Some(bytes) if bytes <= isize::MAX as usize) {
            return Err(Error::CapacityOverflow {
                requested: config.capacity,
            });
        }

        let slots: Box<[_]> = (0..capacity.slots())
            .map(|_| CachePadded::new(Slot::new()))
            .collect();

        debug!(
            requested = config.capacity,
            slots = capacity.slots(),
            usable = capacity.usable(),
            advance = ?config.advance,
            cache_line = CACHE_LINE,
            "ring created"
        );

        if let Some(host) = detected_line_size() {
            if host > CACHE_LINE {
                warn!(
                    host,
                    padding = CACHE_LINE,
                    "host cache line is wider than slot padding, adjacent slots may share a line"
                );
            }
        }

        Ok(Self {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            slots,
            capacity,
            advance: config.advance,
        })
    }

    /// Menaruh reference ke ring (producer side).
    ///
    /// Returns `Err(Full)` kalau hanya tersisa slot cadangan.
    pub fn put(&self, value: &'a T) -> Result<(), Full> {
        loop {
            // tail dulu, lalu head: menjamin tail <= head
            let tail = self.tail.load(Ordering::Acquire);
            let head = self.head.load(Ordering::Acquire);

            if head.wrapping_sub(tail) >= self.capacity.mask() {
                return Err(Full);
            }

            if !self.advance_cursor(&self.head, head) {
                continue;
            }

            let slot = &self.slots[self.capacity.index(head)];
            if self.acquire(slot, SlotState::Writable, SlotState::Writing) {
                // SAFETY: klaim Writing dipegang thread ini
                unsafe { slot.write(value) };
                slot.release(SlotState::Readable);
                return Ok(());
            }
        }
    }

    /// Mengambil reference dari ring (consumer side).
    ///
    /// Returns `Err(Empty)` kalau `head == tail`.
    pub fn get(&self) -> Result<&'a T, Empty> {
        loop {
            let tail = self.tail.load(Ordering::Acquire);
            let head = self.head.load(Ordering::Acquire);

            if head == tail {
                return Err(Empty);
            }

            if !self.advance_cursor(&self.tail, tail) {
                continue;
            }

            let slot = &self.slots[self.capacity.index(tail)];
            if self.acquire(slot, SlotState::Readable, SlotState::Reading) {
                // SAFETY: klaim Reading dipegang thread ini, dan state
                // Readable berarti writer sudah selesai menulis
                let value = unsafe { slot.read() };
                slot.release(SlotState::Writable);
                return Ok(value);
            }
        }
    }

    /// Advance cursor dari `current` ke `current + 1`.
    ///
    /// `Optimistic`: satu kali CAS, hasilnya diabaikan, selalu lanjut ke slot.
    /// `Exclusive`: lanjut hanya kalau CAS menang; kalau kalah, caller
    /// mengulang dari load cursor.
    #[inline(always)]
    fn advance_cursor(&self, cursor: &AtomicUsize, current: usize) -> bool {
        let won = cursor
            .compare_exchange(
                current,
                current.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Relaxed,
            )
            .is_ok();

        match self.advance {
            CursorAdvance::Optimistic => true,
            CursorAdvance::Exclusive => {
                if !won {
                    hint::spin_loop();
                }
                won
            }
        }
    }

    /// Klaim slot `from -> to`. Returns `false` kalau operasi harus restart
    /// dari awal (hanya pada `Optimistic`).
    #[inline(always)]
    fn acquire(&self, slot: &Slot<'a, T>, from: SlotState, to: SlotState) -> bool {
        loop {
            match slot.claim(from, to) {
                Ok(()) => return true,
                Err(busy) => {
                    trace!(?busy, wanted = ?from, "slot busy, yielding");
                    thread::yield_now();

                    // Exclusive: posisi ini milik kita, tunggu di slot yang sama
                    if self.advance == CursorAdvance::Optimistic {
                        return false;
                    }
                }
            }
        }
    }

    /// Jumlah slot (power of two).
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity.slots()
    }

    /// Jumlah maksimum elemen yang bisa hidup bersamaan.
    #[inline(always)]
    pub fn usable_capacity(&self) -> usize {
        self.capacity.usable()
    }

    #[inline(always)]
    pub fn mask(&self) -> usize {
        self.capacity.mask()
    }

    #[inline(always)]
    pub fn advance(&self) -> CursorAdvance {
        self.advance
    }

    /// Snapshot jumlah elemen. Bisa stale saat ada operasi concurrent.
    #[inline(always)]
    pub fn len(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        head.wrapping_sub(tail).min(self.capacity.usable())
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity.usable()
    }

    /// Index slot yang akan diisi producer berikutnya, dalam `[0, capacity)`.
    #[inline(always)]
    pub fn head(&self) -> usize {
        self.capacity.index(self.head.load(Ordering::Acquire))
    }

    /// Index slot yang akan dikuras consumer berikutnya, dalam `[0, capacity)`.
    #[inline(always)]
    pub fn tail(&self) -> usize {
        self.capacity.index(self.tail.load(Ordering::Acquire))
    }
}

impl<T: ?Sized> fmt::Debug for Ring<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("capacity", &self.capacity.slots())
            .field("head", &self.head())
            .field("tail", &self.tail())
            .field("advance", &self.advance)
            .finish_non_exhaustive()
    }
}
