//! Error types
//!
//! `Full` dan `Empty` adalah kondisi normal saat producer dan consumer tidak
//! seimbang, jadi caller biasanya langsung match. `Error` dipakai kalau
//! caller butuh satu tipe untuk di-propagate dengan `?`.

use thiserror::Error;

/// Dikembalikan `put` kalau tidak ada slot kosong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("ring buffer is full")]
pub struct Full;

/// Dikembalikan `get` kalau tidak ada elemen untuk diambil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("ring buffer is empty")]
pub struct Empty;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Full(#[from] Full),

    #[error(transparent)]
    Empty(#[from] Empty),

    /// Power of two tidak muat di `usize`, atau slot array-nya melebihi
    /// `isize::MAX` byte
    #[error("capacity {requested} is too large for a ring")]
    CapacityOverflow { requested: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn drain_one(res: std::result::Result<u32, Empty>) -> Result<u32> {
        Ok(res?)
    }

    #[test]
    fn test_conversion_into_error() {
        assert_eq!(drain_one(Ok(7)), Ok(7));
        assert_eq!(drain_one(Err(Empty)), Err(Error::Empty(Empty)));
        assert_eq!(Error::from(Full), Error::Full(Full));
    }

    #[test]
    fn test_messages() {
        assert_eq!(Full.to_string(), "ring buffer is full");
        assert_eq!(Error::from(Empty).to_string(), "ring buffer is empty");
        assert_eq!(
            Error::CapacityOverflow { requested: 3 }.to_string(),
            "capacity 3 is too large for a ring"
        );
    }
}
