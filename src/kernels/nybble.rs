//! Pure nibble mapping kernels.
//!
//! Each byte splits into its low 4 bits and its high 4 bits. The high half is
//! either shifted down ("normalized", `0xA0 -> 0x0A`) or kept in place.

/// Low nibble of every byte.
pub fn low_nibbles(data: &[u8]) -> Vec<u8> {
    data.iter().map(|&b| b & 0x0F).collect()
}

/// High nibble of every byte, shifted down to `0x00..=0x0F` when `normalize`
/// is set, otherwise masked in place.
pub fn high_nibbles(data: &[u8], normalize: bool) -> Vec<u8> {
    if normalize {
        data.iter().map(|&b| (b & 0xF0) >> 4).collect()
    } else {
        data.iter().map(|&b| b & 0xF0).collect()
    }
}
