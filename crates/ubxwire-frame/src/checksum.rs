//! 8-bit Fletcher checksum used by UBX frames.

/// Compute `(ck_a, ck_b)` over class, id, length (little-endian) and payload.
///
/// `length` is the value carried in the header. It is passed separately from
/// `payload` so a receiver can check a frame whose payload was cut short.
pub fn checksum(class: u8, id: u8, length: u16, payload: &[u8]) -> (u8, u8) {
    let [len_lo, len_hi] = length.to_le_bytes();
    let mut ck_a = 0u8;
    let mut ck_b = 0u8;

    for &byte in [class, id, len_lo, len_hi].iter().chain(payload) {
        ck_a = ck_a.wrapping_add(byte);
        ck_b = ck_b.wrapping_add(ck_a);
    }

    (ck_a, ck_b)
}
