//! CRC32 checksums for record file entries
//!
//! Uses CRC32 (IEEE polynomial). A mismatch on read is reported as
//! corruption and never skipped.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided data.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        let data = br#"{"name":"Arto Hellas","number":"040-123456"}"#;
        assert_eq!(compute_checksum(data), compute_checksum(data));
    }

    #[test]
    fn test_checksum_detects_single_bit_flip() {
        let mut data = b"040-123456".to_vec();
        let original = compute_checksum(&data);
        data[4] ^= 0x01;
        assert_ne!(original, compute_checksum(&data));
    }
}
