//! 内容与比特序列之间的转换。
//!
//! 每个字节编码为 [`BITS_PER_UNIT`] 个比特，高位在前。

use crate::{disk::Bit, fs::config::BITS_PER_UNIT};

pub fn encode(content: &[u8]) -> Vec<Bit> {
    let mut bits = Vec::with_capacity(content.len() * BITS_PER_UNIT);
    for &byte in content {
        for shift in (0..BITS_PER_UNIT).rev() {
            bits.push(byte & (1 << shift) != 0);
        }
    }
    bits
}

/// 逐 8 比特还原字节，末尾不足一个单元的比特按 0 补齐
pub fn decode(bits: &[Bit]) -> Vec<u8> {
    bits.chunks(BITS_PER_UNIT)
        .map(|chunk| {
            let mut byte = 0u8;
            for i in 0..BITS_PER_UNIT {
                byte = (byte << 1) | chunk.get(i).copied().unwrap_or(false) as u8;
            }
            byte
        })
        .collect()
}

/// 内容占用的比特数
pub fn bit_length(content: &[u8]) -> usize {
    content.len() * BITS_PER_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_msb_first() {
        // 'H' = 0x48 = 0b0100_1000
        let bits = encode(b"H");
        let expected = [false, true, false, false, true, false, false, false];
        assert_eq!(bits, expected);
    }

    #[test]
    fn decode_inverts_encode() {
        let content = "Hi, FAT! ✓".as_bytes();
        assert_eq!(decode(&encode(content)), content);
    }

    #[test]
    fn short_tail_is_zero_padded() {
        assert_eq!(decode(&[true]), vec![0x80]);
        assert!(decode(&[]).is_empty());
    }

    #[test]
    fn bit_length_counts_units() {
        assert_eq!(bit_length(b"Hi"), 16);
        assert_eq!(bit_length(b""), 0);
    }
}
