use std::fmt;

use crate::constants::FRAME_BITS;

const FRAME_MASK: u128 = (1 << FRAME_BITS) - 1;
pub const FRAME_BYTES: usize = FRAME_BITS.div_ceil(8);

/// Exactly 100 bits of the source stream, most significant bit first.
///
/// Bit 0 (the first bit on the wire) lives at position 99 of the inner
/// integer, so the frame reads left to right like the source bytes do.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Frame {
    bits: u128,
}

impl Frame {
    pub const ZERO: Frame = Frame { bits: 0 };

    /// Build a frame from its integer form. Bits above the 100th are dropped.
    pub const fn from_u128(bits: u128) -> Self {
        Frame {
            bits: bits & FRAME_MASK,
        }
    }

    /// Build a frame from up to 100 bits, right-padding with zeros.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut builder = FrameBuilder::default();
        for bit in bits.into_iter().take(FRAME_BITS) {
            builder.push(bit);
        }
        builder.finish().unwrap_or(Frame::ZERO)
    }

    pub const fn as_u128(&self) -> u128 {
        self.bits
    }

    /// The `index`-th bit on the wire. Panics when `index >= 100`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < FRAME_BITS, "bit index {index} out of range");
        (self.bits >> (FRAME_BITS - 1 - index)) & 1 == 1
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..FRAME_BITS).map(|index| self.bit(index))
    }

    pub fn with_flipped_bit(&self, index: usize) -> Frame {
        assert!(index < FRAME_BITS, "bit index {index} out of range");
        Frame {
            bits: self.bits ^ (1 << (FRAME_BITS - 1 - index)),
        }
    }

    /// Left aligned bytes. The low nibble of the last byte is always zero.
    pub fn to_bytes(&self) -> [u8; FRAME_BYTES] {
        let aligned = self.bits << (FRAME_BYTES * 8 - FRAME_BITS);
        let wide = aligned.to_be_bytes();
        let mut out = [0u8; FRAME_BYTES];
        out.copy_from_slice(&wide[wide.len() - FRAME_BYTES..]);
        out
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = FRAME_BITS)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({self})")
    }
}

#[derive(Default)]
struct FrameBuilder {
    bits: u128,
    len: usize,
}

impl FrameBuilder {
    fn push(&mut self, bit: bool) {
        self.bits = (self.bits << 1) | bit as u128;
        self.len += 1;
    }

    fn is_full(&self) -> bool {
        self.len == FRAME_BITS
    }

    // Pads the low-order end with zeros.
    fn finish(self) -> Option<Frame> {
        (self.len > 0).then(|| Frame::from_u128(self.bits << (FRAME_BITS - self.len)))
    }
}

/// Lazily cuts a byte stream into frames.
pub struct Frames<'a> {
    bytes: std::slice::Iter<'a, u8>,
    carry: Option<(u8, u32)>,
}

impl<'a> Frames<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Frames {
            bytes: bytes.iter(),
            carry: None,
        }
    }

    fn next_bit(&mut self) -> Option<bool> {
        let (byte, remaining) = match self.carry.take() {
            Some(state) => state,
            None => (*self.bytes.next()?, 8),
        };
        let bit = (byte >> (remaining - 1)) & 1 == 1;
        if remaining > 1 {
            self.carry = Some((byte, remaining - 1));
        }
        Some(bit)
    }
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let mut builder = FrameBuilder::default();
        while !builder.is_full() {
            match self.next_bit() {
                Some(bit) => builder.push(bit),
                None => break,
            }
        }
        builder.finish()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.carry.map_or(0, |(_, remaining)| remaining as usize);
        let bits = self.bytes.len() * 8 + pending;
        let frames = bits.div_ceil(FRAME_BITS);
        (frames, Some(frames))
    }
}

pub fn split_into_frames(bytes: &[u8]) -> Vec<Frame> {
    Frames::new(bytes).collect()
}

pub fn frame_count(byte_len: usize) -> usize {
    (byte_len * 8).div_ceil(FRAME_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(split_into_frames(&[]).is_empty());
        assert_eq!(frame_count(0), 0);
    }

    #[test]
    fn test_frame_count_matches_ceil() {
        for len in [1usize, 12, 13, 25, 26, 100, 1000, 1001] {
            let data = vec![0xA5; len];
            let frames = split_into_frames(&data);
            assert_eq!(frames.len(), (8 * len).div_ceil(100), "len = {len}");
            assert_eq!(frames.len(), frame_count(len));
            assert!(frames.len() * FRAME_BITS >= 8 * len);
            assert_eq!(Frames::new(&data).size_hint().0, frames.len());
        }
    }

    #[test]
    fn test_bits_are_msb_first() {
        let frames = split_into_frames(&[0b1000_0001, 0xFF]);
        assert_eq!(frames.len(), 1);
        let frame = frames[0];

        let expected = [true, false, false, false, false, false, false, true];
        for (index, bit) in expected.iter().enumerate() {
            assert_eq!(frame.bit(index), *bit, "bit {index}");
        }
        assert!((8..16).all(|index| frame.bit(index)));
        assert!((16..FRAME_BITS).all(|index| !frame.bit(index)));
    }

    #[test]
    fn test_thirteen_bytes_spill_into_second_frame() {
        let data: Vec<u8> = (1..=13).collect();
        let frames = split_into_frames(&data);
        assert_eq!(frames.len(), 2);

        // 104 bits: the second frame carries the last 4 bits of byte 13.
        let tail = 13u8 & 0x0F;
        for index in 0..4 {
            assert_eq!(frames[1].bit(index), (tail >> (3 - index)) & 1 == 1);
        }
        assert!((4..FRAME_BITS).all(|index| !frames[1].bit(index)));
    }

    #[test]
    fn test_padding_is_zero() {
        let frames = split_into_frames(&[0xFF; 3]);
        assert_eq!(frames.len(), 1);
        assert!((0..24).all(|index| frames[0].bit(index)));
        assert!((24..FRAME_BITS).all(|index| !frames[0].bit(index)));
        assert_eq!(frames[0].as_u128().count_ones(), 24);
    }

    #[test]
    fn test_frames_reconstruct_stream() {
        let data: Vec<u8> = (0..=255u8).cycle().take(77).collect();
        let bits: Vec<bool> = split_into_frames(&data)
            .iter()
            .flat_map(|frame| frame.bits().collect::<Vec<_>>())
            .collect();

        let source_bits: Vec<bool> = data
            .iter()
            .flat_map(|byte| (0..8).rev().map(move |i| (*byte >> i) & 1 == 1))
            .collect();

        assert_eq!(&bits[..source_bits.len()], source_bits.as_slice());
        assert!(bits[source_bits.len()..].iter().all(|bit| !bit));
    }

    #[test]
    fn test_to_bytes_left_aligned() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF, 1, 2, 3, 4, 5, 6, 7, 8, 0x9A];
        let frame = split_into_frames(&data)[0];
        let bytes = frame.to_bytes();
        assert_eq!(&bytes[..12], &data[..12]);
        assert_eq!(bytes[12], 0x90);
    }

    #[test]
    fn test_flip_bit() {
        let frame = Frame::ZERO.with_flipped_bit(0).with_flipped_bit(99);
        assert!(frame.bit(0));
        assert!(frame.bit(99));
        assert_eq!(frame.as_u128(), (1 << 99) | 1);
        assert_eq!(frame.with_flipped_bit(0).with_flipped_bit(99), Frame::ZERO);
    }

    #[test]
    fn test_from_bits_pads() {
        let frame = Frame::from_bits([true, true]);
        assert_eq!(frame.as_u128(), 0b11 << 98);
        assert_eq!(Frame::from_bits(std::iter::empty()), Frame::ZERO);
    }
}
