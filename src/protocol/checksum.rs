use derive_more::{Display, From, Into};

use crate::protocol::crc::CrcRemainder;

/// The checksum that closes a transmission, sent after every frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Display, From, Into)]
#[display("{:#06X}", _0)]
pub struct Checksum(pub u16);

impl Checksum {
    pub const fn value(&self) -> u16 {
        self.0
    }
}

/// End-around-carry sum of CRC remainders.
///
/// Each addition of a 16-bit value can carry at most one bit past bit 15,
/// so a carry is folded back in as `+ 1`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChecksumAccumulator {
    sum: u32,
}

impl ChecksumAccumulator {
    pub fn push(&mut self, crc: CrcRemainder) {
        self.sum += crc.value() as u32;
        if self.sum > 0xFFFF {
            self.sum = (self.sum & 0xFFFF) + 1;
        }
    }

    pub fn sum(&self) -> u16 {
        self.sum as u16
    }

    /// Two's complement negation of the folded sum.
    pub fn finish(self) -> Checksum {
        Checksum((!(self.sum as u16)).wrapping_add(1))
    }
}

impl Extend<CrcRemainder> for ChecksumAccumulator {
    fn extend<T: IntoIterator<Item = CrcRemainder>>(&mut self, iter: T) {
        iter.into_iter().for_each(|crc| self.push(crc));
    }
}

pub fn checksum(remainders: &[CrcRemainder]) -> Checksum {
    let mut accumulator = ChecksumAccumulator::default();
    accumulator.extend(remainders.iter().copied());
    accumulator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crcs(values: &[u16]) -> Vec<CrcRemainder> {
        values.iter().copied().map(CrcRemainder).collect()
    }

    #[test]
    fn test_fold_with_carry() {
        let mut accumulator = ChecksumAccumulator::default();
        accumulator.extend(crcs(&[0x0001, 0xFFFF]));
        assert_eq!(accumulator.sum(), 0x0001);
        assert_eq!(accumulator.finish(), Checksum(0xFFFF));
    }

    #[test]
    fn test_all_zero_is_zero() {
        assert_eq!(checksum(&crcs(&[0, 0, 0])), Checksum(0));
        assert_eq!(checksum(&[]), Checksum(0));
    }

    #[test]
    fn test_negation_is_twos_complement() {
        assert_eq!(checksum(&crcs(&[0x1234])), Checksum(0xEDCC));
        // A one's complement negation would give 0xEDCB here.
        assert_ne!(checksum(&crcs(&[0x1234])), Checksum(!0x1234));
    }

    #[test]
    fn test_repeated_carries() {
        // 0xFFFF + 0xFFFF = 0x1FFFE -> 0xFFFF, then + 0xFFFF -> 0xFFFF again
        let mut accumulator = ChecksumAccumulator::default();
        accumulator.extend(crcs(&[0xFFFF, 0xFFFF, 0xFFFF]));
        assert_eq!(accumulator.sum(), 0xFFFF);
        assert_eq!(accumulator.finish(), Checksum(0x0001));
    }

    #[test]
    fn test_display() {
        assert_eq!(Checksum(0xBEEF).to_string(), "0xBEEF");
        assert_eq!(Checksum(0x00AB).to_string(), "0x00AB");
    }
}
