use std::fmt;

use crate::constants::{CCITT_GENERATOR, CRC_BITS};
use crate::protocol::framing::Frame;

const INDICATOR: u32 = 1 << CRC_BITS;
const REGISTER_MASK: u32 = INDICATOR - 1;

/// A degree-16 generator polynomial, x^16 term included.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Generator(u32);

impl Generator {
    pub const CCITT: Generator = Generator(CCITT_GENERATOR);

    /// Accepts only 17-bit patterns with both the x^16 and the x^0 term set.
    pub const fn new(polynomial: u32) -> Option<Generator> {
        let fits = polynomial & !(INDICATOR | REGISTER_MASK) == 0;
        if fits && polynomial & INDICATOR != 0 && polynomial & 1 != 0 {
            Some(Generator(polynomial))
        } else {
            None
        }
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::CCITT
    }
}

/// Frame check sequence of one frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CrcRemainder(pub u16);

impl CrcRemainder {
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for CrcRemainder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

impl fmt::Debug for CrcRemainder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CrcRemainder({:#06x})", self.0)
    }
}

impl From<CrcRemainder> for u16 {
    fn from(value: CrcRemainder) -> Self {
        value.0
    }
}

/// Bit-serial CRC over 100-bit frames.
///
/// The register is 17 bits wide: the low 16 bits are the running remainder
/// and bit 16 is the division indicator, i.e. the bit that is about to leave
/// the remainder. Whenever it is set the generator is subtracted (XORed),
/// which also clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrcEngine {
    generator: Generator,
}

impl CrcEngine {
    pub const fn new(generator: Generator) -> Self {
        CrcEngine { generator }
    }

    pub const fn generator(&self) -> Generator {
        self.generator
    }

    fn divide(&self, register: u32) -> u32 {
        if register & INDICATOR != 0 {
            register ^ self.generator.value()
        } else {
            register
        }
    }

    pub fn remainder(&self, frame: &Frame) -> CrcRemainder {
        let mut augmented = frame.bits().chain(std::iter::repeat_n(false, CRC_BITS));

        let mut register = augmented
            .by_ref()
            .take(CRC_BITS)
            .fold(0u32, |register, bit| (register << 1) | bit as u32);

        for bit in augmented {
            register = self.divide(register);
            register = ((register << 1) | bit as u32) & (INDICATOR | REGISTER_MASK);
        }
        register = self.divide(register);

        CrcRemainder((register & REGISTER_MASK) as u16)
    }

    pub fn remainders(&self, frames: &[Frame]) -> Vec<CrcRemainder> {
        frames.iter().map(|frame| self.remainder(frame)).collect()
    }

    /// Receiver side: does `frame` still match the FCS it was sent with?
    pub fn verify(&self, frame: &Frame, fcs: CrcRemainder) -> bool {
        self.remainder(frame) == fcs
    }
}
