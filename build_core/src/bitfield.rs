use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest power of ten that fits in a u64
const CHUNK: u64 = 10_000_000_000_000_000_000;
const CHUNK_DIGITS: usize = 19;

/// Longest decimal string accepted when parsing
pub const MAX_DIGITS: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBitFieldError {
    #[error("empty bitfield")]
    Empty,
    #[error("invalid digit {0:?} in bitfield")]
    InvalidDigit(char),
    #[error("bitfield longer than {MAX_DIGITS} digits")]
    TooLong,
}

/// A set of small integer ids packed into an unbounded unsigned integer.
///
/// Bit `i` is set when id `i` is a member. The decimal rendering is what goes
/// into share links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitField {
    /// Little-endian limbs, no trailing zero limbs
    words: Vec<u64>,
}

impl BitField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I: IntoIterator<Item = u32>>(ids: I) -> Self {
        let mut field = BitField::new();
        for id in ids {
            field.set(id);
        }
        field
    }

    pub fn set(&mut self, id: u32) {
        let word = (id / 64) as usize;
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << (id % 64);
    }

    pub fn contains(&self, id: u32) -> bool {
        let word = (id / 64) as usize;
        self.words
            .get(word)
            .is_some_and(|w| w & (1 << (id % 64)) != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Member ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().enumerate().flat_map(|(index, word)| {
            (0..64u32)
                .filter(move |bit| word & (1 << bit) != 0)
                .map(move |bit| index as u32 * 64 + bit)
        })
    }

    /// Member ids no greater than `max`, ascending
    pub fn ids_up_to(&self, max: u32) -> Vec<u32> {
        self.ids().take_while(|id| *id <= max).collect()
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }

    /// self = self * factor + addend
    fn mul_add(&mut self, factor: u64, addend: u64) {
        let mut carry = addend as u128;
        for word in self.words.iter_mut() {
            let product = (*word as u128) * (factor as u128) + carry;
            *word = product as u64;
            carry = product >> 64;
        }
        if carry > 0 {
            self.words.push(carry as u64);
        }
        self.trim();
    }

    /// Divide in place, returning the remainder
    fn div_rem(&mut self, divisor: u64) -> u64 {
        let mut remainder: u128 = 0;
        for word in self.words.iter_mut().rev() {
            let current = (remainder << 64) | (*word as u128);
            *word = (current / divisor as u128) as u64;
            remainder = current % divisor as u128;
        }
        self.trim();
        remainder as u64
    }
}

impl FromIterator<u32> for BitField {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        BitField::from_ids(iter)
    }
}

impl fmt::Display for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }

        let mut value = self.clone();
        let mut chunks = Vec::new();
        while !value.is_empty() {
            chunks.push(value.div_rem(CHUNK));
        }

        let mut iter = chunks.iter().rev();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for chunk in iter {
            write!(f, "{:0width$}", chunk, width = CHUNK_DIGITS)?;
        }
        Ok(())
    }
}

impl FromStr for BitField {
    type Err = ParseBitFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() {
            return Err(ParseBitFieldError::Empty);
        }
        if digits.len() > MAX_DIGITS {
            return Err(ParseBitFieldError::TooLong);
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ParseBitFieldError::InvalidDigit(bad));
        }

        let mut field = BitField::new();
        for chunk in digits.as_bytes().chunks(CHUNK_DIGITS) {
            let mut value: u64 = 0;
            for byte in chunk {
                value = value * 10 + u64::from(byte - b'0');
            }
            field.mul_add(10u64.pow(chunk.len() as u32), value);
        }
        Ok(field)
    }
}
