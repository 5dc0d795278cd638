use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Innings pitched, counted in outs (thirds of an inning).
///
/// On the wire this is the scorebook decimal `whole.tenths`, where the tenths
/// digit is restricted to 0, 1 or 2 and stands for 0, 1/3 or 2/3 of an inning.
/// Keeping the count in thirds makes every step carry in base 3, so `0.2`
/// plus one out is `1.0`, never `0.3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct InningsPitched {
    thirds: u32,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0} is not a valid innings-pitched value (tenths digit must be 0, 1 or 2)")]
pub struct InvalidInningsPitched(pub f64);

impl InningsPitched {
    pub const ZERO: InningsPitched = InningsPitched { thirds: 0 };

    pub const fn from_thirds(thirds: u32) -> Self {
        Self { thirds }
    }

    pub const fn from_whole(innings: u32) -> Self {
        Self { thirds: innings * 3 }
    }

    pub const fn thirds(self) -> u32 {
        self.thirds
    }

    pub const fn whole(self) -> u32 {
        self.thirds / 3
    }

    /// The tenths digit of the decimal encoding: 0, 1 or 2.
    pub const fn partial(self) -> u32 {
        self.thirds % 3
    }

    pub const fn is_zero(self) -> bool {
        self.thirds == 0
    }

    pub fn increment(&mut self) {
        self.thirds += 1;
    }

    /// Steps back one out; stays at zero once there.
    pub fn decrement(&mut self) {
        self.thirds = self.thirds.saturating_sub(1);
    }

    /// Applies `delta` single-out steps, forward or back.
    pub fn step(&mut self, delta: i32) {
        if delta >= 0 {
            self.thirds = self.thirds.saturating_add(delta.unsigned_abs());
        } else {
            self.thirds = self.thirds.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Decimal scorebook encoding, e.g. `4.2` for four and two-thirds.
    pub fn as_decimal(self) -> f64 {
        self.whole() as f64 + self.partial() as f64 / 10.0
    }

    /// True innings as a real number, for rate stats.
    pub fn as_innings(self) -> f64 {
        self.thirds as f64 / 3.0
    }
}

impl TryFrom<f64> for InningsPitched {
    type Error = InvalidInningsPitched;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(InvalidInningsPitched(value));
        }
        let whole = value.trunc();
        let tenths = ((value - whole) * 10.0).round() as u32;
        if tenths > 2 {
            return Err(InvalidInningsPitched(value));
        }
        Ok(Self { thirds: whole as u32 * 3 + tenths })
    }
}

impl From<InningsPitched> for f64 {
    fn from(ip: InningsPitched) -> f64 {
        ip.as_decimal()
    }
}

impl Add for InningsPitched {
    type Output = InningsPitched;

    fn add(self, rhs: InningsPitched) -> InningsPitched {
        InningsPitched { thirds: self.thirds + rhs.thirds }
    }
}

impl Sum for InningsPitched {
    fn sum<I: Iterator<Item = InningsPitched>>(iter: I) -> Self {
        iter.fold(InningsPitched::ZERO, Add::add)
    }
}

impl fmt::Display for InningsPitched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.partial() {
            0 => write!(f, "{}", self.whole()),
            p => write!(f, "{} {}/3", self.whole(), p),
        }
    }
}
