use std::fmt::{Debug, Display, Formatter};
use std::ops::Not;

use serde::{Deserialize, Serialize};

/// Logic level carried by a [`Signal`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SignalState {
    Low,
    High,
    #[default]
    Unknown,
    HighZ,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Signal {
    state: SignalState,
    bit_width: u32,
    value: u64,
}

impl Default for Signal {
    fn default() -> Self {
        Self::unknown()
    }
}

// Constructors
impl Signal {
    pub const fn unknown() -> Self {
        Self {
            state: SignalState::Unknown,
            bit_width: 1,
            value: 0,
        }
    }

    pub const fn high_z() -> Self {
        Self {
            state: SignalState::HighZ,
            bit_width: 1,
            value: 0,
        }
    }

    pub const fn low() -> Self {
        Self::from_bool(false)
    }

    pub const fn high() -> Self {
        Self::from_bool(true)
    }

    pub const fn from_bool(b: bool) -> Self {
        Self {
            state: if b { SignalState::High } else { SignalState::Low },
            bit_width: 1,
            value: b as u64,
        }
    }

    /// Zero is LOW, any other value is HIGH with the value kept for multi-bit use.
    pub fn from_int(value: u64, bit_width: u32) -> Self {
        assert!(bit_width >= 1, "Bit width should be at least 1");
        let state = if value == 0 { SignalState::Low } else { SignalState::High };
        Self { state, bit_width, value }
    }
}

// Getters
impl Signal {
    pub const fn state(&self) -> SignalState {
        self.state
    }

    pub const fn bit_width(&self) -> u32 {
        self.bit_width
    }

    pub const fn value(&self) -> u64 {
        self.value
    }
}

// Checks
impl Signal {
    /// Boolean coercion: only HIGH is true.
    pub const fn is_high(&self) -> bool {
        matches!(self.state, SignalState::High)
    }

    pub const fn is_low(&self) -> bool {
        matches!(self.state, SignalState::Low)
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self.state, SignalState::Unknown)
    }

    pub const fn is_known(&self) -> bool {
        matches!(self.state, SignalState::Low | SignalState::High)
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Self {
        Self::from_bool(b)
    }
}

impl From<Signal> for bool {
    fn from(signal: Signal) -> Self {
        signal.is_high()
    }
}

impl Not for Signal {
    type Output = Self;

    /// Inverts a known level; UNKNOWN and HIGHZ stay as they are.
    fn not(self) -> Self::Output {
        match self.state {
            SignalState::Low => Signal::high(),
            SignalState::High => Signal::low(),
            _ => self,
        }
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.state {
            SignalState::Low => write!(f, "0"),
            SignalState::High if self.bit_width > 1 => write!(f, "{:#x}", self.value),
            SignalState::High => write!(f, "1"),
            SignalState::Unknown => write!(f, "X"),
            SignalState::HighZ => write!(f, "Z"),
        }
    }
}

impl Debug for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
