//! Small value types shared by the circuit model.
//!
//! Pins and wires never hold references to each other. A wire names its two
//! endpoints with [`PinRef`] handles (owning component id plus pin name), and the
//! circuit resolves those handles on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Layout coordinates. Not used by the simulation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Input,
    Output,
    InOut,
}

impl PinDirection {
    pub fn is_input(self) -> bool {
        self == PinDirection::Input
    }

    pub fn is_output(self) -> bool {
        self == PinDirection::Output
    }
}

/// A stable handle to a pin: the owning component's id and the pin's name.
///
/// # Invariants
///
/// - A handle stored in a wire always resolves while that wire is in the circuit.
/// - Handles survive serialization, object identity does not.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct PinRef {
    pub component: String,
    pub pin: String,
}

impl PinRef {
    pub fn new(component: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_ref_display() {
        let r = PinRef::new("comp_0", "out");
        assert_eq!(r.to_string(), "comp_0.out");
    }

    #[test]
    fn test_position_offset() {
        let p = Position::new(10.0, 20.0).offset(5.0, -5.0);
        assert_eq!(p, Position::new(15.0, 15.0));
    }

    #[test]
    fn test_direction_checks() {
        assert!(PinDirection::Input.is_input());
        assert!(!PinDirection::InOut.is_input());
        assert!(PinDirection::Output.is_output());
        assert!(!PinDirection::InOut.is_output());
    }
}
