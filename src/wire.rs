use crate::signal::Signal;
use crate::types::{PinDirection, PinRef};

/// A connection between two pins, owned by the circuit.
///
/// The source end is decided on every propagation: whichever endpoint is an
/// OUTPUT pin drives the other. With zero or two OUTPUT endpoints the wire
/// carries nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    /// Empty until the circuit assigns one.
    pub id: String,
    pub a: PinRef,
    pub b: PinRef,
    pub signal: Signal,
}

/// Which endpoint drives a wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Drive {
    AtoB,
    BtoA,
    None,
}

impl Drive {
    pub fn resolve(a: PinDirection, b: PinDirection) -> Drive {
        match (a.is_output(), b.is_output()) {
            (true, false) => Drive::AtoB,
            (false, true) => Drive::BtoA,
            _ => Drive::None,
        }
    }
}

impl Wire {
    pub fn new(a: PinRef, b: PinRef) -> Self {
        Self {
            id: String::new(),
            a,
            b,
            signal: Signal::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn touches(&self, pin: &PinRef) -> bool {
        &self.a == pin || &self.b == pin
    }

    pub fn touches_component(&self, component: &str) -> bool {
        self.a.component == component || self.b.component == component
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_resolution() {
        use PinDirection::*;
        assert_eq!(Drive::resolve(Output, Input), Drive::AtoB);
        assert_eq!(Drive::resolve(Input, Output), Drive::BtoA);
        assert_eq!(Drive::resolve(Output, Output), Drive::None);
        assert_eq!(Drive::resolve(Input, Input), Drive::None);
        assert_eq!(Drive::resolve(InOut, Input), Drive::None);
    }

    #[test]
    fn test_touches() {
        let w = Wire::new(PinRef::new("s", "out"), PinRef::new("g", "in0"));
        assert!(w.touches(&PinRef::new("g", "in0")));
        assert!(!w.touches(&PinRef::new("g", "in1")));
        assert!(w.touches_component("s"));
        assert!(!w.touches_component("led"));
    }
}
