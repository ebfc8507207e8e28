use indexmap::IndexMap;

use crate::signal::Signal;
use crate::types::{PinDirection, Position};

/// A named connection point owned by exactly one component.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub name: String,
    pub direction: PinDirection,
    /// Relative to the owning component.
    pub position: Position,
    pub signal: Signal,
    pub bit_width: u32,
}

impl Pin {
    pub fn new(name: impl Into<String>, direction: PinDirection, position: Position) -> Self {
        Self {
            name: name.into(),
            direction,
            position,
            signal: Signal::default(),
            bit_width: 1,
        }
    }

    pub fn input(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(name, PinDirection::Input, Position::new(x, y))
    }

    pub fn output(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(name, PinDirection::Output, Position::new(x, y))
    }
}

/// The ordered pin set of one component.
///
/// Lookups are by name. Reading a missing pin yields `false`, driving a missing
/// pin does nothing, so a kind's evaluation never fails on its own pin layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pins {
    pins: IndexMap<String, Pin>,
}

impl Pins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Add a pin, replacing any previous pin of the same name in place.
    pub fn add(&mut self, pin: Pin) {
        self.pins.insert(pin.name.clone(), pin);
    }

    pub fn get(&self, name: &str) -> Option<&Pin> {
        self.pins.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Pin> {
        self.pins.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pins.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pin> {
        self.pins.values_mut()
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Pin> {
        self.iter().filter(|p| p.direction.is_input())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Pin> {
        self.iter().filter(|p| p.direction.is_output())
    }

    /// Snapshot of the output pin signals, in pin order.
    pub fn output_snapshot(&self) -> Vec<Signal> {
        self.outputs().map(|p| p.signal).collect()
    }

    /// Boolean coercion of the named pin (absent pin reads as `false`).
    pub fn high(&self, name: &str) -> bool {
        self.get(name).is_some_and(|p| p.signal.is_high())
    }

    pub fn signal(&self, name: &str) -> Option<Signal> {
        self.get(name).map(|p| p.signal)
    }

    pub fn set_signal(&mut self, name: &str, signal: Signal) {
        if let Some(pin) = self.get_mut(name) {
            pin.signal = signal;
        }
    }

    pub fn drive(&mut self, name: &str, value: bool) {
        self.set_signal(name, Signal::from_bool(value));
    }

    /// Decode pins `{prefix}0 .. {prefix}{width-1}` as an unsigned integer, LSB first.
    pub fn read_bus(&self, prefix: &str, width: usize) -> u64 {
        (0..width.min(64))
            .filter(|i| self.high(&format!("{}{}", prefix, i)))
            .fold(0u64, |acc, i| acc | (1 << i))
    }

    /// Encode `value` onto pins `{prefix}0 .. {prefix}{width-1}`, LSB first.
    pub fn write_bus(&mut self, prefix: &str, width: usize, value: u64) {
        for i in 0..width.min(64) {
            self.drive(&format!("{}{}", prefix, i), (value >> i) & 1 == 1);
        }
    }
}

impl FromIterator<Pin> for Pins {
    fn from_iter<I: IntoIterator<Item = Pin>>(iter: I) -> Self {
        let mut pins = Pins::new();
        for pin in iter {
            pins.add(pin);
        }
        pins
    }
}
