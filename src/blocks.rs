//! Structural and arithmetic blocks.
//!
//! Buses use the LSB-first convention from [`Pins::read_bus`]: pin `X{i}` has weight `2^i`.

use crate::pin::{Pin, Pins};

/// Number of select lines for `num_inputs` data inputs: `ceil(log2(n))`.
pub fn select_bits(num_inputs: usize) -> usize {
    if num_inputs <= 1 {
        0
    } else {
        (usize::BITS - (num_inputs - 1).leading_zeros()) as usize
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Multiplexer {
    num_inputs: usize,
    num_select: usize,
}

impl Multiplexer {
    pub fn new(num_inputs: usize) -> Self {
        Self {
            num_inputs,
            num_select: select_bits(num_inputs),
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_select(&self) -> usize {
        self.num_select
    }

    pub fn pins(&self) -> Pins {
        let n = self.num_inputs as f64;
        let mut pins = Pins::new();
        for i in 0..self.num_inputs {
            pins.add(Pin::input(format!("D{}", i), 0.0, 10.0 + (i as f64) * 15.0));
        }
        for i in 0..self.num_select {
            pins.add(Pin::input(format!("S{}", i), 20.0, 10.0 + n * 15.0 + (i as f64) * 15.0));
        }
        pins.add(Pin::output("OUT", 80.0, 10.0 + (n * 15.0 / 2.0).floor()));
        pins
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        let index = pins.read_bus("S", self.num_select) as usize;
        let out = if index < self.num_inputs {
            pins.signal(&format!("D{}", index)).unwrap_or_default()
        } else {
            false.into()
        };
        pins.set_signal("OUT", out);
    }
}

/// `n`-to-`2^n` one-hot decoder.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Decoder {
    num_inputs: usize,
}

impl Decoder {
    pub fn new(num_inputs: usize) -> Self {
        assert!(num_inputs <= 16, "Decoder supports at most 16 inputs");
        Self { num_inputs }
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        1 << self.num_inputs
    }

    pub fn pins(&self) -> Pins {
        let mut pins = Pins::new();
        for i in 0..self.num_inputs {
            pins.add(Pin::input(format!("I{}", i), 0.0, 10.0 + (i as f64) * 15.0));
        }
        for i in 0..self.num_outputs() {
            pins.add(Pin::output(format!("O{}", i), 80.0, 10.0 + (i as f64) * 15.0));
        }
        pins
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        let value = pins.read_bus("I", self.num_inputs) as usize;
        for i in 0..self.num_outputs() {
            pins.drive(&format!("O{}", i), i == value);
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HalfAdder;

impl HalfAdder {
    pub fn pins(&self) -> Pins {
        [
            Pin::input("A", 0.0, 10.0),
            Pin::input("B", 0.0, 30.0),
            Pin::output("SUM", 80.0, 10.0),
            Pin::output("CARRY", 80.0, 30.0),
        ]
        .into_iter()
        .collect()
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        let a = pins.high("A");
        let b = pins.high("B");
        pins.drive("SUM", a ^ b);
        pins.drive("CARRY", a && b);
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FullAdder;

impl FullAdder {
    pub fn pins(&self) -> Pins {
        [
            Pin::input("A", 0.0, 10.0),
            Pin::input("B", 0.0, 25.0),
            Pin::input("CIN", 0.0, 40.0),
            Pin::output("SUM", 80.0, 15.0),
            Pin::output("COUT", 80.0, 35.0),
        ]
        .into_iter()
        .collect()
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        let a = pins.high("A");
        let b = pins.high("B");
        let cin = pins.high("CIN");
        pins.drive("SUM", a ^ b ^ cin);
        pins.drive("COUT", (a && b) || (cin && (a ^ b)));
    }
}

/// Unsigned magnitude comparator over two `bit_width`-bit buses `A` and `B`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Comparator {
    bit_width: usize,
}

impl Comparator {
    pub fn new(bit_width: usize) -> Self {
        assert!(
            (1..=64).contains(&bit_width),
            "Comparator width should be in the range 1..=64"
        );
        Self { bit_width }
    }

    pub fn bit_width(&self) -> usize {
        self.bit_width
    }

    pub fn pins(&self) -> Pins {
        let n = self.bit_width as f64;
        let mut pins = Pins::new();
        for i in 0..self.bit_width {
            pins.add(Pin::input(format!("A{}", i), 0.0, 10.0 + (i as f64) * 10.0));
        }
        for i in 0..self.bit_width {
            pins.add(Pin::input(format!("B{}", i), 0.0, 20.0 + n * 10.0 + (i as f64) * 10.0));
        }
        pins.add(Pin::output("EQ", 80.0, 10.0));
        pins.add(Pin::output("GT", 80.0, 30.0));
        pins.add(Pin::output("LT", 80.0, 50.0));
        pins
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        let a = pins.read_bus("A", self.bit_width);
        let b = pins.read_bus("B", self.bit_width);
        pins.drive("EQ", a == b);
        pins.drive("GT", a > b);
        pins.drive("LT", a < b);
    }
}
