//! Sequential elements.
//!
//! Edge-triggered kinds keep the clock level seen at their previous evaluation and
//! act on a rising edge only (previous `false`, current `true`). Outputs are driven
//! on every evaluation, edge or not.

use crate::pin::{Pin, Pins};

/// Rising edge detector over successive clock samples.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct EdgeDetector {
    last_clock: bool,
}

impl EdgeDetector {
    pub fn rising(&mut self, clock: bool) -> bool {
        let rising = !self.last_clock && clock;
        self.last_clock = clock;
        rising
    }
}

fn drive_q(pins: &mut Pins, state: bool) {
    pins.drive("Q", state);
    pins.drive("Q'", !state);
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DFlipFlop {
    pub state: bool,
    pub edge: EdgeDetector,
}

impl DFlipFlop {
    pub fn pins(&self) -> Pins {
        [
            Pin::input("D", 0.0, 10.0),
            Pin::input("CLK", 0.0, 30.0),
            Pin::output("Q", 60.0, 10.0),
            Pin::output("Q'", 60.0, 30.0),
        ]
        .into_iter()
        .collect()
    }

    pub fn evaluate(&mut self, pins: &mut Pins) {
        if self.edge.rising(pins.high("CLK")) {
            self.state = pins.high("D");
        }
        drive_q(pins, self.state);
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct JkFlipFlop {
    pub state: bool,
    pub edge: EdgeDetector,
}

impl JkFlipFlop {
    pub fn pins(&self) -> Pins {
        [
            Pin::input("J", 0.0, 10.0),
            Pin::input("K", 0.0, 20.0),
            Pin::input("CLK", 0.0, 40.0),
            Pin::output("Q", 60.0, 10.0),
            Pin::output("Q'", 60.0, 40.0),
        ]
        .into_iter()
        .collect()
    }

    pub fn evaluate(&mut self, pins: &mut Pins) {
        let j = pins.high("J");
        let k = pins.high("K");
        if self.edge.rising(pins.high("CLK")) {
            self.state = match (j, k) {
                (true, true) => !self.state,
                (true, false) => true,
                (false, true) => false,
                (false, false) => self.state,
            };
        }
        drive_q(pins, self.state);
    }
}

/// Level-sensitive SR latch. `S = R = 1` holds the current value.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SrLatch {
    pub state: bool,
}

impl SrLatch {
    pub fn pins(&self) -> Pins {
        [
            Pin::input("S", 0.0, 10.0),
            Pin::input("R", 0.0, 30.0),
            Pin::output("Q", 60.0, 10.0),
            Pin::output("Q'", 60.0, 30.0),
        ]
        .into_iter()
        .collect()
    }

    pub fn evaluate(&mut self, pins: &mut Pins) {
        let s = pins.high("S");
        let r = pins.high("R");
        match (s, r) {
            (true, false) => self.state = true,
            (false, true) => self.state = false,
            _ => {}
        }
        drive_q(pins, self.state);
    }
}

/// `bit_width`-bit register: `D{i}` captured on a rising `CLK`, `Q{i}` always driven.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Register {
    bit_width: usize,
    pub value: u64,
    pub edge: EdgeDetector,
}

impl Register {
    pub fn new(bit_width: usize) -> Self {
        assert!(
            (1..=64).contains(&bit_width),
            "Register width should be in the range 1..=64"
        );
        Self {
            bit_width,
            value: 0,
            edge: EdgeDetector::default(),
        }
    }

    pub fn bit_width(&self) -> usize {
        self.bit_width
    }

    pub fn pins(&self) -> Pins {
        let n = self.bit_width;
        let mut pins = Pins::new();
        for i in 0..n {
            pins.add(Pin::input(format!("D{}", i), 0.0, 10.0 + (i as f64) * 10.0));
        }
        pins.add(Pin::input("CLK", 0.0, 10.0 + (n as f64) * 10.0));
        for i in 0..n {
            pins.add(Pin::output(format!("Q{}", i), 80.0, 10.0 + (i as f64) * 10.0));
        }
        pins
    }

    pub fn evaluate(&mut self, pins: &mut Pins) {
        if self.edge.rising(pins.high("CLK")) {
            self.value = pins.read_bus("D", self.bit_width);
        }
        pins.write_bus("Q", self.bit_width, self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_detector() {
        let mut edge = EdgeDetector::default();
        assert!(!edge.rising(false));
        assert!(edge.rising(true));
        assert!(!edge.rising(true));
        assert!(!edge.rising(false));
        assert!(edge.rising(true));
    }

    #[test]
    fn test_dff_captures_on_rising_edge_only() {
        let mut ff = DFlipFlop::default();
        let mut pins = ff.pins();

        pins.drive("D", true);
        pins.drive("CLK", false);
        ff.evaluate(&mut pins);
        assert!(!pins.high("Q"));
        assert!(pins.high("Q'"));

        pins.drive("CLK", true);
        ff.evaluate(&mut pins);
        assert!(pins.high("Q"));

        // Clock held high: D changes are ignored.
        pins.drive("D", false);
        ff.evaluate(&mut pins);
        ff.evaluate(&mut pins);
        assert!(pins.high("Q"));
        assert!(!pins.high("Q'"));
    }

    #[test]
    fn test_jk_double_toggle() {
        let mut ff = JkFlipFlop::default();
        let mut pins = ff.pins();
        pins.drive("J", true);
        pins.drive("K", true);

        let initial = ff.state;
        for _ in 0..2 {
            pins.drive("CLK", false);
            ff.evaluate(&mut pins);
            pins.drive("CLK", true);
            ff.evaluate(&mut pins);
        }
        assert_eq!(ff.state, initial);
        assert_eq!(pins.high("Q"), initial);
    }

    #[test]
    fn test_jk_set_reset_hold() {
        let mut ff = JkFlipFlop::default();
        let mut pins = ff.pins();
        fn clock(pins: &mut Pins, ff: &mut JkFlipFlop) {
            pins.drive("CLK", false);
            ff.evaluate(pins);
            pins.drive("CLK", true);
            ff.evaluate(pins);
        }

        pins.drive("J", true);
        pins.drive("K", false);
        clock(&mut pins, &mut ff);
        assert!(ff.state);

        pins.drive("J", false);
        clock(&mut pins, &mut ff);
        assert!(ff.state);

        pins.drive("K", true);
        clock(&mut pins, &mut ff);
        assert!(!ff.state);
    }

    #[test]
    fn test_sr_latch() {
        let mut latch = SrLatch::default();
        let mut pins = latch.pins();

        pins.drive("S", true);
        pins.drive("R", false);
        latch.evaluate(&mut pins);
        assert!(pins.high("Q"));

        pins.drive("S", false);
        latch.evaluate(&mut pins);
        assert!(pins.high("Q"));

        // Contended input holds the current value.
        pins.drive("S", true);
        pins.drive("R", true);
        latch.evaluate(&mut pins);
        assert!(pins.high("Q"));

        pins.drive("S", false);
        latch.evaluate(&mut pins);
        assert!(!pins.high("Q"));
        assert!(pins.high("Q'"));
    }

    #[test]
    fn test_register_capture() {
        let mut reg = Register::new(4);
        let mut pins = reg.pins();
        pins.write_bus("D", 4, 0b0110);
        pins.drive("CLK", false);
        reg.evaluate(&mut pins);
        assert_eq!(pins.read_bus("Q", 4), 0);

        pins.drive("CLK", true);
        reg.evaluate(&mut pins);
        assert_eq!(reg.value, 6);
        assert_eq!(pins.read_bus("Q", 4), 6);

        pins.write_bus("D", 4, 0b1111);
        reg.evaluate(&mut pins);
        assert_eq!(pins.read_bus("Q", 4), 6);
    }
}
