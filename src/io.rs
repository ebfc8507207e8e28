//! Sources and sinks: switches, buttons, LEDs, circuit pins and the clock.

use crate::pin::{Pin, Pins};

fn source_pins(x: f64, y: f64) -> Pins {
    [Pin::output("out", x, y)].into_iter().collect()
}

fn sink_pins(y: f64) -> Pins {
    [Pin::input("in", 0.0, y)].into_iter().collect()
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Switch {
    pub state: bool,
}

impl Switch {
    pub fn pins(&self) -> Pins {
        source_pins(30.0, 15.0)
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        pins.drive("out", self.state);
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Button {
    pub pressed: bool,
}

impl Button {
    pub fn pins(&self) -> Pins {
        source_pins(30.0, 15.0)
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        pins.drive("out", self.pressed);
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct InputPin {
    pub value: bool,
}

impl InputPin {
    pub fn pins(&self) -> Pins {
        source_pins(20.0, 10.0)
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        pins.drive("out", self.value);
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Led {
    pub lit: bool,
}

impl Led {
    pub fn pins(&self) -> Pins {
        sink_pins(15.0)
    }

    pub fn evaluate(&mut self, pins: &Pins) {
        self.lit = pins.high("in");
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct OutputPin {
    pub value: bool,
}

impl OutputPin {
    pub fn pins(&self) -> Pins {
        sink_pins(10.0)
    }

    pub fn evaluate(&mut self, pins: &Pins) {
        self.value = pins.high("in");
    }
}

/// Toggles its output every `frequency` evaluations.
///
/// The period is counted in evaluation calls, not wall time. A simulation step may
/// evaluate the clock several times while looking for a fixed point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Clock {
    pub state: bool,
    pub ticks: u64,
    frequency: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Clock {
    pub fn new(frequency: u64) -> Self {
        Self {
            state: false,
            ticks: 0,
            frequency: frequency.max(1),
        }
    }

    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    pub fn pins(&self) -> Pins {
        source_pins(30.0, 15.0)
    }

    pub fn evaluate(&mut self, pins: &mut Pins) {
        self.ticks += 1;
        if self.ticks >= self.frequency {
            self.state = !self.state;
            self.ticks = 0;
        }
        pins.drive("out", self.state);
    }
}
