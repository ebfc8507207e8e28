//! Components and their evaluation contract.
//!
//! Every component kind is one variant of the closed [`ComponentKind`] sum type.
//! [`Component::evaluate`] reads the component's input pins, drives its output
//! pins and, for stateful kinds, updates the state held inside the variant.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::blocks::{Comparator, Decoder, FullAdder, HalfAdder, Multiplexer};
use crate::gate::{Gate, GateType};
use crate::io::{Button, Clock, InputPin, Led, OutputPin, Switch};
use crate::memory::{DFlipFlop, JkFlipFlop, Register, SrLatch};
use crate::pin::{Pin, Pins};
use crate::signal::Signal;
use crate::types::Position;

pub type Properties = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Gate(Gate),
    DFlipFlop(DFlipFlop),
    JkFlipFlop(JkFlipFlop),
    SrLatch(SrLatch),
    Register(Register),
    Multiplexer(Multiplexer),
    Decoder(Decoder),
    HalfAdder(HalfAdder),
    FullAdder(FullAdder),
    Comparator(Comparator),
    Switch(Switch),
    Button(Button),
    Led(Led),
    InputPin(InputPin),
    OutputPin(OutputPin),
    Clock(Clock),
}

impl ComponentKind {
    /// Canonical (registry) type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentKind::Gate(gate) => match gate.ty {
                GateType::And => "and",
                GateType::Or => "or",
                GateType::Not => "not",
                GateType::Xor => "xor",
                GateType::Nand => "nand",
                GateType::Nor => "nor",
                GateType::Xnor => "xnor",
                GateType::Buffer => "buffer",
            },
            ComponentKind::DFlipFlop(_) => "dflipflop",
            ComponentKind::JkFlipFlop(_) => "jkflipflop",
            ComponentKind::SrLatch(_) => "srlatch",
            ComponentKind::Register(_) => "register",
            ComponentKind::Multiplexer(_) => "multiplexer",
            ComponentKind::Decoder(_) => "decoder",
            ComponentKind::HalfAdder(_) => "halfadder",
            ComponentKind::FullAdder(_) => "fulladder",
            ComponentKind::Comparator(_) => "comparator",
            ComponentKind::Switch(_) => "switch",
            ComponentKind::Button(_) => "button",
            ComponentKind::Led(_) => "led",
            ComponentKind::InputPin(_) => "inputpin",
            ComponentKind::OutputPin(_) => "outputpin",
            ComponentKind::Clock(_) => "clock",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            ComponentKind::Gate(gate) => gate.ty.label(),
            ComponentKind::DFlipFlop(_) => "D-FF",
            ComponentKind::JkFlipFlop(_) => "JK-FF",
            ComponentKind::SrLatch(_) => "SR Latch",
            ComponentKind::Register(_) => "Register",
            ComponentKind::Multiplexer(_) => "MUX",
            ComponentKind::Decoder(_) => "Decoder",
            ComponentKind::HalfAdder(_) => "Half Adder",
            ComponentKind::FullAdder(_) => "Full Adder",
            ComponentKind::Comparator(_) => "Comparator",
            ComponentKind::Switch(_) => "Switch",
            ComponentKind::Button(_) => "Button",
            ComponentKind::Led(_) => "LED",
            ComponentKind::InputPin(_) => "In",
            ComponentKind::OutputPin(_) => "Out",
            ComponentKind::Clock(_) => "Clock",
        }
    }

    /// The kind's construction parameters, as stored in the property bag.
    pub fn parameters(&self) -> Properties {
        let mut props = Properties::new();
        match self {
            ComponentKind::Gate(gate) if !gate.ty.is_unary() => {
                props.insert("num_inputs".into(), gate.num_inputs().into());
            }
            ComponentKind::Multiplexer(mux) => {
                props.insert("num_inputs".into(), mux.num_inputs().into());
            }
            ComponentKind::Decoder(dec) => {
                props.insert("num_inputs".into(), dec.num_inputs().into());
            }
            ComponentKind::Register(reg) => {
                props.insert("bit_width".into(), reg.bit_width().into());
            }
            ComponentKind::Comparator(cmp) => {
                props.insert("bit_width".into(), cmp.bit_width().into());
            }
            ComponentKind::Clock(clock) => {
                props.insert("frequency".into(), clock.frequency().into());
            }
            _ => {}
        }
        props
    }

    fn pins(&self) -> Pins {
        match self {
            ComponentKind::Gate(x) => x.pins(),
            ComponentKind::DFlipFlop(x) => x.pins(),
            ComponentKind::JkFlipFlop(x) => x.pins(),
            ComponentKind::SrLatch(x) => x.pins(),
            ComponentKind::Register(x) => x.pins(),
            ComponentKind::Multiplexer(x) => x.pins(),
            ComponentKind::Decoder(x) => x.pins(),
            ComponentKind::HalfAdder(x) => x.pins(),
            ComponentKind::FullAdder(x) => x.pins(),
            ComponentKind::Comparator(x) => x.pins(),
            ComponentKind::Switch(x) => x.pins(),
            ComponentKind::Button(x) => x.pins(),
            ComponentKind::Led(x) => x.pins(),
            ComponentKind::InputPin(x) => x.pins(),
            ComponentKind::OutputPin(x) => x.pins(),
            ComponentKind::Clock(x) => x.pins(),
        }
    }

    fn evaluate(&mut self, pins: &mut Pins) {
        match self {
            ComponentKind::Gate(x) => x.evaluate(pins),
            ComponentKind::DFlipFlop(x) => x.evaluate(pins),
            ComponentKind::JkFlipFlop(x) => x.evaluate(pins),
            ComponentKind::SrLatch(x) => x.evaluate(pins),
            ComponentKind::Register(x) => x.evaluate(pins),
            ComponentKind::Multiplexer(x) => x.evaluate(pins),
            ComponentKind::Decoder(x) => x.evaluate(pins),
            ComponentKind::HalfAdder(x) => x.evaluate(pins),
            ComponentKind::FullAdder(x) => x.evaluate(pins),
            ComponentKind::Comparator(x) => x.evaluate(pins),
            ComponentKind::Switch(x) => x.evaluate(pins),
            ComponentKind::Button(x) => x.evaluate(pins),
            ComponentKind::Led(x) => x.evaluate(pins),
            ComponentKind::InputPin(x) => x.evaluate(pins),
            ComponentKind::OutputPin(x) => x.evaluate(pins),
            ComponentKind::Clock(x) => x.evaluate(pins),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Empty until the circuit assigns one.
    pub id: String,
    pub label: String,
    pub position: Position,
    pub properties: Properties,
    pins: Pins,
    kind: ComponentKind,
}

// Constructors
impl Component {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            id: String::new(),
            label: kind.default_label().to_string(),
            position: Position::default(),
            properties: kind.parameters(),
            pins: kind.pins(),
            kind,
        }
    }

    pub fn gate(ty: GateType, num_inputs: usize) -> Self {
        Self::new(ComponentKind::Gate(Gate::new(ty, num_inputs)))
    }

    pub fn switch() -> Self {
        Self::new(ComponentKind::Switch(Switch::default()))
    }

    pub fn led() -> Self {
        Self::new(ComponentKind::Led(Led::default()))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

// Getters
impl Component {
    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn pins(&self) -> &Pins {
        &self.pins
    }

    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.get(name)
    }

    pub fn pin_mut(&mut self, name: &str) -> Option<&mut Pin> {
        self.pins.get_mut(name)
    }

    pub fn input_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.inputs()
    }

    pub fn output_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.outputs()
    }

    /// Whether an LED is lit; `None` for other kinds.
    pub fn is_lit(&self) -> Option<bool> {
        match &self.kind {
            ComponentKind::Led(led) => Some(led.lit),
            _ => None,
        }
    }

    /// The single held bit of a stateful or source kind.
    pub fn held_state(&self) -> Option<bool> {
        match &self.kind {
            ComponentKind::DFlipFlop(ff) => Some(ff.state),
            ComponentKind::JkFlipFlop(ff) => Some(ff.state),
            ComponentKind::SrLatch(latch) => Some(latch.state),
            ComponentKind::Switch(sw) => Some(sw.state),
            ComponentKind::Button(btn) => Some(btn.pressed),
            ComponentKind::InputPin(pin) => Some(pin.value),
            ComponentKind::OutputPin(pin) => Some(pin.value),
            ComponentKind::Led(led) => Some(led.lit),
            ComponentKind::Clock(clock) => Some(clock.state),
            _ => None,
        }
    }
}

impl Component {
    /// Read inputs, drive outputs, update internal state.
    pub fn evaluate(&mut self) {
        self.kind.evaluate(&mut self.pins);
    }

    /// Snapshot of output pin signals, used to detect change across an evaluation.
    pub fn output_snapshot(&self) -> Vec<Signal> {
        self.pins.output_snapshot()
    }

    /// Force every pin signal back to UNKNOWN. Internal state is kept.
    pub fn clear_signals(&mut self) {
        for pin in self.pins.iter_mut() {
            pin.signal = Signal::unknown();
        }
    }

    /// Set the externally controlled level of a Switch, Button or InputPin, then
    /// re-evaluate. Returns `false` (and does nothing) for other kinds.
    pub fn set_state(&mut self, state: bool) -> bool {
        match &mut self.kind {
            ComponentKind::Switch(sw) => sw.state = state,
            ComponentKind::Button(btn) => btn.pressed = state,
            ComponentKind::InputPin(pin) => pin.value = state,
            _ => return false,
        }
        self.evaluate();
        true
    }

    pub fn toggle(&mut self) -> bool {
        match &self.kind {
            ComponentKind::Switch(sw) => {
                let next = !sw.state;
                self.set_state(next)
            }
            _ => false,
        }
    }

    pub fn press(&mut self) -> bool {
        matches!(self.kind, ComponentKind::Button(_)) && self.set_state(true)
    }

    pub fn release(&mut self) -> bool {
        matches!(self.kind, ComponentKind::Button(_)) && self.set_state(false)
    }

    pub fn set_value(&mut self, value: bool) -> bool {
        matches!(self.kind, ComponentKind::InputPin(_)) && self.set_state(value)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' ({})", self.id, self.label, self.type_name())
    }
}
