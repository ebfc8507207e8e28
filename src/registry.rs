//! Component registry: maps type names to constructors.
//!
//! The registry is a plain value built once (see [`Registry::new`]) and handed to
//! whatever needs to create components by name, such as the synthesizer and the
//! document loader. Lookup is case-insensitive.

use std::collections::BTreeMap;

use log::debug;
use serde_json::Value;

use crate::blocks::{Comparator, Decoder, FullAdder, HalfAdder, Multiplexer};
use crate::component::{Component, ComponentKind, Properties};
use crate::error::{Error, Result};
use crate::gate::{Gate, GateType};
use crate::io::{Button, Clock, InputPin, Led, OutputPin, Switch};
use crate::memory::{DFlipFlop, JkFlipFlop, Register, SrLatch};

pub type Constructor = fn(&Properties) -> Result<ComponentKind>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    Gates,
    InputOutput,
    Memory,
    Complex,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Gates => "Gates",
            Category::InputOutput => "Input/Output",
            Category::Memory => "Memory",
            Category::Complex => "Complex",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: Category,
    pub constructor: Constructor,
}

#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn param(props: &Properties, name: &str, default: usize, min: usize, max: usize) -> Result<usize> {
    let value = match props.get(name) {
        None | Some(Value::Null) => return Ok(default),
        Some(value) => value,
    };
    let n = value.as_u64().ok_or_else(|| Error::InvalidParameter {
        name: name.to_string(),
        reason: format!("expected a non-negative integer, got {}", value),
    })?;
    let n = usize::try_from(n).unwrap_or(usize::MAX);
    if n < min || n > max {
        return Err(Error::InvalidParameter {
            name: name.to_string(),
            reason: format!("{} is outside {}..={}", n, min, max),
        });
    }
    Ok(n)
}

fn gate(ty: GateType, props: &Properties) -> Result<ComponentKind> {
    let n = if ty.is_unary() {
        1
    } else {
        param(props, "num_inputs", 2, 1, 64)?
    };
    Ok(ComponentKind::Gate(Gate::new(ty, n)))
}

macro_rules! entry {
    ($name:literal, [$($alias:literal),*], $category:expr, $ctor:expr) => {
        Entry {
            name: $name,
            aliases: &[$($alias),*],
            category: $category,
            constructor: $ctor,
        }
    };
}

impl Registry {
    /// The full set of built-in kinds.
    pub fn new() -> Self {
        use Category::*;

        let entries = vec![
            entry!("and", ["andgate"], Gates, |p| gate(GateType::And, p)),
            entry!("or", ["orgate"], Gates, |p| gate(GateType::Or, p)),
            entry!("not", ["notgate"], Gates, |p| gate(GateType::Not, p)),
            entry!("xor", ["xorgate"], Gates, |p| gate(GateType::Xor, p)),
            entry!("nand", ["nandgate"], Gates, |p| gate(GateType::Nand, p)),
            entry!("nor", ["norgate"], Gates, |p| gate(GateType::Nor, p)),
            entry!("xnor", ["xnorgate"], Gates, |p| gate(GateType::Xnor, p)),
            entry!("buffer", ["buffergate"], Gates, |p| gate(GateType::Buffer, p)),
            entry!("switch", [], InputOutput, |_| Ok(ComponentKind::Switch(Switch::default()))),
            entry!("button", [], InputOutput, |_| Ok(ComponentKind::Button(Button::default()))),
            entry!("led", [], InputOutput, |_| Ok(ComponentKind::Led(Led::default()))),
            entry!("inputpin", [], InputOutput, |_| {
                Ok(ComponentKind::InputPin(InputPin::default()))
            }),
            entry!("outputpin", [], InputOutput, |_| {
                Ok(ComponentKind::OutputPin(OutputPin::default()))
            }),
            entry!("clock", [], InputOutput, |p| {
                let frequency = param(p, "frequency", 1, 1, usize::MAX)?;
                Ok(ComponentKind::Clock(Clock::new(frequency as u64)))
            }),
            entry!("dflipflop", [], Memory, |_| Ok(ComponentKind::DFlipFlop(DFlipFlop::default()))),
            entry!("jkflipflop", [], Memory, |_| {
                Ok(ComponentKind::JkFlipFlop(JkFlipFlop::default()))
            }),
            entry!("srlatch", [], Memory, |_| Ok(ComponentKind::SrLatch(SrLatch::default()))),
            entry!("register", [], Memory, |p| {
                let width = param(p, "bit_width", 4, 1, 64)?;
                Ok(ComponentKind::Register(Register::new(width)))
            }),
            entry!("multiplexer", ["mux"], Complex, |p| {
                let n = param(p, "num_inputs", 4, 1, 1 << 16)?;
                Ok(ComponentKind::Multiplexer(Multiplexer::new(n)))
            }),
            entry!("decoder", [], Complex, |p| {
                let n = param(p, "num_inputs", 2, 1, 16)?;
                Ok(ComponentKind::Decoder(Decoder::new(n)))
            }),
            entry!("halfadder", [], Complex, |_| Ok(ComponentKind::HalfAdder(HalfAdder))),
            entry!("fulladder", [], Complex, |_| Ok(ComponentKind::FullAdder(FullAdder))),
            entry!("comparator", [], Complex, |p| {
                let width = param(p, "bit_width", 4, 1, 64)?;
                Ok(ComponentKind::Comparator(Comparator::new(width)))
            }),
        ];

        Self { entries }
    }

    /// A registry with no kinds; populate it with [`Registry::register`].
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn register(&mut self, entry: Entry) {
        self.entries.retain(|e| e.name != entry.name);
        self.entries.push(entry);
    }

    pub fn lookup(&self, type_name: &str) -> Option<&Entry> {
        let key = type_name.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name == key || e.aliases.contains(&key.as_str()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.lookup(type_name).is_some()
    }

    /// Create a component of the named type.
    ///
    /// `properties` supplies construction parameters (`num_inputs`, `bit_width`,
    /// `frequency`); missing ones take the kind's defaults. All given properties
    /// are kept on the component.
    pub fn create(&self, type_name: &str, properties: &Properties) -> Result<Component> {
        let entry = self
            .lookup(type_name)
            .ok_or_else(|| Error::UnknownComponentKind(type_name.to_string()))?;
        debug!("create(type = {}, properties = {:?})", entry.name, properties);
        let kind = (entry.constructor)(properties)?;
        let mut component = Component::new(kind);
        for (key, value) in properties {
            component.properties.insert(key.clone(), value.clone());
        }
        Ok(component)
    }

    /// Canonical type names, sorted.
    pub fn types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names
    }

    pub fn categories(&self) -> BTreeMap<Category, Vec<&'static str>> {
        let mut categories = BTreeMap::<Category, Vec<&'static str>>::new();
        for e in self.entries.iter() {
            categories.entry(e.category).or_default().push(e.name);
        }
        categories
    }
}
