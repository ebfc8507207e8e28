//! The circuit graph.
//!
//! A [`Circuit`] owns its components and wires. Components own their pins; wires
//! name their endpoints by [`PinRef`] handles, so there are no back-pointers to
//! maintain. The set of wires touching a pin is a query ([`Circuit::wires_at`]).
//!
//! # Invariants
//!
//! - Every pin referenced by a wire belongs to a component currently in the circuit.
//! - Removing a component removes every wire touching any of its pins.
//! - Components and wires iterate in insertion order.
//!
//! Removal of an unknown id is a silent no-op, never an error.

use std::fmt::{Debug, Formatter};

use indexmap::IndexMap;
use log::debug;

use crate::component::Component;
use crate::error::{Error, Result};
use crate::pin::Pin;
use crate::types::PinRef;
use crate::wire::{Drive, Wire};

pub struct Circuit {
    pub name: String,
    components: IndexMap<String, Component>,
    wires: IndexMap<String, Wire>,
    next_component_id: usize,
    next_wire_id: usize,
}

impl Default for Circuit {
    fn default() -> Self {
        Circuit::new("Untitled")
    }
}

impl Debug for Circuit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Circuit")
            .field("name", &self.name)
            .field("components", &self.components.len())
            .field("wires", &self.wires.len())
            .finish()
    }
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: IndexMap::new(),
            wires: IndexMap::new(),
            next_component_id: 0,
            next_wire_id: 0,
        }
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

// Mutation
impl Circuit {
    fn fresh_component_id(&mut self) -> String {
        loop {
            let id = format!("comp_{}", self.next_component_id);
            self.next_component_id += 1;
            if !self.components.contains_key(&id) {
                return id;
            }
        }
    }

    fn fresh_wire_id(&mut self) -> String {
        loop {
            let id = format!("wire_{}", self.next_wire_id);
            self.next_wire_id += 1;
            if !self.wires.contains_key(&id) {
                return id;
            }
        }
    }

    /// Add a component, assigning an id if it has none. Returns the id.
    ///
    /// A component with an id already in use replaces the previous one, whose
    /// wires are removed with it.
    pub fn add_component(&mut self, mut component: Component) -> String {
        if component.id.is_empty() {
            component.id = self.fresh_component_id();
        } else if self.components.contains_key(&component.id) {
            let id = component.id.clone();
            self.remove_component(&id);
        }
        let id = component.id.clone();
        debug!("add_component({})", component);
        self.components.insert(id.clone(), component);
        id
    }

    /// Remove a component and every wire touching it.
    pub fn remove_component(&mut self, id: &str) {
        if !self.components.contains_key(id) {
            return;
        }
        let doomed: Vec<String> = self
            .wires
            .iter()
            .filter(|(_, w)| w.touches_component(id))
            .map(|(wid, _)| wid.to_string())
            .collect();
        for wid in doomed {
            self.remove_wire(&wid);
        }
        self.components.shift_remove(id);
        debug!("remove_component({})", id);
    }

    /// Add a wire, assigning an id if it has none. Returns the id.
    ///
    /// Both endpoints must name existing pins.
    pub fn add_wire(&mut self, mut wire: Wire) -> Result<String> {
        self.check_pin(&wire.a)?;
        self.check_pin(&wire.b)?;
        if wire.id.is_empty() {
            wire.id = self.fresh_wire_id();
        }
        let id = wire.id.clone();
        debug!("add_wire({}: {} -- {})", id, wire.a, wire.b);
        self.wires.insert(id.clone(), wire);
        Ok(id)
    }

    /// Wire `from_component.from_pin` to `to_component.to_pin`.
    pub fn connect(&mut self, from_component: &str, from_pin: &str, to_component: &str, to_pin: &str) -> Result<String> {
        self.add_wire(Wire::new(
            PinRef::new(from_component, from_pin),
            PinRef::new(to_component, to_pin),
        ))
    }

    pub fn remove_wire(&mut self, id: &str) {
        if self.wires.shift_remove(id).is_some() {
            debug!("remove_wire({})", id);
        }
    }

    /// Drop all components and wires and restart id numbering.
    pub fn clear(&mut self) {
        self.components.clear();
        self.wires.clear();
        self.next_component_id = 0;
        self.next_wire_id = 0;
    }

    fn check_pin(&self, pin: &PinRef) -> Result<()> {
        let component = self
            .components
            .get(&pin.component)
            .ok_or_else(|| Error::UnknownComponent(pin.component.clone()))?;
        if component.pin(&pin.pin).is_none() {
            return Err(Error::MissingPin {
                component: pin.component.clone(),
                pin: pin.pin.clone(),
            });
        }
        Ok(())
    }
}

// Queries
impl Circuit {
    pub fn get_component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn get_component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    pub fn get_wire(&self, id: &str) -> Option<&Wire> {
        self.wires.get(id)
    }

    pub fn pin(&self, pin: &PinRef) -> Option<&Pin> {
        self.components.get(&pin.component)?.pin(&pin.pin)
    }

    pub fn pin_mut(&mut self, pin: &PinRef) -> Option<&mut Pin> {
        self.components.get_mut(&pin.component)?.pin_mut(&pin.pin)
    }

    /// Wires incident on the given pin.
    pub fn wires_at<'a>(&'a self, pin: &'a PinRef) -> impl Iterator<Item = &'a Wire> + 'a {
        self.wires.values().filter(move |w| w.touches(pin))
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.components.values_mut()
    }

    pub fn component_ids(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    /// Components of the given registry type, in insertion order.
    pub fn components_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Component> + 'a {
        self.components().filter(move |c| c.type_name() == type_name)
    }
}

// Signals
impl Circuit {
    /// Copy each wire's driving pin signal onto the wire and its other endpoint.
    pub fn propagate(&mut self) {
        let components = &mut self.components;
        for wire in self.wires.values_mut() {
            let direction = |p: &PinRef| {
                components
                    .get(&p.component)
                    .and_then(|c| c.pin(&p.pin))
                    .map(|pin| pin.direction)
            };
            let (Some(da), Some(db)) = (direction(&wire.a), direction(&wire.b)) else {
                continue;
            };
            let (src, dst) = match Drive::resolve(da, db) {
                Drive::AtoB => (&wire.a, &wire.b),
                Drive::BtoA => (&wire.b, &wire.a),
                Drive::None => continue,
            };
            let Some(signal) = components
                .get(&src.component)
                .and_then(|c| c.pin(&src.pin))
                .map(|pin| pin.signal)
            else {
                continue;
            };
            wire.signal = signal;
            if let Some(pin) = components.get_mut(&dst.component).and_then(|c| c.pin_mut(&dst.pin)) {
                pin.signal = signal;
            }
        }
    }

    /// Force every pin and wire signal to UNKNOWN. Component state is kept.
    pub fn clear_signals(&mut self) {
        for component in self.components.values_mut() {
            component.clear_signals();
        }
        for wire in self.wires.values_mut() {
            wire.signal = Default::default();
        }
    }
}
