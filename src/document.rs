//! Persisted form of a circuit.
//!
//! Wires refer to pins by owning component id and pin name. Loading is lenient:
//! a component of unknown type, or a wire whose endpoints do not resolve, is
//! skipped with a warning and the rest of the document still loads.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::component::Properties;
use crate::error::Result;
use crate::registry::Registry;
use crate::types::{PinRef, Position};
use crate::wire::Wire;

pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDocument {
    pub version: String,
    #[serde(default = "untitled")]
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    #[serde(default)]
    pub wires: Vec<WireRecord>,
}

fn untitled() -> String {
    "Untitled".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRecord {
    pub id: String,
    pub start_component: String,
    pub start_pin: String,
    pub end_component: String,
    pub end_pin: String,
}

impl CircuitDocument {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Circuit {
    pub fn to_document(&self) -> CircuitDocument {
        let components = self
            .components()
            .map(|c| ComponentRecord {
                id: c.id.clone(),
                type_name: c.type_name().to_string(),
                label: c.label.clone(),
                position: c.position,
                properties: c.properties.clone(),
            })
            .collect();
        let wires = self
            .wires()
            .map(|w| WireRecord {
                id: w.id.clone(),
                start_component: w.a.component.clone(),
                start_pin: w.a.pin.clone(),
                end_component: w.b.component.clone(),
                end_pin: w.b.pin.clone(),
            })
            .collect();
        CircuitDocument {
            version: FORMAT_VERSION.to_string(),
            name: self.name.clone(),
            components,
            wires,
        }
    }

    /// Rebuild a circuit, creating components through `registry`.
    pub fn from_document(doc: &CircuitDocument, registry: &Registry) -> Circuit {
        if doc.version != FORMAT_VERSION {
            warn!("Document version {} differs from {}", doc.version, FORMAT_VERSION);
        }
        let mut circuit = Circuit::new(doc.name.clone());

        for record in doc.components.iter() {
            match registry.create(&record.type_name, &record.properties) {
                Ok(mut component) => {
                    component.id = record.id.clone();
                    if !record.label.is_empty() {
                        component.label = record.label.clone();
                    }
                    component.position = record.position;
                    circuit.add_component(component);
                }
                Err(e) => warn!("Skipping component '{}': {}", record.id, e),
            }
        }

        for record in doc.wires.iter() {
            let wire = Wire::new(
                PinRef::new(&record.start_component, &record.start_pin),
                PinRef::new(&record.end_component, &record.end_pin),
            )
            .with_id(&record.id);
            if let Err(e) = circuit.add_wire(wire) {
                warn!("Skipping wire '{}': {}", record.id, e);
            }
        }

        debug!(
            "loaded '{}' with {} components and {} wires",
            circuit.name,
            circuit.num_components(),
            circuit.num_wires()
        );
        circuit
    }

    pub fn to_json(&self) -> Result<String> {
        self.to_document().to_json()
    }

    pub fn from_json(text: &str, registry: &Registry) -> Result<Circuit> {
        let doc = CircuitDocument::from_json(text)?;
        Ok(Circuit::from_document(&doc, registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::component::Component;
    use crate::gate::GateType;

    fn sample() -> Circuit {
        let mut circuit = Circuit::new("half");
        let a = circuit.add_component(Component::switch().with_label("A").at(Position::new(10.0, 20.0)));
        let b = circuit.add_component(Component::switch().with_label("B"));
        let x = circuit.add_component(Component::gate(GateType::Xor, 3));
        circuit.connect(&a, "out", &x, "in0").unwrap();
        circuit.connect(&b, "out", &x, "in2").unwrap();
        circuit
    }

    #[test]
    fn test_round_trip() {
        let registry = Registry::new();
        let circuit = sample();
        let json = circuit.to_json().unwrap();
        let loaded = Circuit::from_json(&json, &registry).unwrap();

        assert_eq!(loaded.name, "half");
        assert_eq!(loaded.to_document(), circuit.to_document());
        let xor = loaded.get_component("comp_2").unwrap();
        assert_eq!(xor.input_pins().count(), 3);
        assert_eq!(loaded.get_component("comp_0").unwrap().position, Position::new(10.0, 20.0));
    }

    #[test]
    fn test_document_shape() {
        let doc = sample().to_document();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["components"][2]["type"], "xor");
        assert_eq!(value["components"][2]["properties"]["num_inputs"], 3);
        assert_eq!(value["wires"][1]["end_pin"], "in2");
        assert_eq!(value["wires"][1]["start_component"], "comp_1");
    }

    #[test]
    fn test_lenient_load() {
        let text = r#"{
            "version": "1.0",
            "name": "broken",
            "components": [
                {"id": "s", "type": "Switch", "label": "S", "position": {"x": 0, "y": 0}, "properties": {}},
                {"id": "l", "type": "LED", "label": "L", "position": {"x": 1, "y": 1}, "properties": {}},
                {"id": "q", "type": "Quantum", "label": "?", "position": {"x": 2, "y": 2}, "properties": {}}
            ],
            "wires": [
                {"id": "w1", "start_component": "s", "start_pin": "out", "end_component": "l", "end_pin": "in"},
                {"id": "w2", "start_component": "s", "start_pin": "out", "end_component": "q", "end_pin": "in"},
                {"id": "w3", "start_component": "s", "start_pin": "nope", "end_component": "l", "end_pin": "in"}
            ]
        }"#;
        let circuit = Circuit::from_json(text, &Registry::new()).unwrap();
        assert_eq!(circuit.num_components(), 2);
        assert_eq!(circuit.num_wires(), 1);
        assert!(circuit.get_wire("w1").is_some());
        assert_eq!(circuit.get_component("l").unwrap().type_name(), "led");
    }

    #[test]
    fn test_malformed_json() {
        assert!(Circuit::from_json("{ not json", &Registry::new()).is_err());
    }
}
