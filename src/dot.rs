//! Circuit to DOT (Graphviz) conversion.
//!
//! This module renders a [`Circuit`] as a directed graph in DOT format, which can be
//! visualized with Graphviz tools like `dot` or any online viewer.
//!
//! # DOT Format
//!
//! The generated output follows these conventions:
//! - **Source components** (switches, buttons, input pins, clocks) sit on the left
//!   (source rank)
//! - **Sink components** (LEDs, output pins) sit on the right (sink rank)
//! - **Other components** are boxes labeled with their label and id
//! - **Edges** point from the driving OUTPUT pin to the driven pin, annotated with
//!   both pin names:
//!   - Bold lines carry HIGH
//!   - Solid lines carry LOW
//!   - Dashed lines carry UNKNOWN or HIGH-Z
//!   - Dotted lines without arrowheads are wires nothing drives
//!
//! # Examples
//!
//! ```
//! use logic_rs::circuit::Circuit;
//! use logic_rs::component::Component;
//! use logic_rs::gate::GateType;
//!
//! let mut circuit = Circuit::new("demo");
//! let a = circuit.add_component(Component::switch());
//! let g = circuit.add_component(Component::gate(GateType::Not, 1));
//! circuit.connect(&a, "out", &g, "in0").unwrap();
//!
//! let dot = circuit.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use crate::circuit::Circuit;
use crate::component::{Component, ComponentKind};
use crate::signal::SignalState;
use crate::wire::Drive;

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use logic_rs::circuit::Circuit;
/// use logic_rs::dot::DotConfig;
///
/// let circuit = Circuit::new("empty");
/// let config = DotConfig {
///     node_shape: "ellipse",
///     show_pins: false,
///     ..DotConfig::default()
/// };
///
/// let dot = circuit.to_dot_with_config(&config).unwrap();
/// assert!(dot.starts_with("digraph"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for ordinary components (default: "box")
    pub node_shape: &'static str,
    /// Shape for source components (default: "invhouse")
    pub source_shape: &'static str,
    /// Shape for sink components (default: "doublecircle")
    pub sink_shape: &'static str,
    /// Style for edges carrying HIGH (default: "bold")
    pub high_edge_style: &'static str,
    /// Style for edges carrying LOW (default: "solid")
    pub low_edge_style: &'static str,
    /// Style for edges carrying UNKNOWN or HIGH-Z (default: "dashed")
    pub unknown_edge_style: &'static str,
    /// Whether to annotate edges with pin names (default: true)
    pub show_pins: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "box",
            source_shape: "invhouse",
            sink_shape: "doublecircle",
            high_edge_style: "bold",
            low_edge_style: "solid",
            unknown_edge_style: "dashed",
            show_pins: true,
        }
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn is_source(component: &Component) -> bool {
    matches!(
        component.kind(),
        ComponentKind::Switch(_) | ComponentKind::Button(_) | ComponentKind::InputPin(_) | ComponentKind::Clock(_)
    )
}

fn is_sink(component: &Component) -> bool {
    matches!(component.kind(), ComponentKind::Led(_) | ComponentKind::OutputPin(_))
}

impl Circuit {
    /// Converts the circuit to DOT (Graphviz) format.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - A DOT-formatted string representation of the circuit
    /// * `Err(std::fmt::Error)` - If string formatting fails (rare)
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the circuit to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {} {{", quote(&self.name))?;
        writeln!(dot, "rankdir=LR;")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        let node = |dot: &mut String, c: &Component, shape: Option<&str>| -> std::fmt::Result {
            let label = quote(&format!("{}\\n{}", c.label, c.id));
            match shape {
                Some(shape) => writeln!(dot, "{} [shape={}, label={}];", quote(&c.id), shape, label),
                None => writeln!(dot, "{} [label={}];", quote(&c.id), label),
            }
        };

        writeln!(dot, "{{ rank=source")?;
        for c in self.components().filter(|c| is_source(c)) {
            node(&mut dot, c, Some(config.source_shape))?;
        }
        writeln!(dot, "}}")?;

        for c in self.components().filter(|c| !is_source(c) && !is_sink(c)) {
            node(&mut dot, c, None)?;
        }

        writeln!(dot, "{{ rank=sink")?;
        for c in self.components().filter(|c| is_sink(c)) {
            node(&mut dot, c, Some(config.sink_shape))?;
        }
        writeln!(dot, "}}")?;

        for wire in self.wires() {
            let (Some(a), Some(b)) = (self.pin(&wire.a), self.pin(&wire.b)) else {
                continue;
            };
            let (src, dst) = match Drive::resolve(a.direction, b.direction) {
                Drive::AtoB => (&wire.a, &wire.b),
                Drive::BtoA => (&wire.b, &wire.a),
                Drive::None => {
                    writeln!(
                        dot,
                        "{} -> {} [style=dotted, dir=none];",
                        quote(&wire.a.component),
                        quote(&wire.b.component)
                    )?;
                    continue;
                }
            };
            let style = match wire.signal.state() {
                SignalState::High => config.high_edge_style,
                SignalState::Low => config.low_edge_style,
                SignalState::Unknown | SignalState::HighZ => config.unknown_edge_style,
            };
            write!(dot, "{} -> {} [style={}", quote(&src.component), quote(&dst.component), style)?;
            if config.show_pins {
                write!(dot, ", taillabel={}, headlabel={}", quote(&src.pin), quote(&dst.pin))?;
            }
            writeln!(dot, "];")?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
