//! # logic-rs: Digital Logic Simulation in Rust
//!
//! **`logic-rs`** simulates gate-level digital circuits in discrete steps and analyzes boolean
//! expressions: truth tables, canonical forms, and synthesis of a circuit from a canonical form.
//!
//! ## Circuits
//!
//! A [`Circuit`][crate::circuit::Circuit] owns components and the wires between their pins.
//! Wires name their endpoints by component id and pin name, so the graph has no back-pointers.
//! Component kinds form one closed enum, [`ComponentKind`][crate::component::ComponentKind]:
//! gates, flip-flops and latches, registers, multiplexers, decoders, adders, comparators, and
//! the input/output devices (switches, buttons, LEDs, clocks).
//!
//! A [`Simulator`][crate::sim::Simulator] advances a circuit one step at a time:
//! propagate wires, evaluate every component until nothing changes (bounded), propagate again.
//!
//! ```rust
//! use logic_rs::circuit::Circuit;
//! use logic_rs::component::Component;
//! use logic_rs::gate::GateType;
//! use logic_rs::sim::Simulator;
//!
//! let mut circuit = Circuit::new("and");
//! let a = circuit.add_component(Component::switch());
//! let b = circuit.add_component(Component::switch());
//! let g = circuit.add_component(Component::gate(GateType::And, 2));
//! let led = circuit.add_component(Component::led());
//! circuit.connect(&a, "out", &g, "in0").unwrap();
//! circuit.connect(&b, "out", &g, "in1").unwrap();
//! circuit.connect(&g, "out", &led, "in").unwrap();
//!
//! circuit.get_component_mut(&a).unwrap().set_state(true);
//! circuit.get_component_mut(&b).unwrap().set_state(true);
//!
//! // The LED sees the gate output one step after the gate computes it.
//! let mut sim = Simulator::new();
//! sim.run(&mut circuit, 2);
//! assert_eq!(circuit.get_component(&led).unwrap().is_lit(), Some(true));
//! ```
//!
//! ## Boolean Expressions
//!
//! Expressions accept several spellings per operator (`&`, `∧`, `and`, ...). Variables are the
//! identifiers in the expression, sorted; that order fixes the truth table columns, with the
//! first variable as the most significant bit.
//!
//! ```rust
//! use logic_rs::forms::analyze;
//!
//! let analysis = analyze("A and B").unwrap();
//! assert_eq!(analysis.pdnf, "(A&B)");
//! assert_eq!(analysis.pcnf, "(A|B) & (A|!B) & (!A|B)");
//! assert_eq!(analysis.zhegalkin, "A&B");
//! ```
//!
//! ## Core Components
//!
//! - **[`circuit`]** and **[`sim`]**: the graph and the step engine.
//! - **[`component`]** and **[`registry`]**: component kinds and creating them by type name.
//! - **[`expr`]**, **[`table`]**, **[`forms`]**: parsing, truth tables, PDNF / PCNF / Zhegalkin.
//! - **[`synth`]**: building a circuit from a canonical form.
//! - **[`document`]** and **[`dot`]**: JSON documents and Graphviz output.

pub mod ast;
pub mod blocks;
pub mod circuit;
pub mod component;
pub mod document;
pub mod dot;
pub mod error;
pub mod expr;
pub mod forms;
pub mod gate;
pub mod io;
pub mod lexer;
pub mod memory;
pub mod parser;
pub mod pin;
pub mod registry;
pub mod signal;
pub mod sim;
pub mod synth;
pub mod table;
pub mod types;
pub mod wire;
