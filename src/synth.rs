//! Gate-level synthesis from canonical forms.
//!
//! A PDNF string becomes: one Switch per variable, one NOT gate per variable
//! (always wired from its switch), one AND gate per term, a final OR gate when
//! there is more than one term, and an LED on the final output. A PCNF string is
//! the dual (OR per clause, final AND).
//!
//! How terms wider than two literals (and forms with more than two terms) are
//! realized is chosen by [`SynthMode`]. Components are created through a
//! [`Registry`] and added to the target circuit in the order above. When a build
//! fails part-way, whatever was already added stays in the circuit.

use log::{debug, warn};
use serde_json::json;

use crate::circuit::Circuit;
use crate::component::{Component, Properties};
use crate::error::{Error, Result};
use crate::expr::BooleanExpression;
use crate::forms::{pcnf, pdnf};
use crate::registry::Registry;
use crate::table::TruthTable;
use crate::types::Position;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SynthMode {
    /// Two-input gates only. Literals past the second in a term, and terms past the
    /// second at the final gate, are left unwired.
    #[default]
    Legacy,
    /// Fail if any gate would need more than two inputs.
    Reject,
    /// Realize any arity with a balanced tree of two-input gates.
    Balanced,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct SynthConfig {
    pub mode: SynthMode,
}

/// Which canonical form a string is in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NormalForm {
    Pdnf,
    Pcnf,
}

impl NormalForm {
    /// (term separator, literal separator)
    fn separators(self) -> (char, char) {
        match self {
            NormalForm::Pdnf => ('|', '&'),
            NormalForm::Pcnf => ('&', '|'),
        }
    }

    fn term_gate(self) -> &'static str {
        match self {
            NormalForm::Pdnf => "and",
            NormalForm::Pcnf => "or",
        }
    }

    fn final_gate(self) -> &'static str {
        match self {
            NormalForm::Pdnf => "or",
            NormalForm::Pcnf => "and",
        }
    }
}

/// A literal: variable name and polarity.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Literal {
    pub var: String,
    pub positive: bool,
}

/// Split a canonical form into terms of literals.
///
/// No validation beyond shape: names are checked against the variable list
/// during construction.
pub fn parse_form(text: &str, form: NormalForm) -> Vec<Vec<Literal>> {
    let (outer, inner) = form.separators();
    text.split(outer)
        .filter_map(|term| {
            let term = term.trim().trim_matches(|c| c == '(' || c == ')');
            let literals: Vec<Literal> = term
                .split(inner)
                .map(str::trim)
                .filter(|lit| !lit.is_empty())
                .map(|lit| match lit.strip_prefix(['!', '~', '¬']) {
                    Some(var) => Literal {
                        var: var.trim().to_string(),
                        positive: false,
                    },
                    None => Literal {
                        var: lit.to_string(),
                        positive: true,
                    },
                })
                .collect();
            (!literals.is_empty()).then_some(literals)
        })
        .collect()
}

/// Ids of what a build added to the circuit.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Netlist {
    /// One per variable, in variable order.
    pub switches: Vec<String>,
    /// One per variable, in variable order.
    pub inverters: Vec<String>,
    /// Output gate of each term.
    pub terms: Vec<String>,
    /// Every gate built for terms and the final level, in creation order.
    pub gates: Vec<String>,
    /// Gate feeding the LED.
    pub output: String,
    pub led: String,
    /// Literals left unwired (legacy mode only).
    pub dropped_literals: usize,
    /// Terms left unwired at the final gate (legacy mode only).
    pub dropped_terms: usize,
}

const ORIGIN: Position = Position { x: 80.0, y: 80.0 };
const SPACING_X: f64 = 150.0;
const SPACING_Y: f64 = 100.0;

fn column(col: usize, row: f64) -> Position {
    ORIGIN.offset(col as f64 * SPACING_X, row * SPACING_Y)
}

pub struct Synthesizer<'a> {
    registry: &'a Registry,
    config: SynthConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self::with_config(registry, SynthConfig::default())
    }

    pub fn with_config(registry: &'a Registry, config: SynthConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> SynthConfig {
        self.config
    }

    pub fn try_build_from_pdnf(&self, circuit: &mut Circuit, text: &str, variables: &[String]) -> Result<Netlist> {
        self.try_build(circuit, text, variables, NormalForm::Pdnf)
    }

    pub fn try_build_from_pcnf(&self, circuit: &mut Circuit, text: &str, variables: &[String]) -> Result<Netlist> {
        self.try_build(circuit, text, variables, NormalForm::Pcnf)
    }

    /// Returns `false` on failure, logging the reason. The circuit may hold a
    /// partial netlist afterwards.
    pub fn build_from_pdnf(&self, circuit: &mut Circuit, text: &str, variables: &[String]) -> bool {
        report(self.try_build_from_pdnf(circuit, text, variables))
    }

    pub fn build_from_pcnf(&self, circuit: &mut Circuit, text: &str, variables: &[String]) -> bool {
        report(self.try_build_from_pcnf(circuit, text, variables))
    }

    /// Analyze `expression` and build the requested canonical form of it.
    pub fn try_build_from_expression(
        &self,
        circuit: &mut Circuit,
        expression: &str,
        form: NormalForm,
    ) -> Result<Netlist> {
        let expr = BooleanExpression::parse(expression)?;
        let table = TruthTable::generate(&expr)?;
        self.try_build_from_table(circuit, &table, form)
    }

    pub fn try_build_from_table(&self, circuit: &mut Circuit, table: &TruthTable, form: NormalForm) -> Result<Netlist> {
        let text = match form {
            NormalForm::Pdnf => pdnf(table),
            NormalForm::Pcnf => pcnf(table),
        };
        self.try_build(circuit, &text, table.variables(), form)
    }

    pub fn try_build(
        &self,
        circuit: &mut Circuit,
        text: &str,
        variables: &[String],
        form: NormalForm,
    ) -> Result<Netlist> {
        debug!("synthesize {:?} '{}' over {:?} ({:?})", form, text, variables, self.config.mode);

        let terms = parse_form(text, form);
        if terms.is_empty() {
            return Err(Error::Synthesis(format!("no terms in '{}'", text)));
        }
        if self.config.mode == SynthMode::Reject {
            if terms.len() > 2 {
                return Err(Error::Synthesis(format!(
                    "{} terms need a {}-input final gate",
                    terms.len(),
                    terms.len()
                )));
            }
            if let Some(wide) = terms.iter().find(|t| t.len() > 2) {
                return Err(Error::Synthesis(format!("term with {} literals needs a wider gate", wide.len())));
            }
        }

        let mut netlist = Netlist::default();

        for (i, var) in variables.iter().enumerate() {
            let switch = self.create("switch", var, column(0, i as f64), None)?;
            netlist.switches.push(circuit.add_component(switch));
        }
        for (i, var) in variables.iter().enumerate() {
            let not = self.create("not", &format!("NOT_{}", var), column(1, i as f64), None)?;
            let id = circuit.add_component(not);
            circuit.connect(&netlist.switches[i], "out", &id, "in0")?;
            netlist.inverters.push(id);
        }

        let term_label = form.term_gate().to_uppercase();
        for (i, term) in terms.iter().enumerate() {
            let sources = term
                .iter()
                .map(|lit| {
                    let j = variables
                        .iter()
                        .position(|v| *v == lit.var)
                        .ok_or_else(|| Error::Synthesis(format!("unknown variable '{}'", lit.var)))?;
                    Ok(if lit.positive {
                        netlist.switches[j].clone()
                    } else {
                        netlist.inverters[j].clone()
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let label = format!("{}{}", term_label, i + 1);
            let id = self.combine(
                circuit,
                &mut netlist,
                sources,
                form.term_gate(),
                &label,
                column(2, i as f64),
                false,
            )?;
            netlist.terms.push(id);
        }

        let output = if netlist.terms.len() == 1 {
            netlist.terms[0].clone()
        } else {
            let label = format!("{}_FINAL", form.final_gate().to_uppercase());
            let center = (netlist.terms.len() - 1) as f64 / 2.0;
            let sources = netlist.terms.clone();
            self.combine(circuit, &mut netlist, sources, form.final_gate(), &label, column(3, center), true)?
        };

        let y = circuit
            .get_component(&output)
            .map(|c| c.position.y)
            .unwrap_or(ORIGIN.y);
        let led = self.create("led", "Output", Position::new(ORIGIN.x + 4.0 * SPACING_X, y), None)?;
        let led = circuit.add_component(led);
        circuit.connect(&output, "out", &led, "in")?;

        netlist.output = output;
        netlist.led = led;
        if netlist.dropped_literals > 0 || netlist.dropped_terms > 0 {
            warn!(
                "Synthesis left {} literal(s) and {} term(s) unwired",
                netlist.dropped_literals, netlist.dropped_terms
            );
        }
        debug!("synthesized {} gates", netlist.gates.len());
        Ok(netlist)
    }

    fn create(&self, type_name: &str, label: &str, position: Position, inputs: Option<usize>) -> Result<Component> {
        let mut props = Properties::new();
        if let Some(n) = inputs {
            props.insert("num_inputs".into(), json!(n));
        }
        Ok(self.registry.create(type_name, &props)?.with_label(label).at(position))
    }

    /// Build a gate (or gate tree) of `type_name` over the outputs of `sources`
    /// and return the id of the gate producing the result.
    #[allow(clippy::too_many_arguments)]
    fn combine(
        &self,
        circuit: &mut Circuit,
        netlist: &mut Netlist,
        sources: Vec<String>,
        type_name: &str,
        label: &str,
        position: Position,
        final_level: bool,
    ) -> Result<String> {
        match self.config.mode {
            SynthMode::Legacy => {
                let gate = circuit.add_component(self.create(type_name, label, position, None)?);
                netlist.gates.push(gate.clone());
                for (i, source) in sources.iter().take(2).enumerate() {
                    circuit.connect(source, "out", &gate, &format!("in{}", i))?;
                }
                let dropped = sources.len().saturating_sub(2);
                if final_level {
                    netlist.dropped_terms += dropped;
                } else {
                    netlist.dropped_literals += dropped;
                }
                Ok(gate)
            }
            SynthMode::Reject | SynthMode::Balanced => {
                if sources.len() == 1 {
                    let gate = circuit.add_component(self.create(type_name, label, position, Some(1))?);
                    netlist.gates.push(gate.clone());
                    circuit.connect(&sources[0], "out", &gate, "in0")?;
                    return Ok(gate);
                }
                let mut layer = sources;
                let mut depth = 0;
                while layer.len() > 1 {
                    let mut next = Vec::with_capacity(layer.len().div_ceil(2));
                    for pair in layer.chunks(2) {
                        if let [a, b] = pair {
                            let tag = if layer.len() == 2 {
                                label.to_string()
                            } else {
                                format!("{}_{}.{}", label, depth, next.len())
                            };
                            let gate = circuit.add_component(self.create(type_name, &tag, position, Some(2))?);
                            netlist.gates.push(gate.clone());
                            circuit.connect(a, "out", &gate, "in0")?;
                            circuit.connect(b, "out", &gate, "in1")?;
                            next.push(gate);
                        } else {
                            next.push(pair[0].clone());
                        }
                    }
                    layer = next;
                    depth += 1;
                }
                Ok(layer.remove(0))
            }
        }
    }
}

fn report(result: Result<Netlist>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            warn!("{}", e);
            false
        }
    }
}

/// Build the PDNF (or PCNF) realization of `table` into `circuit`.
pub fn build_circuit_from_truth_table(
    circuit: &mut Circuit,
    registry: &Registry,
    table: &TruthTable,
    use_pdnf: bool,
) -> bool {
    let form = if use_pdnf { NormalForm::Pdnf } else { NormalForm::Pcnf };
    report(Synthesizer::new(registry).try_build_from_table(circuit, table, form))
}
