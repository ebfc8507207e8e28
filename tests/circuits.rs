use test_log::test;

use logic_rs::circuit::Circuit;
use logic_rs::component::{Component, Properties};
use logic_rs::expr::BooleanExpression;
use logic_rs::gate::GateType;
use logic_rs::registry::Registry;
use logic_rs::sim::Simulator;
use logic_rs::synth::{build_circuit_from_truth_table, NormalForm, SynthConfig, SynthMode, Synthesizer};
use logic_rs::table::TruthTable;
use logic_rs::types::PinRef;

fn create(registry: &Registry, circuit: &mut Circuit, type_name: &str, id: &str) -> String {
    let component = registry.create(type_name, &Properties::new()).unwrap().with_id(id);
    circuit.add_component(component)
}

fn set(circuit: &mut Circuit, id: &str, value: bool) {
    assert!(circuit.get_component_mut(id).unwrap().set_state(value));
}

fn lit(circuit: &Circuit, id: &str) -> bool {
    circuit.get_component(id).unwrap().is_lit().unwrap()
}

#[test]
fn test_switches_and_gate_led() {
    let mut circuit = Circuit::new("and");
    circuit.add_component(Component::switch().with_id("A"));
    circuit.add_component(Component::switch().with_id("B"));
    circuit.add_component(Component::gate(GateType::And, 2).with_id("and"));
    circuit.add_component(Component::led().with_id("led"));
    circuit.connect("A", "out", "and", "in0").unwrap();
    circuit.connect("B", "out", "and", "in1").unwrap();
    circuit.connect("and", "out", "led", "in").unwrap();

    let mut sim = Simulator::new();
    set(&mut circuit, "A", true);
    set(&mut circuit, "B", true);
    sim.step(&mut circuit);
    sim.step(&mut circuit);
    assert!(lit(&circuit, "led"));

    set(&mut circuit, "B", false);
    sim.step(&mut circuit);
    sim.step(&mut circuit);
    assert!(!lit(&circuit, "led"));
}

#[test]
fn test_half_adder_from_registry() {
    let registry = Registry::new();
    let mut circuit = Circuit::default();
    create(&registry, &mut circuit, "switch", "a");
    create(&registry, &mut circuit, "switch", "b");
    create(&registry, &mut circuit, "halfadder", "ha");
    create(&registry, &mut circuit, "led", "sum");
    create(&registry, &mut circuit, "led", "carry");
    circuit.connect("a", "out", "ha", "A").unwrap();
    circuit.connect("b", "out", "ha", "B").unwrap();
    circuit.connect("ha", "SUM", "sum", "in").unwrap();
    circuit.connect("ha", "CARRY", "carry", "in").unwrap();

    let mut sim = Simulator::new();
    for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
        set(&mut circuit, "a", a);
        set(&mut circuit, "b", b);
        sim.run(&mut circuit, 2);
        assert_eq!(lit(&circuit, "sum"), a ^ b);
        assert_eq!(lit(&circuit, "carry"), a && b);
    }
}

#[test]
fn test_feedback_latch_from_nor_gates() {
    // Cross-coupled NOR latch: feedback converges within the iteration bound.
    let mut circuit = Circuit::default();
    circuit.add_component(Component::switch().with_id("S"));
    circuit.add_component(Component::switch().with_id("R"));
    circuit.add_component(Component::gate(GateType::Nor, 2).with_id("n1"));
    circuit.add_component(Component::gate(GateType::Nor, 2).with_id("n2"));
    circuit.connect("R", "out", "n1", "in0").unwrap();
    circuit.connect("n2", "out", "n1", "in1").unwrap();
    circuit.connect("S", "out", "n2", "in0").unwrap();
    circuit.connect("n1", "out", "n2", "in1").unwrap();

    let mut sim = Simulator::new();
    set(&mut circuit, "S", true);
    set(&mut circuit, "R", false);
    sim.run(&mut circuit, 4);
    assert!(sim.get_output(&circuit, "n1", "out").is_high());

    set(&mut circuit, "S", false);
    let report = sim.run(&mut circuit, 4).unwrap();
    assert!(report.converged);
    assert!(sim.get_output(&circuit, "n1", "out").is_high());
    assert!(sim.get_output(&circuit, "n2", "out").is_low());
}

#[test]
fn test_synthesized_and_matches_table() {
    let registry = Registry::new();
    let mut circuit = Circuit::default();
    let vars = vec!["A".to_string(), "B".to_string()];
    let netlist = Synthesizer::new(&registry)
        .try_build_from_pdnf(&mut circuit, "(A&B)", &vars)
        .unwrap();

    assert_eq!(circuit.components_of_type("switch").count(), 2);
    assert_eq!(circuit.components_of_type("not").count(), 2);
    assert_eq!(circuit.components_of_type("and").count(), 1);
    assert_eq!(circuit.components_of_type("led").count(), 1);

    let gate = &netlist.terms[0];
    for (i, switch) in netlist.switches.iter().enumerate() {
        let pin = PinRef::new(gate.as_str(), format!("in{}", i));
        let wire = circuit.wires_at(&pin).next().unwrap();
        assert!(wire.touches(&PinRef::new(switch.as_str(), "out")));
    }
    let led_in = PinRef::new(netlist.led.as_str(), "in");
    assert!(circuit.wires_at(&led_in).next().unwrap().touches_component(gate));

    let mut sim = Simulator::new();
    set(&mut circuit, &netlist.switches[0], true);
    set(&mut circuit, &netlist.switches[1], true);
    sim.run(&mut circuit, 3);
    assert!(lit(&circuit, &netlist.led));
}

fn assert_circuit_matches(text: &str, mode: SynthMode, form: NormalForm) {
    let registry = Registry::new();
    let expr = BooleanExpression::parse(text).unwrap();
    let table = TruthTable::generate(&expr).unwrap();
    let mut circuit = Circuit::new(text);
    let netlist = Synthesizer::with_config(&registry, SynthConfig { mode })
        .try_build_from_table(&mut circuit, &table, form)
        .unwrap();

    let mut sim = Simulator::new();
    let depth = circuit.num_components();
    for row in table.rows() {
        for (switch, &value) in netlist.switches.iter().zip(row.inputs.iter()) {
            set(&mut circuit, switch, value);
        }
        sim.run(&mut circuit, depth);
        assert_eq!(lit(&circuit, &netlist.led), row.output, "{} ({:?}) at {:?}", text, form, row.inputs);
    }
}

#[test]
fn test_legacy_synthesis_is_exact_for_two_literal_forms() {
    // Two variables and at most two terms: nothing is truncated.
    for text in ["A & B", "A & !B", "(A & !B) | (!A & B)", "A = B"] {
        assert_circuit_matches(text, SynthMode::Legacy, NormalForm::Pdnf);
    }
    for text in ["A | B", "A -> B", "A ^ B"] {
        assert_circuit_matches(text, SynthMode::Legacy, NormalForm::Pcnf);
    }
}

#[test]
fn test_balanced_synthesis_is_exact() {
    for text in ["A & B & C", "A ^ B ^ C", "(A -> B) & (C | !D)", "A | B | C | D"] {
        assert_circuit_matches(text, SynthMode::Balanced, NormalForm::Pdnf);
        assert_circuit_matches(text, SynthMode::Balanced, NormalForm::Pcnf);
    }
}

#[test]
fn test_build_from_truth_table_reports_failure() {
    let registry = Registry::new();
    let table = TruthTable::from_outputs(vec!["A".into(), "B".into()], &[false; 4]).unwrap();
    let mut circuit = Circuit::default();
    // PDNF of the zero function is "0", which is not a variable.
    assert!(!build_circuit_from_truth_table(&mut circuit, &registry, &table, true));
    assert!(circuit.components_of_type("led").next().is_none());

    let mut circuit = Circuit::default();
    assert!(build_circuit_from_truth_table(&mut circuit, &registry, &table, false));
}

#[test]
fn test_document_round_trip_of_synthesized_circuit() {
    let registry = Registry::new();
    let expr = BooleanExpression::parse("A ^ B ^ C").unwrap();
    let table = TruthTable::generate(&expr).unwrap();
    let mut circuit = Circuit::new("parity");
    let netlist = Synthesizer::with_config(&registry, SynthConfig { mode: SynthMode::Balanced })
        .try_build_from_table(&mut circuit, &table, NormalForm::Pdnf)
        .unwrap();

    let json = circuit.to_json().unwrap();
    let mut loaded = Circuit::from_json(&json, &registry).unwrap();
    assert_eq!(loaded.to_document(), circuit.to_document());

    let mut sim = Simulator::new();
    let depth = loaded.num_components();
    for row in table.rows() {
        for (switch, &value) in netlist.switches.iter().zip(row.inputs.iter()) {
            set(&mut loaded, switch, value);
        }
        sim.run(&mut loaded, depth);
        assert_eq!(lit(&loaded, &netlist.led), row.output);
    }
}

#[test]
fn test_dot_of_synthesized_circuit() {
    let registry = Registry::new();
    let mut circuit = Circuit::new("f");
    Synthesizer::new(&registry)
        .try_build_from_expression(&mut circuit, "A | B", NormalForm::Pdnf)
        .unwrap();
    let dot = circuit.to_dot().unwrap();
    assert_eq!(dot.matches(" -> ").count(), circuit.num_wires());
}
