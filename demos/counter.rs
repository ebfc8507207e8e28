use clap::Parser;
use log::info;

use logic_rs::circuit::Circuit;
use logic_rs::component::Properties;
use logic_rs::registry::Registry;
use logic_rs::sim::Simulator;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of JK flip-flops in the ripple chain.
    #[arg(value_name = "INT", default_value = "3")]
    bits: usize,

    /// Number of simulation steps.
    #[clap(long, value_name = "INT", default_value = "32")]
    steps: usize,

    /// Save the circuit as JSON to stdout at the end.
    #[clap(long)]
    json: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    info!("args = {:?}", args);

    let registry = Registry::new();
    let mut circuit = Circuit::new("ripple counter");

    // Flipped once per step: one edge per step.
    let clock = circuit.add_component(registry.create("switch", &Properties::new())?.with_id("clk"));

    // J and K tied high by a switch, so every flip-flop toggles on its clock edge.
    let high = circuit.add_component(registry.create("switch", &Properties::new())?.with_id("high"));
    if let Some(c) = circuit.get_component_mut(&high) {
        c.set_state(true);
    }

    // Each stage is clocked from the previous stage's Q', giving a ripple up-counter.
    let mut flip_flops = Vec::new();
    let mut source = (clock, "out");
    for i in 0..args.bits {
        let ff = circuit.add_component(
            registry
                .create("jkflipflop", &Properties::new())?
                .with_id(format!("ff{}", i))
                .with_label(format!("Q{}", i)),
        );
        circuit.connect(&high, "out", &ff, "J")?;
        circuit.connect(&high, "out", &ff, "K")?;
        circuit.connect(&source.0, source.1, &ff, "CLK")?;
        source = (ff.clone(), "Q'");
        flip_flops.push(ff);
    }

    let mut sim = Simulator::new();
    for _ in 0..args.steps {
        if let Some(c) = circuit.get_component_mut("clk") {
            c.toggle();
        }
        let report = sim.step(&mut circuit);
        let value = flip_flops
            .iter()
            .enumerate()
            .filter(|(_, id)| circuit.get_component(id).and_then(|c| c.held_state()) == Some(true))
            .fold(0u64, |acc, (i, _)| acc | 1 << i);
        let bits: String = flip_flops
            .iter()
            .rev()
            .map(|id| match circuit.get_component(id).and_then(|c| c.held_state()) {
                Some(true) => '1',
                _ => '0',
            })
            .collect();
        println!(
            "tick {:>3}: clk={} {} = {:>3} (passes: {}, converged: {})",
            report.tick,
            sim.get_output(&circuit, "clk", "out"),
            bits,
            value,
            report.iterations,
            report.converged
        );
    }

    if args.json {
        println!("{}", circuit.to_json()?);
    }

    Ok(())
}
