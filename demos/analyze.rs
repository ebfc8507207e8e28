use clap::{Parser, ValueEnum};
use log::info;

use logic_rs::circuit::Circuit;
use logic_rs::expr::BooleanExpression;
use logic_rs::forms::{pcnf, pdnf, zhegalkin};
use logic_rs::parser::{Associativity, ParseConfig};
use logic_rs::registry::Registry;
use logic_rs::sim::Simulator;
use logic_rs::synth::{NormalForm, SynthConfig, SynthMode, Synthesizer};
use logic_rs::table::TruthTable;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Chain {
    Left,
    Right,
    Reject,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Mode {
    Legacy,
    Reject,
    Balanced,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Boolean expression, e.g. "A and (B -> !C)".
    #[arg(value_name = "EXPR", required_unless_present = "components")]
    expression: Option<String>,

    /// List the component types available for synthesis and exit.
    #[clap(long)]
    components: bool,

    /// Grouping of chained →, ≡, ↑, ↓.
    #[clap(long, value_enum, default_value = "right")]
    chain: Chain,

    /// Synthesize the PDNF (or with --pcnf, the PCNF) and check it in the simulator.
    #[clap(long)]
    synth: bool,

    /// Synthesize from PCNF instead of PDNF.
    #[clap(long)]
    pcnf: bool,

    /// How to realize gates wider than two inputs.
    #[clap(long, value_enum, default_value = "balanced")]
    mode: Mode,

    /// Print the result as JSON.
    #[clap(long)]
    json: bool,

    /// Print the synthesized circuit as DOT.
    #[clap(long)]
    dot: bool,
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
    if args.components {
        for (category, names) in registry.categories() {
            println!("{:<12} {}", category.title(), names.join(", "));
        }
        return Ok(());
    }
    let Some(text) = args.expression.as_deref() else {
        return Ok(());
    };

    let config = ParseConfig {
        chain: match args.chain {
            Chain::Left => Associativity::Left,
            Chain::Right => Associativity::Right,
            Chain::Reject => Associativity::Reject,
        },
    };

    if args.json {
        let analysis = logic_rs::forms::analyze_with(text, config)?;
        println!("{}", analysis.to_json()?);
        return Ok(());
    }

    let expr = BooleanExpression::parse_with(text, config)?;
    let table = TruthTable::generate(&expr)?;

    println!("expression = {}", expr);
    println!("variables  = {:?}", expr.variables());
    println!();
    println!("{} | F", expr.variables().join(" "));
    for row in table.rows() {
        let inputs: Vec<_> = row
            .inputs
            .iter()
            .zip(expr.variables())
            .map(|(&v, name)| format!("{:>width$}", v as u8, width = name.chars().count()))
            .collect();
        println!("{} | {}", inputs.join(" "), row.output as u8);
    }
    println!();
    println!("PDNF      = {}", pdnf(&table));
    println!("PCNF      = {}", pcnf(&table));
    println!("Zhegalkin = {}", zhegalkin(&table));

    if !args.synth {
        return Ok(());
    }

    let mode = match args.mode {
        Mode::Legacy => SynthMode::Legacy,
        Mode::Reject => SynthMode::Reject,
        Mode::Balanced => SynthMode::Balanced,
    };
    let form = if args.pcnf { NormalForm::Pcnf } else { NormalForm::Pdnf };
    let mut circuit = Circuit::new(expr.normalized());
    let netlist = Synthesizer::with_config(&registry, SynthConfig { mode }).try_build_from_table(&mut circuit, &table, form)?;
    println!();
    println!(
        "synthesized {:?}: {} components, {} wires",
        form,
        circuit.num_components(),
        circuit.num_wires()
    );

    let mut sim = Simulator::new();
    let settle = circuit.num_components();
    let mut mismatches = 0;
    for row in table.rows() {
        for (switch, &value) in netlist.switches.iter().zip(row.inputs.iter()) {
            if let Some(c) = circuit.get_component_mut(switch) {
                c.set_state(value);
            }
        }
        sim.run(&mut circuit, settle);
        let lit = circuit.get_component(&netlist.led).and_then(|c| c.is_lit()).unwrap_or(false);
        if lit != row.output {
            mismatches += 1;
            println!("mismatch at {:?}: LED = {}, expected {}", row.inputs, lit, row.output);
        }
    }
    println!("simulated {} rows, {} mismatches", table.len(), mismatches);

    if args.dot {
        println!("{}", circuit.to_dot()?);
    }

    Ok(())
}
