//! Discrete-step simulation.
//!
//! One [`Simulator::step`] is: propagate wires, evaluate every component in
//! insertion order until a whole pass changes no output (or the iteration bound is
//! hit), then propagate once more. The simulator owns no graph entities; it drives
//! a [`Circuit`] passed in by the caller.

use std::collections::HashSet;

use log::{debug, warn};

use crate::circuit::Circuit;
use crate::signal::Signal;
use crate::types::PinRef;

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Upper bound on evaluation passes per step.
    pub max_iterations: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { max_iterations: 100 }
    }
}

/// Outcome of one step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StepReport {
    /// Tick number after the step.
    pub tick: u64,
    /// Evaluation passes performed.
    pub iterations: usize,
    /// `false` when the pass bound was hit before outputs settled.
    pub converged: bool,
}

#[derive(Debug, Default)]
pub struct Simulator {
    pub config: SimConfig,
    tick_count: u64,
    dirty: HashSet<String>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Components whose outputs changed during the last step.
    pub fn changed(&self) -> &HashSet<String> {
        &self.dirty
    }

    pub fn step(&mut self, circuit: &mut Circuit) -> StepReport {
        self.dirty.clear();
        self.tick_count += 1;
        debug!("step(tick = {})", self.tick_count);

        circuit.propagate();

        let mut iterations = 0;
        let mut converged = false;
        while iterations < self.config.max_iterations {
            iterations += 1;
            let mut changed = false;
            for component in circuit.components_mut() {
                let before = component.output_snapshot();
                component.evaluate();
                if component.output_snapshot() != before {
                    changed = true;
                    self.dirty.insert(component.id.clone());
                }
            }
            if !changed {
                converged = true;
                break;
            }
        }

        if converged {
            debug!("step converged after {} passes", iterations);
        } else {
            warn!(
                "Simulation did not converge within {} iterations (tick {})",
                self.config.max_iterations, self.tick_count
            );
        }

        circuit.propagate();

        StepReport {
            tick: self.tick_count,
            iterations,
            converged,
        }
    }

    /// Perform `n` steps and return the last report, if any step ran.
    pub fn run(&mut self, circuit: &mut Circuit, n: usize) -> Option<StepReport> {
        (0..n).map(|_| self.step(circuit)).last()
    }

    /// Clear the tick counter and every signal. Component state survives.
    pub fn reset(&mut self, circuit: &mut Circuit) {
        self.tick_count = 0;
        self.dirty.clear();
        circuit.clear_signals();
        debug!("reset()");
    }

    /// Drive an INPUT pin. Anything else is ignored.
    pub fn set_input(&self, circuit: &mut Circuit, component: &str, pin: &str, value: bool) {
        if let Some(pin) = circuit.pin_mut(&PinRef::new(component, pin)) {
            if pin.direction.is_input() {
                pin.signal = Signal::from_bool(value);
            }
        }
    }

    /// Signal on any pin; UNKNOWN when the pin does not exist.
    pub fn get_output(&self, circuit: &Circuit, component: &str, pin: &str) -> Signal {
        circuit
            .pin(&PinRef::new(component, pin))
            .map(|p| p.signal)
            .unwrap_or_default()
    }

    pub fn toggle_input(&self, circuit: &mut Circuit, component: &str, pin: &str) {
        if let Some(pin) = circuit.pin_mut(&PinRef::new(component, pin)) {
            if pin.direction.is_input() {
                pin.signal = Signal::from_bool(!bool::from(pin.signal));
            }
        }
    }
}
