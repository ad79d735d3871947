use slotmap::SecondaryMap;

use crate::{
    config::Config,
    simulation::{circuit::CircuitGraph, circuit::GateKind, connections, GateKey},
    utils,
};

/// Output value of every gate in a circuit, as of the end of one evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EvaluationResult {
    order: Vec<GateKey>,
    values: SecondaryMap<GateKey, bool>,
    iterations: usize,
    converged: bool,
}

struct Plan {
    gate: GateKey,
    kind: GateKind,
    drivers: Vec<Option<GateKey>>,
}

impl EvaluationResult {
    pub fn get(&self, gate: GateKey) -> Option<bool> {
        self.values.get(gate).copied()
    }
    /// like `get` but unknown gates read as off
    pub fn value(&self, gate: GateKey) -> bool {
        self.get(gate).unwrap_or(false)
    }

    /// values in the circuit's gate order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (GateKey, bool)> + '_ {
        self.order.iter().map(|gate| (*gate, self.values.get(*gate).copied().unwrap_or(false)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// number of relaxation passes that were run
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    /// whether the last pass changed nothing; false means the iteration cap cut evaluation off
    pub fn converged(&self) -> bool {
        self.converged
    }
}

// gate semantics {{{1
/// Output of a logic gate given the values on its input ports in port order.
///
/// The value slice has to have exactly the gate's arity, anything else (including asking an input or output gate)
/// produces `false`.
pub fn compute(kind: GateKind, inputs: &[bool]) -> bool {
    match (kind, inputs) {
        (GateKind::And, [a, b]) => *a && *b,
        (GateKind::Or, [a, b]) => *a || *b,
        (GateKind::Not, [a]) => !*a,
        (GateKind::Nand, [a, b]) => !(*a && *b),
        (GateKind::Nor, [a, b]) => !(*a || *b),
        (GateKind::Xor, [a, b]) => a != b,
        (GateKind::Xnor, [a, b]) => a == b,
        _ => false,
    }
}

/// Every input combination for a logic gate along with its output, empty for input and output gates.
pub fn truth_table(kind: GateKind) -> Vec<(Vec<bool>, bool)> {
    if matches!(kind, GateKind::Input | GateKind::Output) {
        return Vec::new();
    }

    utils::enumerate_inputs(kind.arity())
        .into_iter()
        .map(|inputs| {
            let output = compute(kind, &inputs);
            (inputs, output)
        })
        .collect()
}

// evaluation {{{1
pub fn evaluate(circuit: &CircuitGraph) -> EvaluationResult {
    evaluate_with(circuit, &Config::default())
}

/// Input gates start at their assigned value, every other gate starts off.
pub fn evaluate_with(circuit: &CircuitGraph, config: &Config) -> EvaluationResult {
    let values = circuit.gates().map(|gate| (gate.key(), circuit.input_value(gate.key()).unwrap_or(false))).collect();
    relax(circuit, values, config)
}

/// Runs the relaxation again starting from the values of a previous evaluation instead of from all gates off.
///
/// Gates missing from `previous` start off. Input gates always start at their currently assigned value.
pub fn relax_from(circuit: &CircuitGraph, previous: &EvaluationResult, config: &Config) -> EvaluationResult {
    let values = circuit.gates().map(|gate| (gate.key(), circuit.input_value(gate.key()).unwrap_or_else(|| previous.value(gate.key())))).collect();
    relax(circuit, values, config)
}

fn plan(circuit: &CircuitGraph) -> Vec<Plan> {
    let drivers = connections::driver_table(circuit);
    circuit.gates().map(|gate| Plan { gate: gate.key(), kind: gate.kind(), drivers: gate.input_ports().iter().map(|port| drivers.get(&(gate.key(), *port)).copied()).collect() }).collect()
}

// reads the values of a gate's drivers, None if any input port is unwired
fn read_inputs<'b>(values: &SecondaryMap<GateKey, bool>, drivers: &[Option<GateKey>], buffer: &'b mut [bool; 2]) -> Option<&'b [bool]> {
    for (slot, driver) in buffer.iter_mut().zip(drivers) {
        *slot = values.get((*driver)?).copied().unwrap_or(false);
    }
    Some(&buffer[..drivers.len()])
}

// gates are updated in place, so a gate later in the pass already sees the values computed earlier in the same pass
fn relax(circuit: &CircuitGraph, mut values: SecondaryMap<GateKey, bool>, config: &Config) -> EvaluationResult {
    let plan = plan(circuit);
    let mut buffer = [false; 2];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        let mut changed = 0;

        for Plan { gate, kind, drivers } in &plan {
            let new_value = match kind {
                GateKind::Output => continue,
                GateKind::Input => circuit.input_value(*gate).unwrap_or(false),
                _ => read_inputs(&values, drivers, &mut buffer).map_or(false, |inputs| compute(*kind, inputs)),
            };

            if let Some(value) = values.get_mut(*gate) {
                if *value != new_value {
                    *value = new_value;
                    changed += 1;
                }
            }
        }

        log::trace!("relaxation pass {iterations}: {changed} gate(s) changed");
        if changed == 0 {
            converged = true;
            break;
        }
    }

    // outputs only display what is wired into them
    for Plan { gate, kind, drivers } in &plan {
        if *kind == GateKind::Output {
            let value = read_inputs(&values, drivers, &mut buffer).and_then(|inputs| inputs.first().copied()).unwrap_or(false);
            values.insert(*gate, value);
        }
    }

    if converged {
        log::debug!("evaluated {} gate(s), fixed point after {iterations} pass(es)", plan.len());
    } else {
        log::debug!("evaluated {} gate(s), no fixed point within {} pass(es); keeping the values at cutoff", plan.len(), config.max_iterations);
    }

    EvaluationResult { order: plan.into_iter().map(|p| p.gate).collect(), values, iterations, converged }
}
