pub mod circuit;
pub mod connections;
pub mod error;
pub mod logic;

use crate::config::Config;

use circuit::{CircuitGraph, GateKind, Position};
use error::CircuitError;
use logic::EvaluationResult;

slotmap::new_key_type! {
    pub struct GateKey;
    pub struct ConnectionKey;
}

pub(crate) type GateMap = slotmap::SlotMap<GateKey, circuit::Gate>;
pub(crate) type ConnectionMap = slotmap::SlotMap<ConnectionKey, connections::Connection>;

/// Owns a circuit together with the running flag that decides whether mutations trigger an evaluation.
///
/// While running, every successful mutation re-evaluates the whole circuit and the result is available from
/// [`Simulation::outputs`]. While stopped nothing is evaluated and `outputs` is `None`, so stale values cannot be
/// mistaken for current ones.
#[derive(Debug, Default)]
pub struct Simulation {
    circuit: CircuitGraph,
    config: Config,
    running: bool,
    outputs: Option<EvaluationResult>,
}

/// A mutation request from whatever is editing the circuit.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    AddGate(GateKind, Position),
    RemoveGate(GateKey),
    Connect { from: GateKey, from_port: String, to: GateKey, to_port: String },
    Disconnect(ConnectionKey),
    SetInput(GateKey, bool),
    ToggleInput(GateKey),
    Clear,
    SetRunning(bool),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Response {
    GateAdded(GateKey),
    Connected(ConnectionKey),
    InputChanged(bool),
    Done,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        Self { circuit: CircuitGraph::with_policy(config.port_conflicts), config, running: false, outputs: None }
    }

    pub fn circuit(&self) -> &CircuitGraph {
        &self.circuit
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// the result of the last evaluation, `None` while the simulation is stopped
    pub fn outputs(&self) -> Option<&EvaluationResult> {
        self.outputs.as_ref()
    }

    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            log::debug!("simulation {}", if running { "started" } else { "stopped" });
        }
        self.running = running;
        self.refresh();
    }

    pub fn message(&mut self, message: Message) -> Result<Response, CircuitError> {
        match message {
            Message::AddGate(kind, position) => Ok(Response::GateAdded(self.add_gate(kind, position))),
            Message::RemoveGate(gate) => self.remove_gate(gate).map(|()| Response::Done),
            Message::Connect { from, from_port, to, to_port } => self.connect(from, &from_port, to, &to_port).map(Response::Connected),
            Message::Disconnect(connection) => self.disconnect(connection).map(|()| Response::Done),
            Message::SetInput(gate, value) => self.set_input(gate, value).map(|()| Response::InputChanged(value)),
            Message::ToggleInput(gate) => self.toggle_input(gate).map(Response::InputChanged),
            Message::Clear => {
                self.clear();
                Ok(Response::Done)
            }
            Message::SetRunning(running) => {
                self.set_running(running);
                Ok(Response::Done)
            }
        }
    }

    pub fn add_gate(&mut self, kind: GateKind, position: Position) -> GateKey {
        let gate = self.circuit.add_gate(kind, position);
        self.refresh();
        gate
    }
    pub fn remove_gate(&mut self, gate: GateKey) -> Result<(), CircuitError> {
        self.circuit.remove_gate(gate)?;
        self.refresh();
        Ok(())
    }
    pub fn connect(&mut self, from: GateKey, from_port: &str, to: GateKey, to_port: &str) -> Result<ConnectionKey, CircuitError> {
        let connection = self.circuit.add_connection(from, from_port, to, to_port)?;
        self.refresh();
        Ok(connection)
    }
    pub fn disconnect(&mut self, connection: ConnectionKey) -> Result<(), CircuitError> {
        self.circuit.remove_connection(connection)?;
        self.refresh();
        Ok(())
    }
    pub fn set_input(&mut self, gate: GateKey, value: bool) -> Result<(), CircuitError> {
        self.circuit.set_input_value(gate, value)?;
        self.refresh();
        Ok(())
    }
    pub fn toggle_input(&mut self, gate: GateKey) -> Result<bool, CircuitError> {
        let value = self.circuit.toggle_input(gate)?;
        self.refresh();
        Ok(value)
    }
    pub fn clear(&mut self) {
        self.circuit.clear();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.outputs = if self.running { Some(logic::evaluate_with(&self.circuit, &self.config)) } else { None };
    }
}
