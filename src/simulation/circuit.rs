use std::fmt;

use slotmap::SecondaryMap;

use crate::{
    config::PortConflictPolicy,
    simulation::{
        connections::{self, Connection},
        error::{CircuitError, Target},
        ConnectionKey, ConnectionMap, GateKey, GateMap,
    },
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    Input,
    Output,
}

#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    key: GateKey,
    kind: GateKind,
    position: Position,
}

/// Gates, the wires between their ports, and the externally driven values of the input gates.
///
/// Gates and connections are enumerated in insertion order, which is the order the evaluator visits gates in and the
/// order that decides which wire drives a port that has more than one.
#[derive(Clone, Debug, Default)]
pub struct CircuitGraph {
    gates: GateMap,
    gate_order: Vec<GateKey>,
    connections: ConnectionMap,
    connection_order: Vec<ConnectionKey>,
    inputs: SecondaryMap<GateKey, bool>,
    port_conflicts: PortConflictPolicy,
}

impl GateKind {
    pub const ALL: [GateKind; 9] = [GateKind::And, GateKind::Or, GateKind::Not, GateKind::Nand, GateKind::Nor, GateKind::Xor, GateKind::Xnor, GateKind::Input, GateKind::Output];

    pub fn name(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
        }
    }

    /// IEC style symbol drawn on the gate body
    pub fn symbol(self) -> &'static str {
        match self {
            GateKind::And => "&",
            GateKind::Or => "≥1",
            GateKind::Not => "1",
            GateKind::Nand => "&̄",
            GateKind::Nor => "≥1̄",
            GateKind::Xor => "=1",
            GateKind::Xnor => "=1̄",
            GateKind::Input => "IN",
            GateKind::Output => "OUT",
        }
    }

    pub fn default_label(self) -> Option<&'static str> {
        match self {
            GateKind::Input => Some("Input"),
            GateKind::Output => Some("Output"),
            _ => None,
        }
    }

    pub fn input_ports(self) -> &'static [&'static str] {
        match self {
            GateKind::Input => &[],
            // outputs are sinks: they have one port to be wired into and nothing to wire out of
            GateKind::Not | GateKind::Output => &[connections::INPUT],
            GateKind::And | GateKind::Or | GateKind::Nand | GateKind::Nor | GateKind::Xor | GateKind::Xnor => &[connections::INPUT1, connections::INPUT2],
        }
    }

    pub fn output_port(self) -> Option<&'static str> {
        match self {
            GateKind::Output => None,
            _ => Some(connections::OUTPUT),
        }
    }

    pub fn arity(self) -> usize {
        self.input_ports().len()
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Gate {
    pub fn key(&self) -> GateKey {
        self.key
    }
    pub fn kind(&self) -> GateKind {
        self.kind
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn label(&self) -> Option<&'static str> {
        self.kind.default_label()
    }

    pub fn input_ports(&self) -> &'static [&'static str] {
        self.kind.input_ports()
    }
    pub fn output_port(&self) -> Option<&'static str> {
        self.kind.output_port()
    }

    fn find_input_port(&self, port: &str) -> Option<&'static str> {
        self.input_ports().iter().copied().find(|p| *p == port)
    }
}

impl CircuitGraph {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_policy(port_conflicts: PortConflictPolicy) -> Self {
        Self { port_conflicts, ..Self::default() }
    }

    pub fn port_conflict_policy(&self) -> PortConflictPolicy {
        self.port_conflicts
    }

    // queries {{{1
    pub fn gate(&self, gate: GateKey) -> Option<&Gate> {
        self.gates.get(gate)
    }
    pub fn connection(&self, connection: ConnectionKey) -> Option<&Connection> {
        self.connections.get(connection)
    }

    pub fn gates(&self) -> impl ExactSizeIterator<Item = &Gate> + '_ {
        self.gate_order.iter().map(|key| &self.gates[*key])
    }
    pub fn connections(&self) -> impl ExactSizeIterator<Item = &Connection> + '_ {
        self.connection_order.iter().map(|key| &self.connections[*key])
    }

    pub fn connections_into(&self, gate: GateKey) -> impl Iterator<Item = &Connection> + '_ {
        self.connections().filter(move |connection| connection.to() == gate)
    }
    pub fn connections_from(&self, gate: GateKey) -> impl Iterator<Item = &Connection> + '_ {
        self.connections().filter(move |connection| connection.from() == gate)
    }

    /// the externally driven value of an input gate, `None` for every other kind of gate
    pub fn input_value(&self, gate: GateKey) -> Option<bool> {
        self.inputs.get(gate).copied()
    }
    pub fn inputs(&self) -> impl Iterator<Item = (GateKey, bool)> + '_ {
        self.gate_order.iter().filter_map(|key| Some((*key, *self.inputs.get(*key)?)))
    }

    pub fn count(&self, kind: GateKind) -> usize {
        self.gates().filter(|gate| gate.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // mutation {{{1
    pub fn add_gate(&mut self, kind: GateKind, position: Position) -> GateKey {
        let key = self.gates.insert_with_key(|key| Gate { key, kind, position });
        self.gate_order.push(key);
        if kind == GateKind::Input {
            self.inputs.insert(key, false);
        }

        log::debug!("added {kind} gate {key:?} at ({}, {})", position.x, position.y);
        key
    }

    pub fn remove_gate(&mut self, gate: GateKey) -> Result<Gate, CircuitError> {
        let removed = self.gates.remove(gate).ok_or(CircuitError::NotFound(Target::Gate(gate)))?;
        self.gate_order.retain(|key| *key != gate);
        self.inputs.remove(gate);

        let connections = &mut self.connections;
        let before = self.connection_order.len();
        self.connection_order.retain(|key| {
            let touches = connections[*key].touches(gate);
            if touches {
                connections.remove(*key);
            }
            !touches
        });

        log::debug!("removed {} gate {gate:?} and {} connection(s) touching it", removed.kind, before - self.connection_order.len());
        Ok(removed)
    }

    pub fn add_connection(&mut self, from: GateKey, from_port: &str, to: GateKey, to_port: &str) -> Result<ConnectionKey, CircuitError> {
        let from_gate = self.gates.get(from).ok_or(CircuitError::NotFound(Target::Gate(from)))?;
        let to_gate = self.gates.get(to).ok_or(CircuitError::NotFound(Target::Gate(to)))?;
        if from == to {
            return Err(CircuitError::SelfLoop(from));
        }

        let from_port = from_gate.output_port().filter(|p| *p == from_port).ok_or_else(|| CircuitError::InvalidPort { node: from, port: from_port.to_string() })?;
        let to_port = to_gate.find_input_port(to_port).ok_or_else(|| CircuitError::InvalidPort { node: to, port: to_port.to_string() })?;

        if let Some(existing) = connections::driver(self, to, to_port) {
            match self.port_conflicts {
                PortConflictPolicy::Reject => return Err(CircuitError::PortConflict { node: to, port: to_port }),
                PortConflictPolicy::FirstWins => log::warn!("port '{to_port}' of gate {to:?} is already driven by {existing:?}; the new connection will be ignored while that one exists"),
            }
        }

        let key = self.connections.insert_with_key(|key| Connection::new(key, from, from_port, to, to_port));
        self.connection_order.push(key);

        log::debug!("connected {from:?}.{from_port} -> {to:?}.{to_port} as {key:?}");
        Ok(key)
    }

    pub fn remove_connection(&mut self, connection: ConnectionKey) -> Result<Connection, CircuitError> {
        let removed = self.connections.remove(connection).ok_or(CircuitError::NotFound(Target::Connection(connection)))?;
        self.connection_order.retain(|key| *key != connection);

        log::debug!("removed connection {connection:?}");
        Ok(removed)
    }

    pub fn set_input_value(&mut self, gate: GateKey, value: bool) -> Result<(), CircuitError> {
        let slot = self.input_slot(gate)?;
        *slot = value;

        log::debug!("input {gate:?} set to {value}");
        Ok(())
    }

    /// flips an input gate's value and returns the new value
    pub fn toggle_input(&mut self, gate: GateKey) -> Result<bool, CircuitError> {
        let slot = self.input_slot(gate)?;
        *slot = !*slot;
        let value = *slot;

        log::debug!("input {gate:?} toggled to {value}");
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.gates.clear();
        self.gate_order.clear();
        self.connections.clear();
        self.connection_order.clear();
        self.inputs.clear();

        log::debug!("cleared circuit");
    }

    fn input_slot(&mut self, gate: GateKey) -> Result<&mut bool, CircuitError> {
        let kind = self.gates.get(gate).ok_or(CircuitError::NotFound(Target::Gate(gate)))?.kind;
        if kind != GateKind::Input {
            return Err(CircuitError::NotAnInput(gate));
        }
        self.inputs.get_mut(gate).ok_or(CircuitError::NotAnInput(gate))
    }
}
