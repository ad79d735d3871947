use std::collections::HashMap;

use crate::simulation::{circuit::CircuitGraph, ConnectionKey, GateKey};

pub const OUTPUT: &str = "output";
pub const INPUT: &str = "input";
pub const INPUT1: &str = "input1";
pub const INPUT2: &str = "input2";

/// A wire from one gate's output port to another gate's input port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    key: ConnectionKey,
    from: GateKey,
    from_port: &'static str,
    to: GateKey,
    to_port: &'static str,
}

/// An input port that more than one connection is wired into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortConflict {
    pub node: GateKey,
    pub port: &'static str,
    /// in connection order, so the first one is the one that drives the port
    pub connections: Vec<ConnectionKey>,
}

impl Connection {
    pub(crate) fn new(key: ConnectionKey, from: GateKey, from_port: &'static str, to: GateKey, to_port: &'static str) -> Self {
        Self { key, from, from_port, to, to_port }
    }

    pub fn key(&self) -> ConnectionKey {
        self.key
    }
    pub fn from(&self) -> GateKey {
        self.from
    }
    pub fn from_port(&self) -> &'static str {
        self.from_port
    }
    pub fn to(&self) -> GateKey {
        self.to
    }
    pub fn to_port(&self) -> &'static str {
        self.to_port
    }

    pub(crate) fn touches(&self, gate: GateKey) -> bool {
        self.from == gate || self.to == gate
    }
}

/// The gate driving a port: the source of the first connection (in connection order) wired into it.
pub fn driver(circuit: &CircuitGraph, to: GateKey, to_port: &str) -> Option<GateKey> {
    circuit.connections().find(|connection| connection.to == to && connection.to_port == to_port).map(|connection| connection.from)
}

/// Drivers of every wired input port in the circuit, resolved with the same first-wins rule as [`driver`].
pub(crate) fn driver_table(circuit: &CircuitGraph) -> HashMap<(GateKey, &'static str), GateKey> {
    let mut drivers = HashMap::new();
    for connection in circuit.connections() {
        drivers.entry((connection.to, connection.to_port)).or_insert(connection.from);
    }
    drivers
}

pub fn port_conflicts(circuit: &CircuitGraph) -> Vec<PortConflict> {
    let mut conflicts: Vec<PortConflict> = Vec::new();
    let mut seen: HashMap<(GateKey, &'static str), usize> = HashMap::new();

    for connection in circuit.connections() {
        let port = (connection.to, connection.to_port);
        match seen.get(&port) {
            Some(&index) => conflicts[index].connections.push(connection.key),
            None => {
                seen.insert(port, conflicts.len());
                conflicts.push(PortConflict { node: connection.to, port: connection.to_port, connections: vec![connection.key] });
            }
        }
    }

    conflicts.retain(|conflict| conflict.connections.len() > 1);
    conflicts
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::simulation::circuit::{GateKind, Position};

    #[test]
    fn first_connection_drives_port() {
        let mut circuit = CircuitGraph::new();
        let a = circuit.add_gate(GateKind::Input, Position::default());
        let b = circuit.add_gate(GateKind::Input, Position::default());
        let not = circuit.add_gate(GateKind::Not, Position::default());

        assert_eq!(driver(&circuit, not, INPUT), None);

        let first = circuit.add_connection(b, OUTPUT, not, INPUT).unwrap();
        circuit.add_connection(a, OUTPUT, not, INPUT).unwrap();
        assert_eq!(driver(&circuit, not, INPUT), Some(b));
        assert_eq!(driver_table(&circuit).get(&(not, INPUT)), Some(&b));

        circuit.remove_connection(first).unwrap();
        assert_eq!(driver(&circuit, not, INPUT), Some(a));
    }

    #[test]
    fn conflicts_listed_in_connection_order() {
        let mut circuit = CircuitGraph::new();
        let a = circuit.add_gate(GateKind::Input, Position::default());
        let b = circuit.add_gate(GateKind::Input, Position::default());
        let or = circuit.add_gate(GateKind::Or, Position::default());

        let c1 = circuit.add_connection(a, OUTPUT, or, INPUT1).unwrap();
        circuit.add_connection(b, OUTPUT, or, INPUT2).unwrap();
        assert!(port_conflicts(&circuit).is_empty());

        let c2 = circuit.add_connection(b, OUTPUT, or, INPUT1).unwrap();
        assert_eq!(port_conflicts(&circuit), vec![PortConflict { node: or, port: INPUT1, connections: vec![c1, c2] }]);
    }
}
