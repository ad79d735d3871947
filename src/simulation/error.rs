use std::fmt;

use thiserror::Error;

use crate::simulation::{ConnectionKey, GateKey};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Gate(GateKey),
    Connection(ConnectionKey),
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CircuitError {
    #[error("gate {node:?} has no port named '{port}'")]
    InvalidPort { node: GateKey, port: String },
    #[error("cannot connect gate {0:?} to itself")]
    SelfLoop(GateKey),
    #[error("gate {0:?} is not an input")]
    NotAnInput(GateKey),
    #[error("{0} not found")]
    NotFound(Target),
    #[error("port '{port}' of gate {node:?} is already driven by another connection")]
    PortConflict { node: GateKey, port: &'static str },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Gate(gate) => write!(f, "gate {gate:?}"),
            Target::Connection(connection) => write!(f, "connection {connection:?}"),
        }
    }
}
