//! Evaluation engine for circuits of logic gates.
//!
//! A [`CircuitGraph`] holds gates, the wires between their ports and the values driven into its input gates.
//! [`evaluate`] relaxes the circuit towards a fixed point and reports the output of every gate; cyclic circuits that
//! never settle are cut off after [`Config::max_iterations`] passes. [`Simulation`] ties the two together behind an
//! explicit running flag for callers that want outputs refreshed after every edit.

pub mod config;
pub mod simulation;
pub(crate) mod utils;

pub use config::{Config, PortConflictPolicy};
pub use simulation::{
    circuit::{CircuitGraph, Gate, GateKind, Position},
    connections::{Connection, PortConflict},
    error::{CircuitError, Target},
    logic::{evaluate, evaluate_with, relax_from, EvaluationResult},
    ConnectionKey, GateKey, Message, Response, Simulation,
};
