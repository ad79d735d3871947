/// How many relaxation passes an evaluation may run before giving up on reaching a fixed point.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PortConflictPolicy {
    /// a second wire into an already driven port is accepted; the first wire (in connection order) drives the port
    #[default]
    FirstWins,
    /// a second wire into an already driven port is refused with `CircuitError::PortConflict`
    Reject,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_iterations: usize,
    pub port_conflicts: PortConflictPolicy,
}

impl Config {
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self { max_iterations, ..self }
    }
    pub fn with_port_conflicts(self, port_conflicts: PortConflictPolicy) -> Self {
        Self { port_conflicts, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { max_iterations: DEFAULT_MAX_ITERATIONS, port_conflicts: PortConflictPolicy::FirstWins }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.port_conflicts, PortConflictPolicy::FirstWins);
    }

    #[test]
    fn builder_keeps_other_fields() {
        let config = Config::default().with_port_conflicts(PortConflictPolicy::Reject).with_max_iterations(3);
        assert_eq!(config, Config { max_iterations: 3, port_conflicts: PortConflictPolicy::Reject });
    }
}
