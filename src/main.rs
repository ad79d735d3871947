use logicsim::{simulation::connections, CircuitError, Config, GateKind, Position, Simulation};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(max_iterations) => Config::default().with_max_iterations(max_iterations),
            Err(e) => {
                eprintln!("error: invalid iteration cap '{arg}': {e}");
                std::process::exit(2);
            }
        },
        None => Config::default(),
    };

    if let Err(e) = run(config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), CircuitError> {
    let mut simulation = Simulation::new(config);
    simulation.set_running(true);

    let a = simulation.add_gate(GateKind::Input, Position::new(50.0, 50.0));
    let b = simulation.add_gate(GateKind::Input, Position::new(50.0, 150.0));
    let and = simulation.add_gate(GateKind::And, Position::new(200.0, 100.0));
    let xor = simulation.add_gate(GateKind::Xor, Position::new(200.0, 250.0));
    let and_out = simulation.add_gate(GateKind::Output, Position::new(350.0, 100.0));
    let xor_out = simulation.add_gate(GateKind::Output, Position::new(350.0, 250.0));

    simulation.connect(a, connections::OUTPUT, and, connections::INPUT1)?;
    simulation.connect(b, connections::OUTPUT, and, connections::INPUT2)?;
    simulation.connect(a, connections::OUTPUT, xor, connections::INPUT1)?;
    simulation.connect(b, connections::OUTPUT, xor, connections::INPUT2)?;
    simulation.connect(and, connections::OUTPUT, and_out, connections::INPUT)?;
    simulation.connect(xor, connections::OUTPUT, xor_out, connections::INPUT)?;

    simulation.set_input(a, true)?;
    for _ in 0..2 {
        if let Some(outputs) = simulation.outputs() {
            let (va, vb) = (simulation.circuit().input_value(a).unwrap_or(false), simulation.circuit().input_value(b).unwrap_or(false));
            println!("a={va} b={vb}: AND={} XOR={}", outputs.value(and_out), outputs.value(xor_out));
        }
        simulation.toggle_input(b)?;
    }

    // three inverters in a ring never settle
    let n1 = simulation.add_gate(GateKind::Not, Position::new(50.0, 400.0));
    let n2 = simulation.add_gate(GateKind::Not, Position::new(150.0, 400.0));
    let n3 = simulation.add_gate(GateKind::Not, Position::new(250.0, 400.0));
    simulation.connect(n1, connections::OUTPUT, n2, connections::INPUT)?;
    simulation.connect(n2, connections::OUTPUT, n3, connections::INPUT)?;
    simulation.connect(n3, connections::OUTPUT, n1, connections::INPUT)?;
    if let Some(outputs) = simulation.outputs() {
        println!("inverter ring: converged={} after {} pass(es)", outputs.converged(), outputs.iterations());
    }

    Ok(())
}
