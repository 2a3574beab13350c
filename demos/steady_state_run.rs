/// Decadal ELA experiment: a 22 km valley glacier on a 0.1 bed, ELA changed
/// every 10 years for the first 90 years, then held at 3500 m until year 500.
///
/// Usage: cargo run --example steady_state_run [-- path/to/run.json [out.csv]]

use colored::Colorize;
use glacier_dynamics::config::RunConfig;
use glacier_dynamics::sim::sim_op::{CsvWriterOp, ProgressReporterOp, SimOpHandle};
use glacier_dynamics::{ElaSchedule, Glacier, GlacierConfig, SimProps, Simulation};
use std::error::Error;

const DECADAL_ELAS: [f64; 10] = [
    2900.0, 3100.0, 2800.0, 2700.0, 3000.0, 2800.0, 3400.0, 3300.0, 3200.0, 3500.0,
];

fn default_simulation(ops: Vec<SimOpHandle>) -> Result<Simulation, Box<dyn Error>> {
    let glacier = Glacier::with_defaults(GlacierConfig::new(22_000.0, 3900.0, 0.1))?;
    let schedule = ElaSchedule::periodic(&DECADAL_ELAS, 10)?;
    let mut props = SimProps::new("decadal_ela", glacier, schedule, 500);
    props.ops = ops;
    Ok(Simulation::new(props)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut ops = vec![ProgressReporterOp::handle(50)];
    if let Some(csv_path) = args.get(1) {
        ops.push(CsvWriterOp::handle(csv_path.as_str()));
    }

    let mut sim = match args.first() {
        Some(path) => RunConfig::load(path)?.into_simulation(ops)?,
        None => default_simulation(ops)?,
    };

    let record = sim.run()?;

    let final_ela = sim.schedule().final_ela();
    match sim.glacier().steady_state_length(final_ela) {
        Ok(steady) => println!(
            "   Analytic equilibrium for ELA {:.0} m: {:.2} m",
            final_ela, steady
        ),
        Err(e) => println!("{}", format!("   No equilibrium for ELA {:.0} m: {}", final_ela, e).yellow()),
    }
    if record.is_none() {
        println!("{}", "   Try a longer horizon or a lower threshold".dimmed());
    }
    Ok(())
}
