/// Greenland ice sheet sectors treated as uniform-width glaciers.

use colored::Colorize;
use glacier_dynamics::PhysicalConstants;
use glacier_dynamics::basins::evaluate_all;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let reports = evaluate_all(PhysicalConstants::default())?;

    println!("{}", "🌍 Greenland basins".bold());
    println!(
        "   {:<6} {:>9} {:>11} {:>11} {:>11} {:>12} {:>12} {:>9} {:>9} {:>9}",
        "basin", "slope", "max surf", "ELA(L)", "crit ELA", "L meas km", "L eq km", "H meas", "H mean", "H static"
    );
    for r in &reports {
        let ela_marker = if r.ela_from_length > r.max_surface {
            format!("{:>11.1}", r.ela_from_length).red()
        } else {
            format!("{:>11.1}", r.ela_from_length).normal()
        };
        println!(
            "   {:<6} {:>9.5} {:>11.1} {} {:>11.1} {:>12.1} {:>12.1} {:>9.1} {:>9.1} {:>9.1}",
            r.sector.as_str(),
            r.slope,
            r.max_surface,
            ela_marker,
            r.critical_ela,
            r.measured_length / 1000.0,
            r.linear_equilibrium_length / 1000.0,
            r.measured_thickness,
            r.mean_thickness,
            r.static_thickness
        );
    }
    Ok(())
}
