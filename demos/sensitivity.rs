/// Equilibrium length and length sensitivity against ELA and bed slope.

use colored::Colorize;
use glacier_dynamics::math_utils::arange;
use glacier_dynamics::sweep::{self, SweepSeries};
use glacier_dynamics::{Glacier, GlacierConfig};
use std::error::Error;

fn print_table(title: &str, legend: &str, series: &[SweepSeries]) {
    println!("\n{}", title.bold());
    let Some(first) = series.first() else {
        return;
    };
    let header: Vec<String> = first.xs().iter().map(|x| format!("{:>10.2}", x)).collect();
    println!("   {:>8} |{}", legend.dimmed(), header.join(""));
    for s in series {
        let row: Vec<String> = s.ys().iter().map(|y| format!("{:>10.3}", y)).collect();
        println!("   {:>8} |{}", s.label, row.join(""));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let elas = arange(4000.0, 5100.0, 100.0);
    let ela_changes = arange(100.0, 510.0, 100.0);
    let slopes = arange(0.05, 0.30, 0.05);

    let base = Glacier::with_defaults(GlacierConfig::new(0.0, 5500.0, 0.0))?;

    print_table(
        "Equilibrium length (m) with varying ELA",
        "slope",
        &sweep::equilibrium_length_by_ela(&base, &slopes, &elas)?,
    );
    print_table(
        "Equilibrium length (m) with varying slope",
        "ELA",
        &sweep::equilibrium_length_by_slope(&base, &elas, &slopes)?,
    );
    print_table(
        "Length change (m) with varying ELA change",
        "slope",
        &sweep::length_change_by_ela_change(&slopes, &ela_changes)?,
    );
    print_table(
        "Length change (m) with varying slope",
        "dELA",
        &sweep::length_change_by_slope(&ela_changes, &slopes)?,
    );
    print_table(
        "Fractional length change with varying ELA change, ELA = 4500 m",
        "slope",
        &sweep::fractional_change_by_ela_change(&base, 4500.0, &slopes, &ela_changes)?,
    );
    print_table(
        "Fractional length change with varying slope, ELA change 250 m",
        "ELA",
        &sweep::fractional_change_by_slope(&base, 250.0, &elas, &slopes)?,
    );
    Ok(())
}
