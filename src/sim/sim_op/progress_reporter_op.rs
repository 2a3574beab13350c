use crate::sim::Simulation;
use crate::sim::sim_op::{SimOp, SimOpHandle};
use colored::Colorize;

/// Progress Reporter Operator
///
/// Prints the run header, a progress line every `report_interval` years and
/// a closing summary with the steady-state outcome.
#[derive(Debug, Clone)]
pub struct ProgressReporterOp {
    pub name: String,
    pub report_interval: u32,
    pub show_relaxation: bool,
}

impl ProgressReporterOp {
    pub fn new(report_interval: u32) -> Self {
        Self {
            name: "ProgressReporterOp".to_string(),
            report_interval: report_interval.max(1),
            show_relaxation: true,
        }
    }

    pub fn new_with_options(report_interval: u32, show_relaxation: bool) -> Self {
        Self {
            show_relaxation,
            ..Self::new(report_interval)
        }
    }

    pub fn handle(report_interval: u32) -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new(report_interval)))
    }

    pub fn handle_with_options(report_interval: u32, show_relaxation: bool) -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new_with_options(report_interval, show_relaxation)))
    }

    fn should_report(&self, year: u32, sim: &Simulation) -> bool {
        year % self.report_interval == 0 || year == sim.horizon_year()
    }

    /// One progress line for the latest simulated year.
    pub fn progress_line(&self, sim: &Simulation) -> Option<String> {
        let state = sim.state();
        let year = state.last_year()?;
        let length = state.last_length()?;
        let ela = state.ela_history()[year as usize];

        let mut line = format!(
            "   Year {:>5}: ELA = {:>7.1} m, length = {:>10.2} m",
            year, ela, length
        );
        if self.show_relaxation {
            line.push_str(&format!(
                ", relaxation = {:>6.3}",
                sim.detector().relaxation_fraction(length)
            ));
        }
        Some(line)
    }

    /// Closing summary lines.
    pub fn summary_lines(&self, sim: &Simulation) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(error) = sim.failure() {
            let year = sim.state().current_year();
            lines.push(format!("   Run aborted at year {}: {}", year, error));
        }
        let years = sim.state().length_history().len();
        lines.push(format!(
            "   Simulated {} years, final length {:.2} m",
            years,
            sim.current_length()
        ));
        match sim.steady_state() {
            Some(record) => lines.push(format!(
                "   Steady state - Year: {} - Length: {:.2} m",
                record.year, record.length
            )),
            None => lines.push("   Steady state not reached within window".to_string()),
        }
        lines
    }
}

impl SimOp for ProgressReporterOp {
    fn name(&self) -> &str {
        &self.name
    }

    fn init_sim(&mut self, sim: &Simulation) {
        println!(
            "{}",
            format!("🏔️  Starting glacier run '{}'", sim.name).bold()
        );
        println!(
            "   Initial length = {:.1} m, slope = {}, bed height = {:.1} m, years 0..={}",
            sim.current_length(),
            sim.glacier().slope(),
            sim.glacier().config().max_bed_height,
            sim.horizon_year()
        );
    }

    fn update_sim(&mut self, sim: &Simulation) {
        let Some(year) = sim.state().last_year() else {
            return;
        };
        if !self.should_report(year, sim) {
            return;
        }
        if let Some(line) = self.progress_line(sim) {
            println!("{}", line);
        }
    }

    fn after_sim(&mut self, sim: &Simulation) {
        println!("\n📈 Glacier run complete!");
        for line in self.summary_lines(sim) {
            if sim.failure().is_some() && line.contains("aborted") {
                println!("{}", line.red());
            } else if line.contains("not reached") {
                println!("{}", line.yellow());
            } else if line.contains("Steady state") {
                println!("{}", line.green());
            } else {
                println!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ela_schedule::ElaSchedule;
    use crate::glacier::{Glacier, GlacierConfig};
    use crate::sim::SimProps;

    fn run(ela: f64, horizon: u32) -> Simulation {
        let glacier = Glacier::with_defaults(GlacierConfig::new(22_000.0, 3900.0, 0.1)).unwrap();
        let schedule = ElaSchedule::constant(ela).unwrap();
        let mut sim = Simulation::new(SimProps::new("progress_test", glacier, schedule, horizon)).unwrap();
        sim.run().unwrap();
        sim
    }

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = ProgressReporterOp::new(10);
        assert_eq!(reporter.report_interval, 10);
        assert!(reporter.show_relaxation);
        assert_eq!(ProgressReporterOp::new(0).report_interval, 1);
    }

    #[test]
    fn test_progress_line() {
        let sim = run(3500.0, 2);
        let line = ProgressReporterOp::new(1).progress_line(&sim).unwrap();
        assert!(line.contains("Year     2"));
        assert!(line.contains("3500.0"));
        assert!(line.contains("relaxation"));

        let quiet = ProgressReporterOp::new_with_options(1, false).progress_line(&sim).unwrap();
        assert!(!quiet.contains("relaxation"));
    }

    #[test]
    fn test_summary_without_steady_state() {
        let sim = run(2900.0, 5);
        let lines = ProgressReporterOp::new(1).summary_lines(&sim);
        assert!(lines.iter().any(|l| l.contains("not reached within window")));
        assert!(lines.iter().any(|l| l.contains("Simulated 6 years")));
    }

    #[test]
    fn test_summary_reports_latched_year() {
        let sim = run(3500.0, 500);
        let record = sim.steady_state().unwrap();
        let lines = ProgressReporterOp::new(100).summary_lines(&sim);
        assert!(lines.iter().any(|l| l.contains(&format!("Year: {}", record.year))));
    }
}
