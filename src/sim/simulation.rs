use crate::constants::{DEFAULT_DELTA_TIME_YEARS, E_FOLDING_THRESHOLD};
use crate::ela_schedule::ElaSchedule;
use crate::error::GlacierError;
use crate::glacier::Glacier;
use crate::sim::sim_op::{SimOp, SimOpHandle};
use crate::sim::steady_state::{SteadyStateDetector, SteadyStateRecord};

/// Per-run history. Index `i` of each history is simulated year `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvolutionState {
    current_year: u32,
    length_history: Vec<f64>,
    ela_history: Vec<f64>,
}

impl EvolutionState {
    /// The year the next step will simulate.
    pub fn current_year(&self) -> u32 {
        self.current_year
    }

    pub fn length_history(&self) -> &[f64] {
        &self.length_history
    }

    /// ELA applied at each simulated year.
    pub fn ela_history(&self) -> &[f64] {
        &self.ela_history
    }

    pub fn last_year(&self) -> Option<u32> {
        self.length_history.len().checked_sub(1).map(|y| y as u32)
    }

    pub fn last_length(&self) -> Option<f64> {
        self.length_history.last().copied()
    }

    /// `(year, length)` pairs in year order.
    pub fn samples(&self) -> Vec<(u32, f64)> {
        self.length_history
            .iter()
            .enumerate()
            .map(|(year, &length)| (year as u32, length))
            .collect()
    }

    fn record(&mut self, ela: f64, length: f64) {
        self.ela_history.push(ela);
        self.length_history.push(length);
    }
}

pub struct SimProps {
    pub name: String,
    pub glacier: Glacier,
    pub schedule: ElaSchedule,
    /// Last simulated year, inclusive
    pub horizon_year: u32,
    pub delta_time: f64,
    pub threshold: f64,
    pub ops: Vec<SimOpHandle>,
    pub debug: bool,
}

impl SimProps {
    /// Yearly steps from year 0 through `horizon_year` with the e-folding detector.
    pub fn new(name: &str, glacier: Glacier, schedule: ElaSchedule, horizon_year: u32) -> Self {
        Self {
            name: name.to_string(),
            glacier,
            schedule,
            horizon_year,
            delta_time: DEFAULT_DELTA_TIME_YEARS,
            threshold: E_FOLDING_THRESHOLD,
            ops: vec![],
            debug: false,
        }
    }
}

/// Drives one glacier through its ELA schedule, one forward step per year.
pub struct Simulation {
    pub name: String,
    pub debug: bool,
    glacier: Glacier,
    schedule: ElaSchedule,
    state: EvolutionState,
    detector: SteadyStateDetector,
    horizon_year: u32,
    delta_time: f64,
    ops: Vec<Box<dyn SimOp>>,
    started: bool,
    finished: bool,
    failure: Option<GlacierError>,
}

impl Simulation {
    pub fn new(props: SimProps) -> Result<Simulation, GlacierError> {
        if !(props.delta_time.is_finite() && props.delta_time > 0.0) {
            return Err(GlacierError::InvalidConfig(format!(
                "delta_time must be positive, got {}",
                props.delta_time
            )));
        }
        let detector = SteadyStateDetector::new(props.glacier.length(), props.threshold)?;
        let ops = props.ops.into_iter().map(|handle| handle.op).collect();

        Ok(Simulation {
            name: props.name,
            debug: props.debug,
            glacier: props.glacier,
            schedule: props.schedule,
            state: EvolutionState::default(),
            detector,
            horizon_year: props.horizon_year,
            delta_time: props.delta_time,
            ops,
            started: false,
            finished: false,
            failure: None,
        })
    }

    pub fn glacier(&self) -> &Glacier {
        &self.glacier
    }

    pub fn schedule(&self) -> &ElaSchedule {
        &self.schedule
    }

    pub fn state(&self) -> &EvolutionState {
        &self.state
    }

    pub fn detector(&self) -> &SteadyStateDetector {
        &self.detector
    }

    pub fn steady_state(&self) -> Option<SteadyStateRecord> {
        self.detector.record()
    }

    pub fn current_length(&self) -> f64 {
        self.glacier.length()
    }

    pub fn horizon_year(&self) -> u32 {
        self.horizon_year
    }

    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The error that aborted the run, if any.
    pub fn failure(&self) -> Option<&GlacierError> {
        self.failure.as_ref()
    }

    /// Simulate the current year. Returns `false` once the horizon is exhausted.
    ///
    /// On failure the glacier and the history are left as they were after
    /// the last successful step.
    pub fn step(&mut self) -> Result<bool, GlacierError> {
        if self.finished {
            return Ok(false);
        }
        let year = self.state.current_year;
        let ela = self.schedule.ela_at(year).ok_or_else(|| {
            GlacierError::InvalidSchedule(format!("no ELA in force at year {}", year))
        })?;

        let length = self.glacier.advance(self.delta_time, ela)?;
        self.state.record(ela, length);

        if let Some(record) = self.detector.observe(year, length) {
            if self.debug {
                println!("   📍 {}: steady state latched at year {} ({:.1} m)", self.name, record.year, record.length);
            }
        }
        if self.debug {
            println!("   year {:>5}: ELA = {:>7.1} m, length = {:>10.2} m", year, ela, length);
        }

        if year >= self.horizon_year {
            self.finished = true;
        } else {
            self.state.current_year = year + 1;
        }
        Ok(true)
    }

    /// Run every remaining year and return the steady-state record, if one latched.
    pub fn run(&mut self) -> Result<Option<SteadyStateRecord>, GlacierError> {
        if !self.started {
            self.started = true;
            self.simulate_init();
        }

        let outcome = loop {
            match self.step() {
                Ok(true) => self.simulate_step(),
                Ok(false) => break Ok(self.steady_state()),
                Err(e) => {
                    self.failure = Some(e.clone());
                    break Err(e);
                }
            }
        };

        self.simulate_end();
        outcome
    }

    fn simulate_init(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);
        for op in &mut ops {
            op.init_sim(self);
        }
        self.ops = ops;
    }

    fn simulate_step(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);
        for op in &mut ops {
            op.update_sim(self);
        }
        self.ops = ops;
    }

    fn simulate_end(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);
        for op in &mut ops {
            op.after_sim(self);
        }
        self.ops = ops;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glacier::GlacierConfig;
    use approx::assert_abs_diff_eq;
    use more_asserts::assert_gt;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn valley(length: f64) -> Glacier {
        Glacier::with_defaults(GlacierConfig::new(length, 3900.0, 0.1)).unwrap()
    }

    #[test]
    fn runs_through_the_horizon_inclusive() {
        let schedule = ElaSchedule::constant(3500.0).unwrap();
        let mut sim = Simulation::new(SimProps::new("short", valley(22_000.0), schedule, 9)).unwrap();
        sim.run().unwrap();
        assert_eq!(sim.state().length_history().len(), 10);
        assert_eq!(sim.state().last_year(), Some(9));
        assert!(sim.is_finished());
        assert_eq!(sim.current_length(), sim.state().last_length().unwrap());
        assert_eq!(sim.step(), Ok(false));
    }

    #[test]
    fn first_step_matches_model() {
        let glacier = valley(22_000.0);
        let expected = glacier.length_over_time(1.0, 3500.0).unwrap();
        let schedule = ElaSchedule::constant(3500.0).unwrap();
        let mut sim = Simulation::new(SimProps::new("one", glacier, schedule, 0)).unwrap();
        assert_eq!(sim.step(), Ok(true));
        assert_abs_diff_eq!(sim.state().length_history()[0], expected);
        assert_eq!(sim.state().ela_history(), &[3500.0]);
    }

    #[test]
    fn zero_length_fails_without_touching_history() {
        let schedule = ElaSchedule::constant(3500.0).unwrap();
        let mut sim = Simulation::new(SimProps::new("empty", valley(0.0), schedule, 10)).unwrap();
        let err = sim.run().unwrap_err();
        assert_eq!(err, GlacierError::DegenerateState { length: 0.0 });
        assert!(sim.state().length_history().is_empty());
        assert_eq!(sim.failure(), Some(&err));
    }

    #[test]
    fn missing_forcing_is_a_schedule_error() {
        let schedule = ElaSchedule::new(vec![(3, 3500.0)]).unwrap();
        let mut sim = Simulation::new(SimProps::new("late", valley(22_000.0), schedule, 10)).unwrap();
        assert!(matches!(sim.run(), Err(GlacierError::InvalidSchedule(_))));
    }

    #[test]
    fn rejects_non_positive_delta_time() {
        let mut props = SimProps::new("bad", valley(1000.0), ElaSchedule::constant(3500.0).unwrap(), 1);
        props.delta_time = 0.0;
        assert!(Simulation::new(props).is_err());
    }

    #[test]
    fn steady_state_absent_when_glacier_grows() {
        let schedule = ElaSchedule::constant(2900.0).unwrap();
        let mut sim = Simulation::new(SimProps::new("grow", valley(22_000.0), schedule, 100)).unwrap();
        assert_eq!(sim.run(), Ok(None));
        assert_gt!(sim.current_length(), 22_000.0);
    }

    struct CountingOp {
        calls: Rc<RefCell<(u32, u32, u32)>>,
    }

    impl SimOp for CountingOp {
        fn name(&self) -> &str {
            "CountingOp"
        }

        fn init_sim(&mut self, _sim: &Simulation) {
            self.calls.borrow_mut().0 += 1;
        }

        fn update_sim(&mut self, _sim: &Simulation) {
            self.calls.borrow_mut().1 += 1;
        }

        fn after_sim(&mut self, _sim: &Simulation) {
            self.calls.borrow_mut().2 += 1;
        }
    }

    #[test]
    fn ops_see_every_step() {
        let calls = Rc::new(RefCell::new((0, 0, 0)));
        let mut props = SimProps::new("ops", valley(22_000.0), ElaSchedule::constant(3500.0).unwrap(), 4);
        props.ops.push(SimOpHandle::new(Box::new(CountingOp { calls: calls.clone() })));
        let mut sim = Simulation::new(props).unwrap();
        sim.run().unwrap();
        assert_eq!(*calls.borrow(), (1, 5, 1));
    }
}
