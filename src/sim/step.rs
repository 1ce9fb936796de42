//! Fixed timestep driver shared by both rule sets
//!
//! The five near-identical per-frame scripts of the original collapse into
//! one driver: a rule set implements [`Simulation`] and the frontend feeds
//! frame time into [`FixedTimestep::advance`].

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// One configurable simulation step. A rule set advances its own state by a
/// fixed dt given the input sampled for that tick.
pub trait Simulation {
    type Input;

    fn tick(&mut self, input: &Self::Input, dt: f32);
}

/// Frame-time accumulator that drives a [`Simulation`] at [`SIM_DT`]
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed time and run as many fixed ticks as fit,
    /// capped at [`MAX_SUBSTEPS`]. Returns the number of ticks run.
    pub fn advance<S: Simulation>(
        &mut self,
        sim: &mut S,
        input: &S::Input,
        frame_dt: f32,
    ) -> u32 {
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            sim.tick(input, SIM_DT);
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        if steps == MAX_SUBSTEPS {
            // Running behind; drop the leftover time instead of spiraling
            self.accumulator = 0.0;
        }

        steps
    }
}
