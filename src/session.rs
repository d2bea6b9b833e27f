//! Fixed-timestep session driver
//!
//! Owns the one `GameState` of a play session. The host calls [`Session::frame`]
//! once per rendered frame with whatever time elapsed; the session runs as
//! many fixed simulation steps as fit.

use crate::consts::*;
use crate::sim::{Controls, GameEvent, GameState, InputResolver, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session {
    state: GameState,
    resolver: InputResolver,
    /// Edges seen on frames that ran no substep, held until one does
    pending: TickInput,
    accumulator: f32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("Session starting (seed {})", seed);
        Self {
            state: GameState::with_tuning(seed, tuning),
            resolver: InputResolver::new(),
            pending: TickInput::default(),
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Advance by one rendered frame. Returns the number of substeps run.
    pub fn frame(&mut self, controls: &Controls, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let input = self.resolver.resolve(controls);
        self.pending = TickInput {
            thrust_x: input.thrust_x,
            thrust_y: input.thrust_y,
            fire: input.fire,
            fire_pressed: self.pending.fire_pressed || input.fire_pressed,
            dash_pressed: self.pending.dash_pressed || input.dash_pressed,
        };

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.pending, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending.fire_pressed = false;
            self.pending.dash_pressed = false;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!("Simulation falling behind, dropping {:.1}ms", self.accumulator * 1000.0);
            self.accumulator = 0.0;
        }

        substeps
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
