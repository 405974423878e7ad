//! The simulation context: one owner for the game state, the configuration
//! and the random source, with an explicit `start`/`stop` lifecycle.
//!
//! Hosts drive it by calling [`Simulation::step`] once per display frame and
//! read the result through [`Simulation::state`].  Nothing outside this type
//! mutates entity collections.

use rand::Rng;
use tracing::info;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{GamePhase, GameState};
use crate::error::GameResult;
use crate::input::{ControlLayout, Intents};
use crate::phase::{self, Transition};
use crate::scaling::{DeviceClass, Metrics, Viewport};

pub struct Simulation<R: Rng> {
    config: GameConfig,
    viewport: Viewport,
    controls: ControlLayout,
    rng: R,
    /// `None` while stopped.
    state: Option<GameState>,
}

impl<R: Rng> Simulation<R> {
    /// Validate the configuration and prepare a stopped simulation.
    pub fn new(config: GameConfig, viewport: Viewport, rng: R) -> GameResult<Self> {
        config.validate()?;
        let controls = ControlLayout::new(&viewport, &Metrics::derive(&viewport, &config));
        Ok(Simulation {
            config,
            viewport,
            controls,
            rng,
            state: None,
        })
    }

    /// Build a fresh game.  Starting a running simulation starts it over.
    pub fn start(&mut self) {
        let state = compute::init_state(&self.config, self.viewport, &mut self.rng);
        info!(
            width = self.viewport.width,
            height = self.viewport.height,
            scale = state.metrics.scale,
            touch = state.metrics.touch_controls,
            "simulation started"
        );
        self.state = Some(state);
    }

    /// Drop the game state and every collection it holds.
    pub fn stop(&mut self) {
        if let Some(state) = self.state.take() {
            info!(frame = state.frame, score = state.score, "simulation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    /// Advance one tick.  A stopped simulation ignores the call.
    pub fn step(&mut self, intents: &Intents) -> Option<Transition> {
        let state = self.state.as_mut()?;
        compute::tick(state, intents, &self.config, &mut self.rng)
    }

    /// Host-requested restart.  Only honoured from `GameOver`.
    pub fn restart(&mut self) -> Option<Transition> {
        let state = self.state.as_mut()?;
        if state.phase != GamePhase::GameOver {
            return None;
        }
        phase::reset_game(state, &self.config, &mut self.rng);
        Some(Transition::Restarted)
    }

    /// New viewport size or device hint: rescale and rebuild the controls.
    pub fn resize(&mut self, width: f32, height: f32, device: DeviceClass) -> GameResult<()> {
        let viewport = Viewport::new(width, height, device)?;
        let metrics = Metrics::derive(&viewport, &self.config);
        self.controls = ControlLayout::new(&viewport, &metrics);
        self.viewport = viewport;
        if let Some(state) = self.state.as_mut() {
            compute::apply_viewport(state, viewport, &self.config);
        }
        info!(width, height, scale = metrics.scale, touch = metrics.touch_controls, "viewport resized");
        Ok(())
    }

    /// Read-only view for renderers.  `None` while stopped.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.state
            .as_ref()
            .map(|s| s.phase == GamePhase::GameOver)
            .unwrap_or(false)
    }

    pub fn controls(&self) -> &ControlLayout {
        &self.controls
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
