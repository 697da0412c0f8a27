use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use meadow_config::MeadowConfig;

use crate::agent::Agent;
use crate::boundary::BoundaryGuard;
use crate::driver::{BehaviorDriver, DecisionSource};
use crate::rng::SceneRng;
use crate::scenery::Scenery;
use crate::sprite::{AnimatedSprite, Sprite};
use crate::types::{AgentId, Position, SpriteSheet};

/// World pixels per sprite-sheet pixel at scale 1.0.
pub const SPRITE_PIXEL_SIZE: f32 = 4.0;

const SCENERY_STREAM: u64 = 1;
const PLACEMENT_STREAM: u64 = 2;
const DRIVER_STREAM: u64 = 3;

/// Everything drawn around the bunnies.
pub struct World {
    pub title: String,
    pub sheet: SpriteSheet,
    pub scenery: Scenery,
}

/// The bunny meadow: agents plus the two processes that steer them.
///
/// Two writers touch agent state. The behavior driver fires on its own
/// interval via [`poll_behavior`](Self::poll_behavior) and only suggests;
/// [`frame_tick`](Self::frame_tick) applies boundary correction before any
/// motion, so an edge reversal always overrides the last suggestion.
pub struct Scene<S = AnimatedSprite, D = SceneRng> {
    world: World,
    agents: Vec<Agent<S>>,
    guard: BoundaryGuard,
    driver: BehaviorDriver<D>,
    frames: u64,
    torn_down: bool,
}

impl Scene {
    /// Build the configured scene: scenery, bunnies placed between the
    /// bounds and resting on the ground, and the driver armed at `now`.
    pub fn from_config(
        config: &MeadowConfig,
        sheet: SpriteSheet,
        rng: &mut SceneRng,
        now: Instant,
    ) -> Result<Self> {
        let scenery = Scenery::generate(
            config.viewport.width,
            config.viewport.height,
            &mut rng.fork(SCENERY_STREAM),
        );
        let guard = BoundaryGuard::from_viewport(config.viewport.width, config.boundary.margin);
        let frame_interval = Duration::from_millis(config.bunnies.frame_interval_ms);

        let mut placement = rng.fork(PLACEMENT_STREAM);
        let mut agents = Vec::with_capacity(config.bunnies.count);
        for i in 0..config.bunnies.count {
            let scale = placement.range_f32(config.bunnies.min_scale..=config.bunnies.max_scale);
            let height = sheet.frame_height() as f32 * scale * SPRITE_PIXEL_SIZE;
            let position = Position {
                x: placement.range_f32(guard.left()..=guard.right()),
                y: scenery.ground_top() - height,
            };
            let sprite =
                AnimatedSprite::new(sheet.frame_count(), frame_interval, position, scale, now);
            let id = AgentId(i as u32);
            let agent = Agent::new(id, sprite, config.bunnies.base_speed * scale)
                .with_context(|| format!("failed to create bunny {id}"))?;
            tracing::debug!(agent = %id, x = position.x, scale, speed = agent.speed(), "bunny placed");
            agents.push(agent);
        }

        let driver = BehaviorDriver::new(
            Duration::from_millis(config.behavior.interval_ms),
            rng.fork(DRIVER_STREAM),
            now,
        );

        let world = World {
            title: config.title.clone(),
            sheet,
            scenery,
        };
        Ok(Self::new(world, agents, guard, driver))
    }
}

impl<S: Sprite, D: DecisionSource> Scene<S, D> {
    pub fn new(
        world: World,
        agents: Vec<Agent<S>>,
        guard: BoundaryGuard,
        driver: BehaviorDriver<D>,
    ) -> Self {
        Self {
            world,
            agents,
            guard,
            driver,
            frames: 0,
            torn_down: false,
        }
    }

    /// One display frame: boundary correction, then motion, then sprite
    /// animation for every agent, then the sky drift.
    pub fn frame_tick(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        for agent in &mut self.agents {
            self.guard.enforce(agent);
            agent.update();
            agent.animate(now);
        }
        self.world.scenery.advance();
        self.frames += 1;
    }

    /// Let the behavior driver fire if its interval elapsed.
    pub fn poll_behavior(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        self.driver.poll(now, &mut self.agents)
    }

    /// Remove an agent from the scene. Later ticks do not visit it.
    pub fn despawn(&mut self, id: AgentId) -> Option<Agent<S>> {
        let index = self.agents.iter().position(|a| a.id() == id)?;
        tracing::info!(agent = %id, "bunny removed from scene");
        Some(self.agents.remove(index))
    }

    /// Stop both processes. Ticks arriving afterwards are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.driver.cancel();
        self.torn_down = true;
        tracing::info!(frames = self.frames, rounds = self.driver.rounds(), "scene torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn agents(&self) -> &[Agent<S>] {
        &self.agents
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn guard(&self) -> BoundaryGuard {
        self.guard
    }

    pub fn driver(&self) -> &BehaviorDriver<D> {
        &self.driver
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
