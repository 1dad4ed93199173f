//! The frame driver: owns every entity collection and runs the passes in order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::canvas::Canvas;
use crate::nebula::{Nebula, draw_nebulae, spawn_nebulae};
use crate::params::SceneParams;
use crate::planet::{Planet, render_planets, spawn_planets};
use crate::shooting_star::{
    ShootingStar, ShootingStarParams, render_shooting_stars, spawn_shooting_stars,
};
use crate::star::{Star, draw_stars, spawn_stars};
use crate::viewport::Viewport;

/// The four entity collections, in draw order.
#[derive(Clone, Debug, Default)]
pub struct SceneEntities {
    pub stars: Vec<Star>,
    pub nebulae: Vec<Nebula>,
    pub planets: Vec<Planet>,
    pub shooting_stars: Vec<ShootingStar>,
}

impl SceneEntities {
    pub fn len(&self) -> usize {
        self.stars.len() + self.nebulae.len() + self.planets.len() + self.shooting_stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Animated starfield scene.
///
/// Collections are populated once and then only mutated in place. Each frame
/// clears the surface and draws stars, nebulae, planets and shooting stars, in
/// that order, applying motion as it goes.
pub struct Scene {
    entities: SceneEntities,
    shooting_params: ShootingStarParams,
    viewport: Viewport,
    rng: ChaCha8Rng,
    seed: u64,
    frame_count: u64,
    respawn_count: u64,
}

impl Scene {
    /// Populate a scene sized to `viewport`.
    ///
    /// Uses `params.seed` when set, otherwise draws a fresh seed. The seed is
    /// logged so a run can be reproduced.
    pub fn new(params: &SceneParams, viewport: Viewport) -> Self {
        let seed = params.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let stars = spawn_stars(&mut rng, &params.stars, viewport);
        let planets = spawn_planets(&mut rng, &params.planets, viewport);
        let nebulae = spawn_nebulae(&mut rng, &params.nebulae, viewport);
        let shooting_stars = spawn_shooting_stars(&mut rng, &params.shooting_stars, viewport);

        log::info!(
            "Scene populated (seed {seed}, {}x{}): {} stars, {} planets, {} nebulae, {} shooting stars",
            viewport.width,
            viewport.height,
            stars.len(),
            planets.len(),
            nebulae.len(),
            shooting_stars.len()
        );

        Self {
            entities: SceneEntities {
                stars,
                nebulae,
                planets,
                shooting_stars,
            },
            shooting_params: params.shooting_stars.clone(),
            viewport,
            rng,
            seed,
            frame_count: 0,
            respawn_count: 0,
        }
    }

    /// Build a scene around hand-made entities.
    pub fn from_entities(
        entities: SceneEntities,
        shooting_params: ShootingStarParams,
        viewport: Viewport,
        seed: u64,
    ) -> Self {
        Self {
            entities,
            shooting_params,
            viewport,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            frame_count: 0,
            respawn_count: 0,
        }
    }

    /// One fused frame: clear, then draw each entity and advance it.
    ///
    /// The viewport follows the canvas size, so orbits and respawn bounds track
    /// a resized surface.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        self.sync_viewport(canvas);
        canvas.clear();
        draw_stars(&self.entities.stars, canvas);
        draw_nebulae(&self.entities.nebulae, canvas);
        render_planets(&mut self.entities.planets, canvas, self.viewport.center());
        let respawned = render_shooting_stars(
            &mut self.entities.shooting_stars,
            canvas,
            &mut self.rng,
            &self.shooting_params,
            self.viewport,
        );
        self.finish_frame(respawned);
    }

    /// Draw the current state without advancing anything.
    ///
    /// Stroke widths are still sampled, so repeated renders flicker.
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        self.sync_viewport(canvas);
        canvas.clear();
        draw_stars(&self.entities.stars, canvas);
        draw_nebulae(&self.entities.nebulae, canvas);
        let center = self.viewport.center();
        for planet in &self.entities.planets {
            planet.draw(canvas, center);
        }
        for star in &self.entities.shooting_stars {
            let width = self.shooting_params.stroke_width.sample(&mut self.rng);
            star.draw(canvas, width);
        }
    }

    /// Advance every moving entity by one frame without drawing.
    pub fn tick(&mut self) {
        for planet in &mut self.entities.planets {
            planet.advance();
        }
        let mut respawned = 0;
        for star in &mut self.entities.shooting_stars {
            if star.advance(&mut self.rng, self.viewport, self.shooting_params.angle_jitter) {
                respawned += 1;
            }
        }
        self.finish_frame(respawned);
    }

    /// Run `frames` fused frames back to back.
    pub fn run_frames<C: Canvas + ?Sized>(&mut self, canvas: &mut C, frames: u64) {
        for _ in 0..frames {
            self.frame(canvas);
        }
    }

    /// Adopt a new surface size. Existing entities are kept where they are.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!(
                "Scene viewport {}x{} -> {}x{}",
                self.viewport.width,
                self.viewport.height,
                viewport.width,
                viewport.height
            );
            self.viewport = viewport;
        }
    }

    fn sync_viewport<C: Canvas + ?Sized>(&mut self, canvas: &C) {
        self.resize(Viewport::new(canvas.width(), canvas.height()));
    }

    fn finish_frame(&mut self, respawned: usize) {
        self.frame_count += 1;
        self.respawn_count += respawned as u64;
    }

    pub fn entities(&self) -> &SceneEntities {
        &self.entities
    }

    pub fn stars(&self) -> &[Star] {
        &self.entities.stars
    }

    pub fn planets(&self) -> &[Planet] {
        &self.entities.planets
    }

    pub fn nebulae(&self) -> &[Nebula] {
        &self.entities.nebulae
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.entities.shooting_stars
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Frames advanced so far, by [`frame`](Self::frame) or [`tick`](Self::tick).
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Shooting-star respawns since the scene was built.
    pub fn respawn_count(&self) -> u64 {
        self.respawn_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingCanvas;

    fn small_params(seed: u64) -> SceneParams {
        let mut params = SceneParams {
            seed: Some(seed),
            ..SceneParams::default()
        };
        params.stars.count = 50;
        params
    }

    #[test]
    fn test_same_seed_same_scene() {
        let viewport = Viewport::new(800.0, 600.0);
        let a = Scene::new(&small_params(7), viewport);
        let b = Scene::new(&small_params(7), viewport);
        assert_eq!(a.stars(), b.stars());
        assert_eq!(a.planets(), b.planets());
        assert_eq!(a.shooting_stars(), b.shooting_stars());
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_frame_draws_every_entity_once() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut scene = Scene::new(&small_params(1), viewport);
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        scene.frame(&mut canvas);
        // clear + every entity
        assert_eq!(canvas.commands().len(), 1 + scene.entities().len());
        assert_eq!(scene.frame_count(), 1);
        assert_eq!(canvas.depth(), 0);
    }

    #[test]
    fn test_render_does_not_advance() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut scene = Scene::new(&small_params(2), viewport);
        let before = scene.planets().to_vec();
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        scene.render(&mut canvas);
        assert_eq!(scene.planets(), before.as_slice());
        assert_eq!(scene.frame_count(), 0);

        scene.tick();
        assert_ne!(scene.planets(), before.as_slice());
        assert_eq!(scene.frame_count(), 1);
    }

    #[test]
    fn test_canvas_size_drives_viewport() {
        let mut scene = Scene::new(&small_params(3), Viewport::new(800.0, 600.0));
        let mut canvas = RecordingCanvas::new(1024.0, 768.0);
        scene.frame(&mut canvas);
        assert_eq!(scene.viewport(), Viewport::new(1024.0, 768.0));
        assert_eq!(scene.stars().len(), 50);
    }
}
