use anim_render::{Camera, DepthRange, RenderError, Scene, Surface, Theme, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GLYPHS: [char; 5] = ['@', 'O', '#', '*', '+'];

const STEP: f32 = 0.03;
const FRICTION: f32 = 0.98;
const MAX_SPEED: f32 = 0.5;
const MIN_DISTANCE: f32 = 0.3;
const MAX_DISTANCE: f32 = 3.0;
const BOUND: f32 = 4.0;
const CAMERA_DISTANCE: f32 = 8.0;

#[derive(Clone, Copy, Debug)]
struct Particle {
    position: Vec3,
    velocity: Vec3,
    species: usize,
}

/// Particles attracting or repelling each other by species.
///
/// The simulation advances one step per frame whose time differs from the
/// previous one, so a paused clock freezes it. State persists until
/// [`Scene::reset`] reseeds it.
pub struct ParticleLife {
    count: usize,
    species: usize,
    particles: Vec<Particle>,
    /// `interactions[a][b]`: pull of species `b` on species `a`.
    interactions: Vec<Vec<f32>>,
    last_time: Option<f32>,
    rng: StdRng,
}

impl ParticleLife {
    pub fn new(count: usize, species: usize) -> Self {
        Self::with_rng(count, species, StdRng::from_entropy())
    }

    pub fn with_rng(count: usize, species: usize, rng: StdRng) -> Self {
        let mut life = Self {
            count,
            species: species.max(1),
            particles: Vec::new(),
            interactions: Vec::new(),
            last_time: None,
            rng,
        };
        life.reset();
        life
    }

    fn step(&mut self, dt: f32) {
        let forces: Vec<Vec3> = self
            .particles
            .iter()
            .enumerate()
            .map(|(i, p)| {
                self.particles
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(Vec3::ZERO, |force, (_, q)| {
                        let offset = q.position - p.position;
                        let dist = offset.length();
                        if dist < 0.01 {
                            return force;
                        }

                        let strength = if dist < MIN_DISTANCE {
                            -1.0 / (dist * dist)
                        } else if dist < MAX_DISTANCE {
                            self.interactions[p.species][q.species] / (dist + 1.0)
                        } else {
                            0.0
                        };
                        force + offset * (strength / dist)
                    })
            })
            .collect();

        for (particle, force) in self.particles.iter_mut().zip(forces) {
            let mut velocity = (particle.velocity + force * dt) * FRICTION;
            let speed = velocity.length();
            if speed > MAX_SPEED {
                velocity = velocity * (MAX_SPEED / speed);
            }
            particle.velocity = velocity;
            particle.position = wrap(particle.position + velocity);
        }
    }
}

fn wrap(p: Vec3) -> Vec3 {
    let axis = |v: f32| {
        if v > BOUND {
            -BOUND
        } else if v < -BOUND {
            BOUND
        } else {
            v
        }
    };
    Vec3::new(axis(p.x), axis(p.y), axis(p.z))
}

impl Scene for ParticleLife {
    fn name(&self) -> &str {
        "Particle Life"
    }

    fn render(
        &mut self,
        surface: &mut Surface,
        time: f32,
        theme: &dyn Theme,
    ) -> Result<DepthRange, RenderError> {
        if self.last_time != Some(time) {
            self.step(STEP);
            self.last_time = Some(time);
        }

        let camera = Camera::new(surface.width(), surface.height()).with_distance(CAMERA_DISTANCE);
        let visible: Vec<((i32, i32), f32, usize)> = self
            .particles
            .iter()
            .filter_map(|p| {
                let rotated = p.position.rotate_y(time * 0.2);
                camera.project(rotated).map(|screen| (screen, rotated.z, p.species))
            })
            .collect();

        let Some(range) = DepthRange::of(visible.iter().map(|&(_, z, _)| z)) else {
            return Ok(DepthRange::new(0.0, 1.0));
        };

        for ((x, y), z, species) in visible {
            let color = Some(theme.color_for_depth(z, range.min, range.max));
            surface.set(x, y, GLYPHS[species % GLYPHS.len()], z, color);
            surface.set(x + 1, y, '.', z + 0.1, color);
            surface.set(x - 1, y, '.', z + 0.1, color);
        }

        Ok(range)
    }

    fn reset(&mut self) {
        let rng = &mut self.rng;
        self.particles = (0..self.count)
            .map(|_| Particle {
                position: Vec3::new(
                    rng.gen_range(-3.0..3.0),
                    rng.gen_range(-3.0..3.0),
                    rng.gen_range(-3.0..3.0),
                ),
                velocity: Vec3::ZERO,
                species: rng.gen_range(0..self.species),
            })
            .collect();
        self.interactions = (0..self.species)
            .map(|_| (0..self.species).map(|_| rng.gen_range(-0.5..0.5)).collect())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use anim_render::{DriverConfig, FrameDriver, Palette};

    use super::*;

    fn seeded(count: usize) -> ParticleLife {
        ParticleLife::with_rng(count, 3, StdRng::seed_from_u64(7))
    }

    #[test]
    fn particles_stay_in_bounds() {
        let mut life = seeded(40);
        for _ in 0..50 {
            life.step(STEP);
        }
        for p in &life.particles {
            assert!(p.position.x.abs() <= BOUND + MAX_SPEED);
            assert!(p.velocity.length() <= MAX_SPEED + 1e-4);
        }
    }

    #[test]
    fn paused_driver_freezes_particles() {
        let theme = Palette::by_name("matrix");
        let mut life = seeded(30);
        let mut driver = FrameDriver::new(DriverConfig::default());
        driver.toggle_pause();

        let first = driver.render_frame(&mut life, &theme, 60, 20).unwrap();
        let positions: Vec<Vec3> = life.particles.iter().map(|p| p.position).collect();
        let second = driver.render_frame(&mut life, &theme, 60, 20).unwrap();

        assert_eq!(driver.clock().time(), 0.0);
        assert_eq!(first.text, second.text);
        assert_eq!(positions, life.particles.iter().map(|p| p.position).collect::<Vec<_>>());
    }

    #[test]
    fn running_driver_moves_particles() {
        let theme = Palette::by_name("matrix");
        let mut life = seeded(30);
        let mut driver = FrameDriver::new(DriverConfig::default());

        driver.render_frame(&mut life, &theme, 60, 20).unwrap();
        let positions: Vec<Vec3> = life.particles.iter().map(|p| p.position).collect();
        driver.render_frame(&mut life, &theme, 60, 20).unwrap();

        assert_ne!(positions, life.particles.iter().map(|p| p.position).collect::<Vec<_>>());
    }

    #[test]
    fn reset_reseeds_state() {
        let mut life = seeded(10);
        let before: Vec<Vec3> = life.particles.iter().map(|p| p.position).collect();
        life.reset();
        let after: Vec<Vec3> = life.particles.iter().map(|p| p.position).collect();
        assert_eq!(life.particles.len(), 10);
        assert_ne!(before, after);
    }

    #[test]
    fn draws_something() {
        let theme = Palette::by_name("neon");
        let mut life = seeded(30);
        let mut surface = Surface::new(80, 24);
        let range = life.render(&mut surface, 0.0, &theme).unwrap();
        assert!(range.min <= range.max);
        assert!(surface.cells().iter().any(|cell| GLYPHS.contains(&cell.ch)));
    }
}
