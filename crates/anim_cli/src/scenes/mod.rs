mod cube;
mod lissajous;
mod particles;
mod plasma;
mod warp;

use anim_render::{PackMode, Scene, ShaderScene};
use clap::ValueEnum;
use log::info;
use rand::seq::SliceRandom;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    Cube,
    Lissajous,
    Particles,
    Plasma,
    Warp,
    /// Any of the other scenes, picked at build time.
    Random,
}

impl SceneChoice {
    /// Build a fresh scene. `braille` only affects shader scenes.
    pub fn build(self, braille: bool) -> Box<dyn Scene> {
        let mode = if braille { PackMode::Braille } else { PackMode::Block };
        match self {
            SceneChoice::Cube => Box::new(cube::Cube),
            SceneChoice::Lissajous => Box::new(lissajous::Lissajous::default()),
            SceneChoice::Particles => Box::new(particles::ParticleLife::new(120, 5)),
            SceneChoice::Plasma => Box::new(ShaderScene::new("Plasma", plasma::shade, mode)),
            SceneChoice::Warp => Box::new(ShaderScene::new("Domain Warp", warp::shade, mode)),
            SceneChoice::Random => {
                let choice = SceneChoice::pick(&mut rand::thread_rng());
                info!("random scene: {choice:?}");
                choice.build(braille)
            },
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SceneChoice::Cube => "wireframe cube with thick edges and glowing corners",
            SceneChoice::Lissajous => "3D Lissajous knot drawn with half-block strokes",
            SceneChoice::Particles => "species-based particle life",
            SceneChoice::Plasma => "RGB plasma shader",
            SceneChoice::Warp => "domain-warped noise shader",
            SceneChoice::Random => "one of the above at random",
        }
    }

    /// A concrete scene, never [`SceneChoice::Random`] itself.
    fn pick(rng: &mut impl rand::Rng) -> SceneChoice {
        const CONCRETE: [SceneChoice; 5] = [
            SceneChoice::Cube,
            SceneChoice::Lissajous,
            SceneChoice::Particles,
            SceneChoice::Plasma,
            SceneChoice::Warp,
        ];
        CONCRETE.choose(rng).copied().unwrap_or(SceneChoice::Cube)
    }
}

#[cfg(test)]
mod tests {
    use anim_render::{DriverConfig, FrameDriver, Palette};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn every_scene_renders_a_frame() {
        let theme = Palette::by_name("matrix");
        for choice in SceneChoice::value_variants() {
            for braille in [false, true] {
                let mut scene = choice.build(braille);
                let mut driver = FrameDriver::new(DriverConfig::default());
                for _ in 0..3 {
                    let frame = driver.render_frame(scene.as_mut(), &theme, 60, 20).unwrap();
                    assert_eq!(frame.text.lines().count(), 20, "{choice:?}");
                }
            }
        }
    }

    #[test]
    fn random_pick_is_concrete() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_ne!(SceneChoice::pick(&mut rng), SceneChoice::Random);
        }
    }
}
