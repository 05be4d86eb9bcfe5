pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Completion, EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent, SoundEvent};
pub use components::animation::{AnimationComponent, AnimationDef};
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::sprite::{AtlasId, SpriteComponent};
pub use core::physics::{Aabb, ArcadeBody, ArcadePhysics, Sides};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::timer::{FiredTimer, TimerId, TimerQueue};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use input::keyboard::Keyboard;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{SpriteAsset, SpriteRegistry};
pub use systems::animation::tick_animations;
pub use systems::render::build_render_buffer;

pub use extensions::{lerp, Tween, TweenId, TweenState, TweenTarget};
