pub mod actors;
pub mod assets;
pub mod controls;
pub mod events;
pub mod game;
pub mod hud;
pub mod level;
pub mod play;
pub mod rules;
pub mod session;
pub mod spawn;

pub use game::RingRunner;

hop_web::export_game!(RingRunner, "ring-runner");
