pub mod physics;
pub mod scene;
pub mod time;
pub mod timer;
