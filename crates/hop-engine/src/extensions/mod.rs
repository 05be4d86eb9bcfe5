//! Optional systems layered on the scene: tweens.

pub mod tween;

pub use tween::{lerp, Tween, TweenId, TweenState, TweenTarget};
