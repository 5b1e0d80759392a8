//! Per-element behavior wrappers created during classification.

mod animated;
mod interactive;

pub use animated::{AnimatedDelegate, AnimationState};
pub use interactive::InteractiveDelegate;
