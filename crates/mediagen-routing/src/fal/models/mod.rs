//! Fal model routes.

pub mod kling_image_o1;
pub mod nano_banana;
pub mod veo31;
pub mod z_image_turbo;

use crate::registry::ModelRoute;

/// Every Fal route, for registry construction.
pub fn routes() -> Vec<Box<dyn ModelRoute>> {
    vec![
        Box::new(nano_banana::FalNanoBananaRoute),
        Box::new(nano_banana::FalNanoBananaProRoute),
        Box::new(z_image_turbo::FalZImageTurboRoute),
        Box::new(kling_image_o1::FalKlingImageO1Route),
        Box::new(veo31::FalVeo31Route),
    ]
}
