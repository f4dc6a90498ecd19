//! KIE model routes.

pub mod grok_imagine;
pub mod hailuo;
pub mod kling_v26;
pub mod nano_banana_pro;
pub mod seedance_v3;
pub mod seedream;
pub mod sora2;
pub mod z_image;

use crate::registry::ModelRoute;

/// Every KIE route, for registry construction.
pub fn routes() -> Vec<Box<dyn ModelRoute>> {
    vec![
        Box::new(hailuo::KieHailuo02Route),
        Box::new(hailuo::KieHailuo23Route),
        Box::new(kling_v26::KieKlingV26Route),
        Box::new(seedance_v3::KieSeedanceV3Route),
        Box::new(sora2::KieSora2Route),
        Box::new(grok_imagine::KieGrokImagineVideoRoute),
        Box::new(grok_imagine::KieGrokImagineImageRoute),
        Box::new(nano_banana_pro::KieNanoBananaProRoute),
        Box::new(z_image::KieZImageRoute),
        Box::new(seedream::KieSeedream40Route),
        Box::new(seedream::KieSeedream45Route),
    ]
}
