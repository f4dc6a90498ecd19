//! PPIO model routes.

pub mod kling_25_turbo;
pub mod kling_26_pro;
pub mod kling_o1;
pub mod minimax_hailuo;
pub mod minimax_speech;
pub mod pixverse;
pub mod seedance;
pub mod seedream;
pub mod vidu;
pub mod wan;

use crate::registry::ModelRoute;

/// Every PPIO route, for registry construction.
pub fn routes() -> Vec<Box<dyn ModelRoute>> {
    vec![
        Box::new(seedream::PpioSeedream40Route),
        Box::new(kling_25_turbo::PpioKling25TurboRoute),
        Box::new(kling_26_pro::PpioKling26ProRoute),
        Box::new(kling_o1::PpioKlingO1Route),
        Box::new(minimax_hailuo::PpioHailuo23Route),
        Box::new(minimax_hailuo::PpioHailuo02Route),
        Box::new(vidu::PpioViduQ1Route),
        Box::new(pixverse::PpioPixverse45Route),
        Box::new(wan::PpioWan25PreviewRoute),
        Box::new(seedance::PpioSeedanceV1Route),
        Box::new(seedance::PpioSeedance15ProRoute),
        Box::new(minimax_speech::PpioMinimaxSpeech26Route),
    ]
}
