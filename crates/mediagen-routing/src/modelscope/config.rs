//! ModelScope endpoint constants and preset models.

use std::time::Duration;

pub const BASE_URL: &str = "https://api-inference.modelscope.cn";
pub const GENERATION_ENDPOINT: &str = "/v1/images/generations";
pub const STATUS_ENDPOINT: &str = "/v1/tasks";

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const MAX_POLL_ATTEMPTS: u32 = 120;

/// The image-edit model with a reduced parameter surface.
pub const IMAGE_EDIT_MODEL: &str = "Qwen/Qwen-Image-Edit-2509";

/// Preset models offered in the selector.
pub const PRESET_MODELS: &[(&str, &str)] = &[
    ("Tongyi-MAI/Z-Image-Turbo", "Z-Image-Turbo"),
    ("MusePublic/Qwen-image", "Qwen-image"),
    ("black-forest-labs/FLUX.1-Krea-dev", "FLUX.1-Krea-dev"),
    ("MusePublic/14_ckpt_SD_XL", "Anything XL"),
    ("MusePublic/majicMIX_realistic", "majicMIX realistic"),
];
