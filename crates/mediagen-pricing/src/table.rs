//! The per-model price table.
//!
//! PPIO models are quoted in CNY; Fal models publish USD rates that are
//! converted at a fixed rate for display.

use mediagen_types::ProviderId;

use crate::{Currency, PriceParams, PriceValue, PricingConfig, PricingKind};

const USD_TO_CNY: f64 = 7.071;

// Image rates
const SEEDREAM_PER_IMAGE: f64 = 0.2;
const NANO_BANANA_USD: f64 = 0.039;
const NANO_BANANA_PRO_USD: f64 = 0.15;
const SEEDREAM_V4_USD: f64 = 0.0283;
const SEEDREAM_V45_USD: f64 = 0.04;
const Z_IMAGE_PER_MEGAPIXEL_USD: f64 = 0.005;
const KLING_IMAGE_O1_USD: f64 = 0.028;

// Video rates (USD per second)
const KLING_VIDEO_O1_IMAGE_USD: f64 = 0.112;
const KLING_VIDEO_O1_VIDEO_USD: f64 = 0.168;
const KLING_V26_PRO_AUDIO_OFF_USD: f64 = 0.07;
const KLING_V26_PRO_AUDIO_ON_USD: f64 = 0.14;

// Audio rates (CNY per 10k characters)
const SPEECH_HD_PER_10K: f64 = 3.5;
const SPEECH_TURBO_PER_10K: f64 = 2.0;

const VIDU_FIXED: f64 = 2.25;

fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn amount(value: f64) -> PriceValue {
    PriceValue::Amount(round2(value))
}

fn seedream(params: &PriceParams) -> PriceValue {
    let max_images = params.max_images.unwrap_or(1);
    amount(SEEDREAM_PER_IMAGE * f64::from(max_images))
}

fn nano_banana(params: &PriceParams) -> PriceValue {
    let num_images = params.num_images.unwrap_or(1);
    amount(NANO_BANANA_USD * USD_TO_CNY * f64::from(num_images))
}

fn nano_banana_pro(params: &PriceParams) -> PriceValue {
    let num_images = params.num_images.unwrap_or(1);
    let base = NANO_BANANA_PRO_USD * USD_TO_CNY * f64::from(num_images);
    // 4K output doubles the rate.
    let multiplier = if params.resolution.as_deref() == Some("4K") {
        2.0
    } else {
        1.0
    };
    amount(base * multiplier)
}

fn seedream_v4(params: &PriceParams) -> PriceValue {
    let num_images = params.num_images.unwrap_or(1);
    amount(SEEDREAM_V4_USD * USD_TO_CNY * f64::from(num_images))
}

fn seedream_v45(params: &PriceParams) -> PriceValue {
    let num_images = params.num_images.unwrap_or(1);
    amount(SEEDREAM_V45_USD * USD_TO_CNY * f64::from(num_images))
}

fn z_image_turbo(params: &PriceParams) -> PriceValue {
    let num_images = params.num_images.unwrap_or(1);

    let preset_pixels = |preset: &str| -> Option<f64> {
        Some(match preset {
            "portrait_4_3" => 768.0 * 1024.0,
            "portrait_16_9" => 1080.0 * 1920.0,
            "square" => 1024.0 * 1024.0,
            "landscape_4_3" => 1024.0 * 768.0,
            "landscape_16_9" => 1920.0 * 1080.0,
            _ => return None,
        })
    };

    let mut pixels = 1024.0 * 768.0;
    if let Some(size) = params.image_size.as_deref() {
        if let Some((w, h)) = size.split_once('*') {
            if let (Ok(w), Ok(h)) = (w.parse::<f64>(), h.parse::<f64>()) {
                pixels = w * h;
            }
        } else if let Some(preset) = preset_pixels(size) {
            pixels = preset;
        }
    }

    let per_image = (pixels / 1_000_000.0) * Z_IMAGE_PER_MEGAPIXEL_USD * USD_TO_CNY;
    amount(per_image * f64::from(num_images))
}

fn kling_image_o1(params: &PriceParams) -> PriceValue {
    let num_images = params.num_images.unwrap_or(1);
    amount(KLING_IMAGE_O1_USD * USD_TO_CNY * f64::from(num_images))
}

fn kling_video_o1(params: &PriceParams) -> PriceValue {
    let duration = params.duration.unwrap_or(5);
    let per_second = match params.mode.as_deref() {
        Some("video-to-video-edit") | Some("video-to-video-reference") => KLING_VIDEO_O1_VIDEO_USD,
        _ => KLING_VIDEO_O1_IMAGE_USD,
    };
    amount(per_second * USD_TO_CNY * f64::from(duration))
}

fn kling_v26_pro(params: &PriceParams) -> PriceValue {
    let duration = params.duration.unwrap_or(5);
    let per_second = if params.audio.unwrap_or(true) {
        KLING_V26_PRO_AUDIO_ON_USD
    } else {
        KLING_V26_PRO_AUDIO_OFF_USD
    };
    amount(per_second * USD_TO_CNY * f64::from(duration))
}

fn minimax_speech(params: &PriceParams) -> PriceValue {
    let chars_in_10k = params.text_length.unwrap_or(0) as f64 / 10_000.0;
    let per_10k = match params.audio_spec.as_deref() {
        Some("hd") | Some("audio-pro") => SPEECH_HD_PER_10K,
        _ => SPEECH_TURBO_PER_10K,
    };
    amount(chars_in_10k * per_10k)
}

fn kling_25_turbo(params: &PriceParams) -> PriceValue {
    if params.duration == Some(10) {
        PriceValue::Amount(5.0)
    } else {
        PriceValue::Amount(2.5)
    }
}

fn hailuo_lookup(table: &[(&str, u32, f64)], resolution: &str, duration: u32) -> f64 {
    table
        .iter()
        .find(|(res, dur, _)| *res == resolution && *dur == duration)
        .map(|(_, _, price)| *price)
        .unwrap_or(0.0)
}

fn hailuo_23(params: &PriceParams) -> PriceValue {
    // (resolution, duration, CNY)
    const STANDARD: &[(&str, u32, f64)] = &[
        ("768P", 6, 2.0),
        ("768P", 10, 4.0),
        ("1080P", 6, 3.5),
        ("1080P", 10, 0.0),
    ];
    const IMAGE_FAST: &[(&str, u32, f64)] = &[
        ("768P", 6, 1.35),
        ("768P", 10, 2.25),
        ("1080P", 6, 2.3),
        ("1080P", 10, 0.0),
    ];

    let duration = params.duration.unwrap_or(6);
    let resolution = params.resolution.clone().unwrap_or_else(|| "768P".into());
    let table = if params.has_image.unwrap_or(false) && params.fast_mode.unwrap_or(false) {
        IMAGE_FAST
    } else {
        STANDARD
    };
    PriceValue::Amount(hailuo_lookup(table, &resolution, duration))
}

fn hailuo_02(params: &PriceParams) -> PriceValue {
    const TABLE: &[(&str, u32, f64)] = &[
        ("768P", 6, 1.8),
        ("768P", 10, 3.6),
        ("1080P", 6, 3.15),
        ("1080P", 10, 0.0),
    ];

    let duration = params.duration.unwrap_or(6);
    let resolution = params.resolution.clone().unwrap_or_else(|| "768P".into());
    PriceValue::Amount(hailuo_lookup(TABLE, &resolution, duration))
}

fn pixverse(params: &PriceParams) -> PriceValue {
    const NORMAL: &[(&str, f64)] = &[
        ("360p", 1.8125),
        ("540p", 1.8125),
        ("720p", 2.5375),
        ("1080p", 5.075),
    ];
    // Fast mode does not support 1080p.
    const FAST: &[(&str, f64)] = &[
        ("360p", 3.625),
        ("540p", 3.625),
        ("720p", 5.075),
        ("1080p", 0.0),
    ];

    let resolution = params.resolution.clone().unwrap_or_else(|| "540p".into());
    let table = if params.fast_mode.unwrap_or(false) {
        FAST
    } else {
        NORMAL
    };
    let price = table
        .iter()
        .find(|(res, _)| *res == resolution)
        .map(|(_, price)| *price)
        .unwrap_or(0.0);
    PriceValue::Amount(price)
}

fn wan(params: &PriceParams) -> PriceValue {
    const TABLE: &[(&str, u32, f64)] = &[
        ("480p", 5, 1.5),
        ("480p", 10, 3.0),
        ("720p", 5, 3.0),
        ("720p", 10, 6.0),
        ("1080p", 5, 5.0),
        ("1080p", 10, 10.0),
    ];

    let duration = params.duration.unwrap_or(5);
    let resolution = params
        .resolution
        .clone()
        .unwrap_or_else(|| "1080P".into())
        .to_lowercase();
    PriceValue::Amount(hailuo_lookup(TABLE, &resolution, duration))
}

/// 21:9-family ratios are "wide", 16:9 "standard", 4:3 "classic", 1:1
/// "square"; everything else prices as standard.
fn seedance_aspect_group(aspect: &str) -> usize {
    let ratio: String = aspect.chars().filter(|c| !c.is_whitespace()).collect();
    match ratio.as_str() {
        "21:9" | "9:21" => 0,
        "16:9" | "9:16" => 1,
        "4:3" | "3:4" => 2,
        "1:1" => 3,
        _ => 1,
    }
}

fn seedance_v1(params: &PriceParams) -> PriceValue {
    // (variant, duration, resolution, [wide, standard, classic, square])
    const TABLE: &[(&str, u32, &str, [f64; 4])] = &[
        ("lite", 5, "480p", [0.47, 0.49, 0.47, 0.48]),
        ("lite", 5, "720p", [1.13, 1.03, 1.09, 1.08]),
        ("lite", 5, "1080p", [2.37, 2.45, 2.43, 2.43]),
        ("lite", 10, "480p", [0.94, 0.97, 0.94, 0.96]),
        ("lite", 10, "720p", [2.26, 2.06, 2.18, 2.16]),
        ("lite", 10, "1080p", [4.73, 4.9, 4.87, 4.86]),
        ("pro", 5, "480p", [0.7, 0.73, 0.7, 0.72]),
        ("pro", 5, "720p", [1.69, 1.54, 1.64, 1.62]),
        ("pro", 5, "1080p", [3.55, 3.67, 3.65, 3.65]),
        ("pro", 10, "480p", [1.4, 1.46, 1.41, 1.44]),
        ("pro", 10, "720p", [3.38, 3.09, 3.28, 3.24]),
        ("pro", 10, "1080p", [7.1, 7.34, 7.3, 7.29]),
    ];

    let variant = params.tier.clone().unwrap_or_else(|| "lite".into());
    let duration = params.duration.unwrap_or(5);
    let resolution = params.resolution.clone().unwrap_or_else(|| "720p".into());
    let group = seedance_aspect_group(params.aspect_ratio.as_deref().unwrap_or("16:9"));

    let price = TABLE
        .iter()
        .find(|(v, d, r, _)| *v == variant && *d == duration && *r == resolution)
        .map(|(_, _, _, groups)| groups[group])
        .unwrap_or(0.0);
    PriceValue::Amount(price)
}

fn veo_31(params: &PriceParams) -> PriceValue {
    let duration = params.duration.unwrap_or(8);
    let mode = params.mode.clone().unwrap_or_default();
    // Reference-to-video has no fast tier.
    let fast = params.fast_mode.unwrap_or(false) && mode != "reference-to-video";
    let audio = params.audio.unwrap_or(false);

    let per_second = match (fast, audio) {
        (true, true) => 0.15,
        (true, false) => 0.1,
        (false, true) => 0.4,
        (false, false) => 0.2,
    };
    amount(per_second * USD_TO_CNY * f64::from(duration))
}

fn sora_2(params: &PriceParams) -> PriceValue {
    let duration = params.duration.unwrap_or(4);
    let per_second = if params.mode.as_deref() == Some("pro") {
        if params.resolution.as_deref() == Some("1080p") {
            0.5
        } else {
            0.3
        }
    } else {
        0.1
    };
    amount(per_second * USD_TO_CNY * f64::from(duration))
}

fn ltx_2(params: &PriceParams) -> PriceValue {
    const PRO: &[(&str, f64)] = &[("1080p", 0.06), ("1440p", 0.12), ("2160p", 0.24)];
    const FAST: &[(&str, f64)] = &[("1080p", 0.04), ("1440p", 0.08), ("2160p", 0.16)];
    const RETAKE_USD: f64 = 0.1;

    let mode = params.mode.clone().unwrap_or_else(|| "text-to-video".into());
    let (per_second, duration) = if mode == "retake-video" {
        (RETAKE_USD, params.retake_duration.unwrap_or(5))
    } else {
        let resolution = params.resolution.clone().unwrap_or_else(|| "1080p".into());
        let table = if params.fast_mode.unwrap_or(true) {
            FAST
        } else {
            PRO
        };
        let rate = table
            .iter()
            .find(|(res, _)| *res == resolution)
            .map(|(_, rate)| *rate)
            .unwrap_or(table[0].1);
        (rate, params.duration.unwrap_or(6))
    };

    amount(per_second * USD_TO_CNY * f64::from(duration))
}

/// The full price table.
pub fn price_table() -> Vec<PricingConfig> {
    use PricingKind::{Calculated, Fixed};

    let entry = |provider, model_id, kind| PricingConfig {
        provider,
        model_id,
        currency: Currency::Cny,
        kind,
    };

    vec![
        // Image models
        entry(ProviderId::Ppio, "seedream-4.0", Calculated(seedream)),
        entry(ProviderId::Fal, "fal-ai-nano-banana", Calculated(nano_banana)),
        entry(
            ProviderId::Fal,
            "fal-ai-nano-banana-pro",
            Calculated(nano_banana_pro),
        ),
        entry(
            ProviderId::Fal,
            "fal-ai-bytedance-seedream-v4",
            Calculated(seedream_v4),
        ),
        entry(
            ProviderId::Fal,
            "fal-ai-bytedance-seedream-v4.5",
            Calculated(seedream_v45),
        ),
        entry(
            ProviderId::Fal,
            "fal-ai-z-image-turbo",
            Calculated(z_image_turbo),
        ),
        entry(
            ProviderId::Fal,
            "fal-ai-kling-image-o1",
            Calculated(kling_image_o1),
        ),
        // Audio models
        entry(
            ProviderId::Ppio,
            "minimax-speech-2.6",
            Calculated(minimax_speech),
        ),
        // Video models
        entry(ProviderId::Ppio, "vidu-q1", Fixed(VIDU_FIXED)),
        entry(
            ProviderId::Ppio,
            "kling-2.5-turbo",
            Calculated(kling_25_turbo),
        ),
        entry(
            ProviderId::Ppio,
            "minimax-hailuo-2.3",
            Calculated(hailuo_23),
        ),
        entry(ProviderId::Ppio, "minimax-hailuo-02", Calculated(hailuo_02)),
        entry(ProviderId::Ppio, "pixverse-v4.5", Calculated(pixverse)),
        entry(ProviderId::Ppio, "wan-2.5-preview", Calculated(wan)),
        entry(ProviderId::Ppio, "seedance-v1", Calculated(seedance_v1)),
        entry(
            ProviderId::Fal,
            "fal-ai-kling-video-o1",
            Calculated(kling_video_o1),
        ),
        entry(
            ProviderId::Fal,
            "fal-ai-kling-video-v2.6-pro",
            Calculated(kling_v26_pro),
        ),
        entry(ProviderId::Fal, "fal-ai-veo-3.1", Calculated(veo_31)),
        entry(ProviderId::Fal, "fal-ai-sora-2", Calculated(sora_2)),
        entry(ProviderId::Fal, "fal-ai-ltx-2", Calculated(ltx_2)),
    ]
}
