//! PPIO Minimax Speech 2.6 audio route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateAudioParams, ProviderId};
use serde_json::{Map, Value, json};

use crate::error::RouteError;
use crate::registry::ModelRoute;

/// Minimax Speech 2.6 text-to-speech, hd and turbo endpoints.
///
/// `voice_setting` and `audio_setting` objects are only attached when at
/// least one of their fields is present.
#[derive(Debug)]
pub struct PpioMinimaxSpeech26Route;

#[async_trait]
impl ModelRoute for PpioMinimaxSpeech26Route {
    fn name(&self) -> &'static str {
        "ppio-minimax-speech-2.6"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "minimax-speech-2.6"
            || model_id == "minimax-speech-2.6-hd"
            || model_id == "minimax-speech-2.6-turbo"
    }

    fn build_audio_request(
        &self,
        params: &GenerateAudioParams,
    ) -> Result<BuiltRequest, RouteError> {
        let endpoint = match params.model.as_str() {
            "minimax-speech-2.6" => {
                if params.extra_str("audio_spec") == Some("turbo") {
                    "/minimax-speech-2.6-turbo"
                } else {
                    "/minimax-speech-2.6-hd"
                }
            }
            "minimax-speech-2.6-hd" => "/minimax-speech-2.6-hd",
            "minimax-speech-2.6-turbo" => "/minimax-speech-2.6-turbo",
            other => return Err(RouteError::UnsupportedModel(other.to_string())),
        };

        let mut request_data = json!({
            "text": params.text,
            "output_format": params.output_format.as_deref().unwrap_or("url"),
        });

        let mut voice_setting = Map::new();
        if let Some(voice_id) = &params.voice_id {
            voice_setting.insert("voice_id".into(), json!(voice_id));
        }
        if let Some(speed) = params.speed {
            voice_setting.insert("speed".into(), json!(speed));
        }
        if let Some(volume) = params.volume {
            voice_setting.insert("vol".into(), json!(volume));
        }
        if let Some(pitch) = params.pitch {
            voice_setting.insert("pitch".into(), json!(pitch));
        }
        if let Some(emotion) = &params.emotion {
            voice_setting.insert("emotion".into(), json!(emotion));
        }
        if let Some(latex_read) = params.latex_read {
            voice_setting.insert("latex_read".into(), json!(latex_read));
        }
        if let Some(text_normalization) = params.text_normalization {
            voice_setting.insert("text_normalization".into(), json!(text_normalization));
        }
        if !voice_setting.is_empty() {
            request_data["voice_setting"] = Value::Object(voice_setting);
        }

        let mut audio_setting = Map::new();
        if let Some(sample_rate) = params.sample_rate {
            audio_setting.insert("sample_rate".into(), json!(sample_rate));
        }
        if let Some(bitrate) = params.bitrate {
            audio_setting.insert("bitrate".into(), json!(bitrate));
        }
        if let Some(format) = &params.format {
            audio_setting.insert("format".into(), json!(format));
        }
        if let Some(channel) = params.channel {
            audio_setting.insert("channel".into(), json!(channel));
        }
        if !audio_setting.is_empty() {
            request_data["audio_setting"] = Value::Object(audio_setting);
        }

        if let Some(boost) = &params.language_boost {
            request_data["language_boost"] = json!(boost);
        }
        for passthrough in ["pronunciation_dict", "timbre_weights", "voice_modify"] {
            if let Some(value) = params.extra_value(passthrough) {
                request_data[passthrough] = value.clone();
            }
        }

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params(model: &str) -> GenerateAudioParams {
        GenerateAudioParams {
            text: "Welcome aboard.".into(),
            model: model.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_selection() {
        let built = PpioMinimaxSpeech26Route
            .build_audio_request(&base_params("minimax-speech-2.6-hd"))
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/minimax-speech-2.6-hd"));

        let built = PpioMinimaxSpeech26Route
            .build_audio_request(&base_params("minimax-speech-2.6-turbo"))
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/minimax-speech-2.6-turbo"));

        let mut params = base_params("minimax-speech-2.6");
        params.extra.insert("audio_spec".into(), json!("turbo"));
        let built = PpioMinimaxSpeech26Route.build_audio_request(&params).unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/minimax-speech-2.6-turbo"));

        params.extra.remove("audio_spec");
        let built = PpioMinimaxSpeech26Route.build_audio_request(&params).unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/minimax-speech-2.6-hd"));
    }

    #[test]
    fn test_settings_objects_only_when_populated() {
        let built = PpioMinimaxSpeech26Route
            .build_audio_request(&base_params("minimax-speech-2.6-hd"))
            .unwrap();
        assert!(built.request_data.get("voice_setting").is_none());
        assert!(built.request_data.get("audio_setting").is_none());
        assert_eq!(built.request_data["output_format"], "url");

        let mut params = base_params("minimax-speech-2.6-hd");
        params.voice_id = Some("presenter_female".into());
        params.speed = Some(1.2);
        params.sample_rate = Some(32000);
        let built = PpioMinimaxSpeech26Route.build_audio_request(&params).unwrap();
        assert_eq!(
            built.request_data["voice_setting"]["voice_id"],
            "presenter_female"
        );
        assert_eq!(built.request_data["voice_setting"]["speed"], 1.2);
        assert_eq!(built.request_data["audio_setting"]["sample_rate"], 32000);
    }
}
