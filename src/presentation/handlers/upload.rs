use std::collections::HashMap;

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::DetectionError;
use crate::domain::AudioFormat;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct PredictionResponse {
    pub message: String,
    pub status: f32,
    pub model: String,
}

/// Client input errors are reported as 200 responses with a structured
/// error field; `model` echoes whatever the client sent, absent included.
#[derive(Serialize)]
pub struct ClientErrorResponse {
    pub model: Option<String>,
    pub error: String,
}

#[derive(Serialize)]
pub struct FaultResponse {
    pub message: String,
    pub error: String,
}

#[tracing::instrument(skip_all)]
pub async fn upload_handler(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut audio: Option<(Vec<u8>, Option<AudioFormat>)> = None;
    let mut form: HashMap<String, String> = HashMap::new();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                if name == "audio" {
                    let format = field.content_type().and_then(AudioFormat::from_mime);
                    match field.bytes().await {
                        Ok(bytes) => {
                            tracing::debug!(bytes = bytes.len(), "Audio part received");
                            audio = Some((bytes.to_vec(), format));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to read audio part");
                        }
                    }
                } else if let Ok(value) = field.text().await {
                    form.insert(name, value);
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                break;
            }
        }
    }

    // Merged parameter view; query wins over form on conflict.
    let param = |key: &str| query.get(key).cloned().or_else(|| form.get(key).cloned());
    let model_param = param("model");
    let age = param("age").and_then(|v| v.parse::<f32>().ok());

    let Some((data, format)) = audio else {
        tracing::warn!("Upload request without an audio part");
        return (
            StatusCode::OK,
            Json(ClientErrorResponse {
                model: model_param,
                error: "No file part in the request".to_string(),
            }),
        )
            .into_response();
    };

    let model_name = model_param.clone().unwrap_or_default();

    match state
        .detection_service
        .detect(&data, format, &model_name, age)
        .await
    {
        Ok(prediction) => (
            StatusCode::OK,
            Json(PredictionResponse {
                message: "File successfully processed".to_string(),
                status: prediction.score,
                model: prediction.model.wire_name().to_string(),
            }),
        )
            .into_response(),
        Err(DetectionError::ModelUnavailable) => (
            StatusCode::OK,
            Json(ClientErrorResponse {
                model: model_param,
                error: "Please select another model to process.".to_string(),
            }),
        )
            .into_response(),
        Err(DetectionError::MissingAge) => (
            StatusCode::OK,
            Json(ClientErrorResponse {
                model: model_param,
                error: "No age argument in the request".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Prediction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FaultResponse {
                    message: "File could not be processed".to_string(),
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
