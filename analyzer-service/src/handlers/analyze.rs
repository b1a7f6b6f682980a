use crate::prompts;
use crate::services::extract::extract_json_object;
use crate::services::providers::{ImagePayload, VisionProvider};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use service_core::error::AppError;

const DEFAULT_MODE: &str = "report";
const DEFAULT_LANG: &str = "English";

/// `mode` and `lang` may arrive as query parameters or as multipart text
/// fields; form fields win.
#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub mode: Option<String>,
    pub lang: Option<String>,
}

/// `POST /analyze` — relay an uploaded report/bill image to the model and
/// coerce the reply into the analysis envelope.
///
/// Every outcome is HTTP 200; callers inspect the body for `analysis` and
/// `error` keys. This mirrors the deployed contract the frontend relies on.
pub async fn analyze_document(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
    multipart: Multipart,
) -> Json<serde_json::Value> {
    match run_analysis(&state, params, multipart).await {
        Ok(body) => Json(body),
        Err(e) => {
            tracing::error!(error = %e, "Analysis request failed");
            Json(json!({ "error": e.to_string() }))
        }
    }
}

async fn run_analysis(
    state: &AppState,
    params: AnalyzeParams,
    mut multipart: Multipart,
) -> Result<serde_json::Value, AppError> {
    let mut mode = params.mode;
    let mut lang = params.lang;
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                })?;
                upload = Some(data.to_vec());
            }
            "mode" => {
                mode = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read mode field: {}", e))
                })?);
            }
            "lang" => {
                lang = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read lang field: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let bytes = upload.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file uploaded")))?;
    let mode = mode.unwrap_or_else(|| DEFAULT_MODE.to_string());
    let lang = lang.unwrap_or_else(|| DEFAULT_LANG.to_string());

    tracing::info!(
        mode = %mode,
        lang = %lang,
        size = bytes.len(),
        "Received analysis request"
    );

    analyze_image(state.provider.as_ref(), bytes, &mode, &lang).await
}

/// Decode the upload, pick the prompt, call the model, and render the
/// success or parse-failure envelope.
async fn analyze_image(
    provider: &dyn VisionProvider,
    bytes: Vec<u8>,
    mode: &str,
    lang: &str,
) -> Result<serde_json::Value, AppError> {
    // Decode up front so corrupt uploads fail before the model call; the
    // detected format also supplies the MIME type for the inline payload.
    let format = image::guess_format(&bytes)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Unsupported image: {}", e)))?;
    image::load_from_memory(&bytes)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid image: {}", e)))?;

    let payload = ImagePayload {
        mime_type: format.to_mime_type().to_string(),
        data: bytes,
    };

    let prompt = prompts::for_mode(mode, lang);

    let reply = provider
        .describe(&prompt, &payload)
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    let trimmed = reply.trim();
    Ok(match extract_json_object(trimmed) {
        Ok(value) => json!({ "analysis": value }),
        Err(e) => {
            tracing::warn!(error = %e, "Model reply was not valid JSON");
            json!({
                "analysis": trimmed,
                "error": "AI response was not valid JSON"
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockVisionProvider;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::new(2, 2);
        let mut cursor = std::io::Cursor::new(Vec::new());
        img.write_to(&mut cursor, image::ImageFormat::Png)
            .expect("Failed to encode PNG");
        cursor.into_inner()
    }

    #[tokio::test]
    async fn wraps_parsed_reply_in_analysis_envelope() {
        let provider = MockVisionProvider::new(r#"Sure! {"a": 1} Hope that helps."#);

        let body = analyze_image(&provider, png_bytes(), "report", "English")
            .await
            .unwrap();

        assert_eq!(body, json!({ "analysis": { "a": 1 } }));
    }

    #[tokio::test]
    async fn preserves_raw_text_when_reply_is_not_json() {
        let provider = MockVisionProvider::new("not json at all");

        let body = analyze_image(&provider, png_bytes(), "report", "English")
            .await
            .unwrap();

        assert_eq!(
            body,
            json!({
                "analysis": "not json at all",
                "error": "AI response was not valid JSON"
            })
        );
    }

    #[tokio::test]
    async fn rejects_undecodable_uploads() {
        let provider = MockVisionProvider::new("{}");

        let err = analyze_image(&provider, b"plain text, no image".to_vec(), "report", "English")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Unsupported image"));
    }

    #[tokio::test]
    async fn surfaces_provider_failures() {
        let provider = MockVisionProvider::unavailable();

        let err = analyze_image(&provider, png_bytes(), "report", "English")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadGateway(_)));
    }
}
