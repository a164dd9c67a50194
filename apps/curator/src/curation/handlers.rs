//! Axum route handlers for the curation API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::curation::models::{ExampleFields, ExampleId, ExampleRecord, StudentSample};
use crate::curation::prompts::PromptBuilder;
use crate::curation::store::StoredExample;
use crate::curation::teacher::{
    critique_sample, draft_example, AcrosticVerdict, CritiqueOutcome, DraftOutcome,
};
use crate::errors::AppError;
use crate::state::AppState;

/// File name offered for the exported curated set.
pub const EXPORT_FILE_NAME: &str = "constitutional_examples.jsonl";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SampleView {
    pub index: usize,
    #[serde(flatten)]
    pub sample: StudentSample,
}

#[derive(Debug, Serialize)]
pub struct ExampleView {
    pub position: usize,
    #[serde(flatten)]
    pub example: StoredExample,
}

#[derive(Debug, Serialize)]
pub struct ExampleListResponse {
    pub keyword: String,
    pub examples: Vec<ExampleView>,
}

#[derive(Debug, Serialize)]
pub struct CreatedExample {
    pub id: ExampleId,
    pub position: usize,
    pub verdict: AcrosticVerdict,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation screen: student samples
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/samples
pub async fn handle_list_samples(State(state): State<AppState>) -> Json<Vec<SampleView>> {
    Json(
        state
            .samples
            .iter()
            .enumerate()
            .map(|(index, sample)| SampleView {
                index,
                sample: sample.clone(),
            })
            .collect(),
    )
}

/// POST /api/v1/samples/:index/critique
///
/// Few-shot critique + rewrite of one student sample. The verdict is returned
/// either way; the store is never touched.
pub async fn handle_critique_sample(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<CritiqueOutcome>, AppError> {
    let sample = state.samples.get(index).ok_or_else(|| {
        AppError::NotFound(format!(
            "Sample {index} not found ({} loaded)",
            state.samples.len()
        ))
    })?;

    let full_prompt = {
        let store = state.store.read().await;
        let builder = PromptBuilder::new(&state.config.keyword, store.fields());
        builder.critique(&sample.user, &sample.bot)
    };

    info!("Requesting critique for sample {index}");
    let outcome =
        critique_sample(state.llm.as_ref(), full_prompt, sample, &state.config.keyword).await?;
    Ok(Json(outcome))
}

// ────────────────────────────────────────────────────────────────────────────
// Editing screen: curated examples
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/examples
pub async fn handle_list_examples(State(state): State<AppState>) -> Json<ExampleListResponse> {
    let store = state.store.read().await;
    let examples = store
        .iter()
        .enumerate()
        .map(|(position, example)| ExampleView {
            position,
            example: example.clone(),
        })
        .collect();

    Json(ExampleListResponse {
        keyword: state.config.keyword.to_string(),
        examples,
    })
}

/// GET /api/v1/examples/:id
pub async fn handle_get_example(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExampleView>, AppError> {
    let id = ExampleId::from(id);
    let store = state.store.read().await;
    let position = store.position(id).ok_or_else(|| not_found(id))?;
    let example = store.get_at(position).cloned().ok_or_else(|| not_found(id))?;
    Ok(Json(ExampleView { position, example }))
}

/// POST /api/v1/examples
///
/// Field-presence check, then acrostic check, then append. Rejected candidates
/// never reach the store.
pub async fn handle_add_example(
    State(state): State<AppState>,
    payload: Result<Json<ExampleFields>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedExample>), AppError> {
    let Json(fields) = payload?;
    let record = ExampleRecord::admit(fields, &state.config.keyword)?;
    let verdict = AcrosticVerdict::passed(record.acrostic());

    let preview: String = record.fields().prompt.chars().take(60).collect();

    let mut store = state.store.write().await;
    let id = store.append(record);
    let position = store.len() - 1;
    info!("Added example {id} at position {position}: {preview:?}");

    Ok((
        StatusCode::CREATED,
        Json(CreatedExample {
            id,
            position,
            verdict,
        }),
    ))
}

/// PUT /api/v1/examples/:id
///
/// Stages edited text as-is. Use the validate endpoint to re-check it.
pub async fn handle_update_example(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ExampleFields>, JsonRejection>,
) -> Result<Json<AcrosticVerdict>, AppError> {
    let Json(fields) = payload?;
    let id = ExampleId::from(id);
    let verdict = AcrosticVerdict::of(&fields, &state.config.keyword);
    state.store.write().await.update(id, fields)?;
    info!("Updated example {id} (compliant={})", verdict.compliant);
    Ok(Json(verdict))
}

/// DELETE /api/v1/examples/:id
pub async fn handle_delete_example(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let id = ExampleId::from(id);
    state.store.write().await.remove(id)?;
    info!("Deleted example {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/examples/:id/validate
pub async fn handle_validate_example(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AcrosticVerdict>, AppError> {
    let id = ExampleId::from(id);
    let store = state.store.read().await;
    let example = store.get(id).ok_or_else(|| not_found(id))?;
    Ok(Json(AcrosticVerdict::of(
        &example.fields,
        &state.config.keyword,
    )))
}

/// POST /api/v1/drafts
///
/// Returns model-drafted fields for the operator to review and submit.
pub async fn handle_draft_example(
    State(state): State<AppState>,
) -> Result<Json<DraftOutcome>, AppError> {
    let full_prompt = {
        let store = state.store.read().await;
        let builder = PromptBuilder::new(&state.config.keyword, store.fields());
        builder.draft()
    };

    let outcome = draft_example(state.llm.as_ref(), &full_prompt, &state.config.keyword).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/export
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = state.store.read().await;
    let body = store.serialize()?;
    let count = store.len();
    drop(store);
    info!("Exporting {count} example(s)");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

fn not_found(id: ExampleId) -> AppError {
    AppError::NotFound(format!("Example {id} not found"))
}
