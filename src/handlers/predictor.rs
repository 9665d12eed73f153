//! Predictor page handlers
//!
//! `GET /` shows the form (awaiting input). `POST /predict` takes the
//! submission, runs one prediction and renders the page with its outcome.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};

use crate::listing::{Listing, ListingForm};
use crate::predict::predict_and_explain;
use crate::render::{render_page, Interaction};
use crate::{AppResult, AppState};

pub async fn page() -> Html<String> {
    Html(render_page(&Listing::default(), Interaction::AwaitingInput))
}

pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<ListingForm>, FormRejection>,
) -> AppResult<Html<String>> {
    let Form(form) = form?;
    let listing = Listing::from(&form);
    let record = listing.to_record();

    let artifacts = state.artifacts.clone();
    let result = tokio::task::spawn_blocking(move || predict_and_explain(&artifacts, &record)).await?;

    match &result {
        Ok(outcome) => {
            state.stats.record_success(outcome.inference_time_us);
            tracing::info!(
                "Prediction {:.2} in {}us ({:?})",
                outcome.price,
                outcome.inference_time_us,
                listing.furnishing
            );
        }
        Err(e) => {
            state.stats.record_failure();
            tracing::warn!("Prediction failed: {}", e);
        }
    }

    Ok(Html(render_page(&listing, Interaction::Rendered(&result))))
}
