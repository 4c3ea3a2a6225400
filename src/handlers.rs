use crate::analytics::{AnalyticsAction, Device, classify_device};
use crate::dates::{canonical, parse_canonical};
use crate::errors::AppError;
use crate::models::{
    CompleteRequest, CompleteResponse, DevotionalQuery, DevotionalView, NavigateRequest,
    ToggleRequest, ToggleResponse,
};
use crate::navigation::{Navigation, parse_jump_input};
use crate::progress;
use crate::state::AppState;
use crate::storage::KeyValueStore;
use crate::ui::render_index;
use crate::view::build_view;
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::Html,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = state.navigator.lock().await.current();
    Html(render_index(&canonical(date)))
}

pub async fn get_devotional(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DevotionalQuery>,
) -> Result<Json<DevotionalView>, AppError> {
    let navigation = match query.date.as_deref() {
        Some(raw) => Navigation::Jump(parse_date(raw)?),
        None => Navigation::Reload,
    };

    let view = load(&state, navigation, &headers).await?;
    Ok(Json(view))
}

pub async fn navigate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<DevotionalView>, AppError> {
    let navigation = match payload.action.trim() {
        "prev" => Navigation::Previous,
        "next" => Navigation::Next,
        "jump" => {
            let raw = payload.date.as_deref().unwrap_or_default();
            match parse_jump_input(raw) {
                Ok(Some(date)) => Navigation::Jump(date),
                Ok(None) => Navigation::Reload,
                Err(invalid) => {
                    return Err(AppError::bad_request(format!(
                        "'{}' is not a YYYY-MM-DD date",
                        invalid.0
                    )));
                }
            }
        }
        _ => return Err(AppError::bad_request("action must be 'prev', 'next' or 'jump'")),
    };

    let view = load(&state, navigation, &headers).await?;
    Ok(Json(view))
}

pub async fn toggle_item(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let date = parse_date(&payload.date)?;

    let (outcome, summary) = with_store(&state, move |store| {
        let current = progress::initialize(store, date);
        let outcome = progress::toggle(store, current, payload.index)?;
        let summary = progress::summarize(store, &outcome.progress);
        Ok((outcome, summary))
    })
    .await?;

    if outcome.entered_ready {
        info!(date = %canonical(date), "checklist ready to complete");
    }

    Ok(Json(ToggleResponse {
        date: canonical(date),
        progress: summary,
        entered_ready: outcome.entered_ready,
    }))
}

pub async fn complete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CompleteRequest>,
) -> Result<Json<CompleteResponse>, AppError> {
    let date = parse_date(&payload.date)?;

    let (newly_marked, summary) = with_store(&state, move |store| {
        let current = progress::initialize(store, date);
        let mut newly_marked = false;
        if !progress::is_already_complete(store, date) {
            if !progress::is_ready_to_complete(store, &current) {
                return Err(AppError::conflict(
                    "finish every checklist item before marking the day complete",
                ));
            }
            newly_marked = progress::mark_complete(store, date)?;
        }
        Ok((newly_marked, progress::summarize(store, &current)))
    })
    .await?;

    if newly_marked {
        info!(date = %canonical(date), "devotional marked complete");
        state
            .analytics
            .report(date, AnalyticsAction::Completed, device(&headers));
    }

    Ok(Json(CompleteResponse {
        date: canonical(date),
        progress: summary,
    }))
}

/// Runs a store operation on the blocking pool; file-backed writes are
/// synchronous.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&mut dyn KeyValueStore) -> Result<T, AppError> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || {
        let mut guard = store.blocking_lock();
        op(&mut **guard)
    })
    .await
    .map_err(AppError::internal)?
}

async fn load(
    state: &AppState,
    navigation: Navigation,
    headers: &HeaderMap,
) -> Result<DevotionalView, AppError> {
    let ticket = state.navigator.lock().await.apply(navigation);
    let fetched = state.source.fetch_records().await;

    if !state.navigator.lock().await.is_current(&ticket) {
        debug!(date = %canonical(ticket.date), "discarding stale devotional load");
        return Err(AppError::conflict("superseded by a newer date request"));
    }

    let records = fetched.map_err(|err| {
        error!("error loading data: {err}");
        AppError::from(err)
    })?;

    let view = {
        let store = state.store.lock().await;
        build_view(&**store, ticket.date, &records)
    };

    info!(
        date = %view.date,
        found = view.devotional.is_some(),
        "devotional loaded"
    );
    if view.devotional.is_some() {
        state
            .analytics
            .report(ticket.date, AnalyticsAction::Viewed, device(headers));
    }

    Ok(view)
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    parse_canonical(raw)
        .ok_or_else(|| AppError::bad_request(format!("'{raw}' is not a YYYY-MM-DD date")))
}

fn device(headers: &HeaderMap) -> Device {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    classify_device(user_agent)
}
