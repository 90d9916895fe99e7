use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::Json;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Equipment;
use crate::state::{AppState, ChangedCollection};

// GET /api/equipment
pub async fn get_equipment(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Equipment>>, AppError> {
    let items = {
        let db = state.db.lock().unwrap();
        queries::get_all_equipment(&db)?
    };
    Ok(Json(items))
}

// GET /api/equipment/events — full catalog re-sent on every equipment write
pub async fn equipment_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let snapshot = {
        let state = state.clone();
        move || {
            let db = state.db.lock().unwrap();
            let items = queries::get_all_equipment(&db).unwrap_or_default();
            serde_json::to_string(&items).unwrap_or_default()
        }
    };

    let initial = tokio_stream::once(Ok::<_, Infallible>(
        Event::default().data(snapshot()).event("equipment"),
    ));

    let rx = state.changes_tx.subscribe();
    let live = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(ChangedCollection::Equipment) => {
            Some(Ok(Event::default().data(snapshot()).event("equipment")))
        }
        Ok(_) => None,
        Err(_) => Some(Ok(Event::default().data(snapshot()).event("equipment"))),
    });

    let keepalive = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let merged = StreamExt::merge(initial.chain(live), keepalive);
    Sse::new(merged)
}
