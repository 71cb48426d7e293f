//! Single binary web server: REST API over in-memory club events.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, EVENT_TTL_HOURS (inactivity before an event is dropped).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use club_tournament_web::{
    bracket_view, generate_group_stage, generate_single_elimination, group_round_views,
    record_result, round_views, BracketSide, Event, EventError, EventFormat, EventId, GroupId,
    Match, RegistrationId, Slot,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-event entry: event data + last activity time (for auto-cleanup).
struct EventEntry {
    event: Event,
    last_activity: Instant,
}

/// In-memory state: many events by ID. Entries are removed after the inactivity timeout.
type AppState = Data<RwLock<HashMap<EventId, EventEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateEventBody {
    name: String,
    #[serde(default)]
    format: EventFormat,
}

#[derive(Deserialize)]
struct AddRegistrationBody {
    name: String,
    #[serde(default)]
    partner: Option<String>,
}

#[derive(Deserialize)]
struct SeedBody {
    seed: Option<u32>,
}

#[derive(Deserialize)]
struct FormatBody {
    format: EventFormat,
}

#[derive(Deserialize)]
struct LosersStartBody {
    first_round: u32,
}

#[derive(Deserialize)]
struct GenerateGroupsBody {
    group_count: usize,
}

#[derive(Deserialize)]
struct AddMatchBody {
    #[serde(default)]
    registration_1: Option<RegistrationId>,
    #[serde(default)]
    registration_2: Option<RegistrationId>,
    round: u32,
    #[serde(default)]
    match_number: u32,
    #[serde(default)]
    group_id: Option<GroupId>,
    /// "winners" / "losers"; anything else is treated as untagged.
    #[serde(default)]
    bracket: Option<String>,
}

#[derive(Deserialize)]
struct ResultBody {
    winner: Slot,
    #[serde(default)]
    score: Option<String>,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

#[derive(Deserialize)]
struct EventRegistrationPath {
    id: EventId,
    registration_id: Uuid,
}

#[derive(Deserialize)]
struct EventMatchPath {
    id: EventId,
    match_id: Uuid,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" }))
}

fn bad_request(e: EventError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `action` on an event and answer with the updated event (or the error).
fn update_event<F>(state: &AppState, id: EventId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Event) -> Result<(), EventError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.event) {
        Ok(()) => HttpResponse::Ok().json(&entry.event),
        Err(e) => {
            log::debug!("Event {} rejected action: {}", id, e);
            bad_request(e)
        }
    }
}

/// Read an event and answer with a view built from it.
fn view_event<T, F>(state: &AppState, id: EventId, view: F) -> HttpResponse
where
    T: serde::Serialize,
    F: FnOnce(&Event) -> T,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(view(&entry.event))
        }
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "club-tournament-web",
    })
}

/// Create a new event (returns it with id; client keeps the id for later requests).
#[post("/api/events")]
async fn api_create_event(state: AppState, body: Json<CreateEventBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Event name must not be empty" }));
    }
    let event = Event::new(name, body.format);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created event {} ({:?})", event.id, event.format);
    let response = HttpResponse::Ok().json(&event);
    g.insert(
        event.id,
        EventEntry {
            event,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get an event by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/events/{id}")]
async fn api_get_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    view_event(&state, path.id, Event::clone)
}

/// Add a registration (event must be in Setup).
#[post("/api/events/{id}/registrations")]
async fn api_add_registration(
    state: AppState,
    path: Path<EventPath>,
    body: Json<AddRegistrationBody>,
) -> HttpResponse {
    update_event(&state, path.id, |e| {
        e.add_registration(&body.name, body.partner.as_deref()).map(|_| ())
    })
}

/// Remove a registration (event must be in Setup).
#[delete("/api/events/{id}/registrations/{registration_id}")]
async fn api_remove_registration(state: AppState, path: Path<EventRegistrationPath>) -> HttpResponse {
    update_event(&state, path.id, |e| e.remove_registration(path.registration_id))
}

/// Set or clear a registration's seed (event must be in Setup).
#[put("/api/events/{id}/registrations/{registration_id}/seed")]
async fn api_set_seed(
    state: AppState,
    path: Path<EventRegistrationPath>,
    body: Json<SeedBody>,
) -> HttpResponse {
    update_event(&state, path.id, |e| e.set_seed(path.registration_id, body.seed))
}

#[put("/api/events/{id}/format")]
async fn api_set_format(state: AppState, path: Path<EventPath>, body: Json<FormatBody>) -> HttpResponse {
    update_event(&state, path.id, |e| e.set_format(body.format))
}

/// Configure the round number the losers bracket starts at (labeling only).
#[put("/api/events/{id}/losers-start")]
async fn api_set_losers_start(
    state: AppState,
    path: Path<EventPath>,
    body: Json<LosersStartBody>,
) -> HttpResponse {
    update_event(&state, path.id, |e| e.set_losers_start(body.first_round))
}

/// Generate the single-elimination bracket (Setup -> InProgress).
#[post("/api/events/{id}/bracket/generate")]
async fn api_generate_bracket(state: AppState, path: Path<EventPath>) -> HttpResponse {
    update_event(&state, path.id, generate_single_elimination)
}

/// Generate groups and their round-robin matches (Setup -> InProgress).
#[post("/api/events/{id}/groups/generate")]
async fn api_generate_groups(
    state: AppState,
    path: Path<EventPath>,
    body: Json<GenerateGroupsBody>,
) -> HttpResponse {
    update_event(&state, path.id, |e| generate_group_stage(e, body.group_count))
}

/// Add an externally generated match record (e.g. double-elimination brackets).
#[post("/api/events/{id}/matches")]
async fn api_add_match(state: AppState, path: Path<EventPath>, body: Json<AddMatchBody>) -> HttpResponse {
    let body = body.into_inner();
    update_event(&state, path.id, move |e| {
        let mut record = Match::new(body.registration_1, body.registration_2, body.round, body.match_number);
        record.group_id = body.group_id;
        record.bracket = body.bracket.as_deref().and_then(BracketSide::from_tag);
        e.add_match(record).map(|_| ())
    })
}

/// Reset to Setup, keeping registrations.
#[post("/api/events/{id}/reset")]
async fn api_reset_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    update_event(&state, path.id, |e| {
        e.reset();
        Ok(())
    })
}

/// Record the winner of a match; elimination winners advance automatically.
#[put("/api/events/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<EventMatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let body = body.into_inner();
    update_event(&state, path.id, |e| record_result(e, path.match_id, body.winner, body.score))
}

#[get("/api/events/{id}/rounds")]
async fn api_rounds(state: AppState, path: Path<EventPath>) -> HttpResponse {
    view_event(&state, path.id, round_views)
}

#[get("/api/events/{id}/rounds/groups")]
async fn api_group_rounds(state: AppState, path: Path<EventPath>) -> HttpResponse {
    view_event(&state, path.id, group_round_views)
}

#[get("/api/events/{id}/bracket")]
async fn api_bracket(state: AppState, path: Path<EventPath>) -> HttpResponse {
    view_event(&state, path.id, bracket_view)
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let ttl_hours: u64 = std::env::var("EVENT_TTL_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_ttl_hours);
    let inactivity_timeout = Duration::from_secs(ttl_hours * 3600);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<EventId, EventEntry>::new()));

    // Background task: every 30 minutes, remove events inactive past the timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive event(s) (no activity for {}h)", removed, ttl_hours);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_event)
            .service(api_get_event)
            .service(api_add_registration)
            .service(api_remove_registration)
            .service(api_set_seed)
            .service(api_set_format)
            .service(api_set_losers_start)
            .service(api_generate_bracket)
            .service(api_generate_groups)
            .service(api_add_match)
            .service(api_reset_event)
            .service(api_record_result)
            .service(api_rounds)
            .service(api_group_rounds)
            .service(api_bracket)
    })
    .bind(bind)?
    .run()
    .await
}
