use axum::{
    extract::{Extension, Path},
    Json,
};
use tracing::{debug, info};

use shared_models::auth::User;
use shared_models::context::UserContext;
use shared_models::error::AppError;
use shared_session::CurrentSession;

use crate::models::{
    ContactLink, ContactLinkRequest, InteractionsResponse, PatientError, PatientRecord, QueueEntry,
    RideLink, RideLinkRequest,
};
use crate::services::deep_link::{
    infusion_center, patient_check_in_link, rep_contact_link, rideshare_link, DEFAULT_PICKUP,
};
use crate::services::patient::PatientDirectory;

const DEFAULT_PATIENT_ID: &str = "patient_001";

/// Patient messaging their support representative.
pub async fn contact_rep(session: &CurrentSession, user: &User, phone: &str) -> Result<ContactLink, AppError> {
    if !user.is_patient() {
        return Err(PatientError::WrongRole("patients").into());
    }

    let context = session.0.lock().await.context.clone();
    let link = rep_contact_link(&context, &UserContext::demo_agent(), phone).map_err(PatientError::from)?;

    info!("Messaging link to representative created for {}", user.id);
    Ok(link)
}

/// Agent checking in on a patient from the queue.
pub async fn contact_patient(
    session: &CurrentSession,
    user: &User,
    patient_id: Option<&str>,
    phone: &str,
) -> Result<ContactLink, AppError> {
    if !user.is_agent() {
        return Err(PatientError::WrongRole("agents").into());
    }

    let directory = PatientDirectory::demo();
    let record = directory.record(patient_id.unwrap_or(DEFAULT_PATIENT_ID))?;
    let context = session.0.lock().await.context.clone();

    let link = patient_check_in_link(&context, record.given_name(), &record.therapy, phone)
        .map_err(PatientError::from)?;

    info!("Check-in link for {} created by {}", record.id, user.id);
    Ok(link)
}

pub fn ride_link(request: &RideLinkRequest) -> Result<RideLink, AppError> {
    let destination = infusion_center(request.center_id.as_deref()).map_err(PatientError::from)?;
    let pickup = request.pickup.unwrap_or(DEFAULT_PICKUP);

    Ok(rideshare_link(request.provider, pickup, destination).map_err(PatientError::from)?)
}

#[axum::debug_handler]
pub async fn get_patient(
    Extension(user): Extension<User>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientRecord>, AppError> {
    debug!("{} reading patient {}", user.id, patient_id);

    let directory = PatientDirectory::demo();
    Ok(Json(directory.record_for(&user, &patient_id)?.clone()))
}

#[axum::debug_handler]
pub async fn get_interactions(
    Extension(user): Extension<User>,
    Path(patient_id): Path<String>,
) -> Result<Json<InteractionsResponse>, AppError> {
    let directory = PatientDirectory::demo();
    directory.record_for(&user, &patient_id)?;

    let interactions = directory.interactions(&patient_id)?;
    Ok(Json(InteractionsResponse {
        patient_id,
        total: interactions.len(),
        interactions,
    }))
}

pub async fn get_queue(Extension(user): Extension<User>) -> Result<Json<Vec<QueueEntry>>, AppError> {
    if !user.is_agent() {
        return Err(PatientError::WrongRole("agents").into());
    }
    Ok(Json(PatientDirectory::demo().queue()))
}

#[axum::debug_handler]
pub async fn create_contact_link(
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
    Json(request): Json<ContactLinkRequest>,
) -> Result<Json<ContactLink>, AppError> {
    let link = if user.is_agent() {
        contact_patient(&session, &user, request.patient_id.as_deref(), &request.phone).await?
    } else {
        contact_rep(&session, &user, &request.phone).await?
    };
    Ok(Json(link))
}

pub async fn create_ride_link(
    Extension(user): Extension<User>,
    Json(request): Json<RideLinkRequest>,
) -> Result<Json<RideLink>, AppError> {
    debug!("{} requested a {:?} ride", user.id, request.provider);
    Ok(Json(ride_link(&request)?))
}
