use actix_web::{web, HttpResponse};
use auth_core::{AccessClaims, AppError, ErrorCode, Role, RolePolicy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::patients;
use crate::services::patients as service;
use crate::state::{require_db, AppState};

// Per-operation role policies. Declared next to the handlers so a new
// operation cannot be wired up without stating who may call it.
const CREATE_PATIENT: RolePolicy = RolePolicy::allow(&[Role::Receptionist]);
const READ_PATIENT: RolePolicy = RolePolicy::allow(&[Role::Doctor, Role::Receptionist]);
const LIST_PATIENTS: RolePolicy = RolePolicy::allow(&[Role::Doctor, Role::Receptionist]);
const UPDATE_PATIENT: RolePolicy = RolePolicy::allow(&[Role::Doctor, Role::Receptionist]);
const DELETE_PATIENT: RolePolicy = RolePolicy::allow(&[Role::Receptionist]);

#[derive(Debug, Deserialize)]
pub struct CreatePatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePatientRequest {
    pub patient_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PatientIdQuery {
    pub patient_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PatientResponse {
    pub patient_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<patients::Model> for PatientResponse {
    fn from(model: patients::Model) -> Self {
        Self {
            patient_id: model.patient_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn create_patient(
    claims: AccessClaims,
    req: web::Json<CreatePatientRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    CREATE_PATIENT.require(&claims)?;

    let req = req.into_inner();
    require_non_empty("first_name", &req.first_name)?;
    require_non_empty("last_name", &req.last_name)?;
    require_non_empty("email", &req.email)?;

    let db = require_db(&app_state)?;
    service::create_patient(db, req.first_name, req.last_name, req.email).await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "Patient created successfully",
    }))
}

async fn get_patient(
    claims: AccessClaims,
    query: web::Query<PatientIdQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    READ_PATIENT.require(&claims)?;

    let db = require_db(&app_state)?;
    let patient = service::get_patient(db, query.patient_id).await?;

    Ok(HttpResponse::Ok().json(PatientResponse::from(patient)))
}

async fn list_patients(
    claims: AccessClaims,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    LIST_PATIENTS.require(&claims)?;

    let db = require_db(&app_state)?;
    let patients: Vec<PatientResponse> = service::list_patients(db)
        .await?
        .into_iter()
        .map(PatientResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(patients))
}

async fn update_patient(
    claims: AccessClaims,
    req: web::Json<UpdatePatientRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    UPDATE_PATIENT.require(&claims)?;

    let req = req.into_inner();
    require_non_empty("first_name", &req.first_name)?;
    require_non_empty("last_name", &req.last_name)?;
    require_non_empty("email", &req.email)?;

    let db = require_db(&app_state)?;
    service::update_patient(db, req.patient_id, req.first_name, req.last_name, req.email)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Patient updated successfully",
    }))
}

async fn delete_patient(
    claims: AccessClaims,
    query: web::Query<PatientIdQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    DELETE_PATIENT.require(&claims)?;

    let db = require_db(&app_state)?;
    service::remove_patient(db, query.patient_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Patient deleted successfully",
    }))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            format!("{field} cannot be empty"),
        ));
    }
    Ok(())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/patient")
            .route(web::post().to(create_patient))
            .route(web::get().to(get_patient))
            .route(web::put().to(update_patient))
            .route(web::delete().to(delete_patient)),
    );
    cfg.route("/patient/all", web::get().to(list_patients));
}
