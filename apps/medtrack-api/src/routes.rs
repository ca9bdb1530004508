use axum::{
	Json, Router,
	extract::{FromRequest, FromRequestParts, Path, Query, Request, State},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
	response::{IntoResponse, Response},
	routing::{get, put},
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::state::AppState;
use medtrack_service::{
	AdherenceRequest, CalendarDayRequest, CalendarDayResponse, CalendarMonthRequest,
	CreateLogRequest, DashboardStats, DayStatusItem, DeleteMedicationResponse, Error, LogItem,
	LogListRequest, MedicationItem, MedicationRequest, ProfileRequest, ProfileResponse,
	WeeklyAdherencePoint,
};

pub const HEADER_USER_ID: &str = "X-Medtrack-User-Id";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/profile", get(get_profile).put(upsert_profile))
		.route("/api/medications", get(list_medications).post(create_medication))
		.route("/api/medications/{medication_id}", put(update_medication).delete(delete_medication))
		.route("/api/medication-logs", get(list_logs).post(create_log))
		.route("/api/dashboard/stats", get(dashboard_stats))
		.route("/api/dashboard/weekly-adherence", get(weekly_adherence))
		.route("/api/calendar/day", get(calendar_day))
		.route("/api/calendar/month", get(calendar_month))
		.with_state(state)
}

/// The caller on whose behalf a request runs.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
	pub user_id: Uuid,
}
impl FromRequestParts<AppState> for RequestContext {
	type Rejection = ApiError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		if let Some(expected) = state.service.cfg.security.api_auth_token.as_deref()
			&& read_bearer_token(&parts.headers) != Some(expected)
		{
			return Err(json_error(
				StatusCode::UNAUTHORIZED,
				"unauthorized",
				"A valid Bearer token is required.",
				None,
			));
		}

		let user_id = read_user_id(&parts.headers).ok_or_else(|| {
			json_error(
				StatusCode::UNAUTHORIZED,
				"unauthorized",
				format!("{HEADER_USER_ID} must carry a user id."),
				Some(vec![HEADER_USER_ID.to_string()]),
			)
		})?;

		Ok(Self { user_id })
	}
}

/// `Json` whose rejection is an `invalid_request` error body.
pub struct ApiJson<T>(pub T);
impl<S, T> FromRequest<S> for ApiJson<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = ApiError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let Json(value) = Json::<T>::from_request(req, state)
			.await
			.map_err(|rejection| invalid_input(rejection.body_text()))?;

		Ok(Self(value))
	}
}

/// `Query` whose rejection is an `invalid_request` error body.
pub struct ApiQuery<T>(pub T);
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let Query(value) = Query::<T>::from_request_parts(parts, state)
			.await
			.map_err(|rejection| invalid_input(rejection.body_text()))?;

		Ok(Self(value))
	}
}

/// `Path` whose rejection is an `invalid_request` error body.
pub struct ApiPath<T>(pub T);
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
	S: Send + Sync,
	T: DeserializeOwned + Send,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let Path(value) = Path::<T>::from_request_parts(parts, state)
			.await
			.map_err(|rejection| invalid_input(rejection.body_text()))?;

		Ok(Self(value))
	}
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn get_profile(
	State(state): State<AppState>,
	ctx: RequestContext,
) -> Result<Json<ProfileResponse>, ApiError> {
	let response = state.service.get_profile(ctx.user_id).await?;

	Ok(Json(response))
}

async fn upsert_profile(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiJson(payload): ApiJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
	let response = state.service.upsert_profile(ctx.user_id, payload).await?;

	Ok(Json(response))
}

async fn list_medications(
	State(state): State<AppState>,
	ctx: RequestContext,
) -> Result<Json<Vec<MedicationItem>>, ApiError> {
	let response = state.service.list_medications(ctx.user_id).await?;

	Ok(Json(response))
}

async fn create_medication(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiJson(payload): ApiJson<MedicationRequest>,
) -> Result<(StatusCode, Json<MedicationItem>), ApiError> {
	let response = state.service.create_medication(ctx.user_id, payload).await?;

	Ok((StatusCode::CREATED, Json(response)))
}

async fn update_medication(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiPath(medication_id): ApiPath<Uuid>,
	ApiJson(payload): ApiJson<MedicationRequest>,
) -> Result<Json<MedicationItem>, ApiError> {
	let response = state.service.update_medication(ctx.user_id, medication_id, payload).await?;

	Ok(Json(response))
}

async fn delete_medication(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiPath(medication_id): ApiPath<Uuid>,
) -> Result<Json<DeleteMedicationResponse>, ApiError> {
	let response = state.service.delete_medication(ctx.user_id, medication_id).await?;

	Ok(Json(response))
}

async fn list_logs(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiQuery(query): ApiQuery<LogListRequest>,
) -> Result<Json<Vec<LogItem>>, ApiError> {
	let response = state.service.list_logs(ctx.user_id, query).await?;

	Ok(Json(response))
}

async fn create_log(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiJson(payload): ApiJson<CreateLogRequest>,
) -> Result<(StatusCode, Json<LogItem>), ApiError> {
	let response = state.service.create_log(ctx.user_id, payload).await?;

	Ok((StatusCode::CREATED, Json(response)))
}

async fn dashboard_stats(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiQuery(query): ApiQuery<AdherenceRequest>,
) -> Result<Json<DashboardStats>, ApiError> {
	let response = state.service.dashboard_stats(ctx.user_id, query).await?;

	Ok(Json(response))
}

async fn weekly_adherence(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiQuery(query): ApiQuery<AdherenceRequest>,
) -> Result<Json<Vec<WeeklyAdherencePoint>>, ApiError> {
	let response = state.service.weekly_adherence(ctx.user_id, query).await?;

	Ok(Json(response))
}

async fn calendar_day(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiQuery(query): ApiQuery<CalendarDayRequest>,
) -> Result<Json<CalendarDayResponse>, ApiError> {
	let response = state.service.calendar_day(ctx.user_id, query).await?;

	Ok(Json(response))
}

async fn calendar_month(
	State(state): State<AppState>,
	ctx: RequestContext,
	ApiQuery(query): ApiQuery<CalendarMonthRequest>,
) -> Result<Json<Vec<DayStatusItem>>, ApiError> {
	let response = state.service.calendar_month(ctx.user_id, query).await?;

	Ok(Json(response))
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}

fn read_user_id(headers: &HeaderMap) -> Option<Uuid> {
	let raw = headers.get(HEADER_USER_ID)?.to_str().ok()?;

	Uuid::parse_str(raw.trim()).ok()
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			Error::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "not_found", message, None),
			Error::Conflict { message } =>
				json_error(StatusCode::CONFLICT, "conflict", message, None),
			Error::LogFetch { message } => json_error(
				StatusCode::SERVICE_UNAVAILABLE,
				"log_store_unavailable",
				format!("Medication logs could not be loaded: {message}"),
				None,
			),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Request failed with a storage error.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Internal storage error.",
					None,
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

fn invalid_input(message: String) -> ApiError {
	json_error(StatusCode::BAD_REQUEST, "invalid_request", message, None)
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
