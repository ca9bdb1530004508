use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, MedtrackService, Result};
use medtrack_domain::Role;
use medtrack_storage::{models::User, queries};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileRequest {
	pub email: String,
	pub name: String,
	pub role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
	pub user_id: Uuid,
	pub email: String,
	pub name: String,
	pub role: Role,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl TryFrom<User> for ProfileResponse {
	type Error = Error;

	fn try_from(user: User) -> Result<Self> {
		let role = Role::parse(&user.role).ok_or_else(|| Error::Storage {
			message: format!("Unknown role {:?} stored for user.", user.role),
		})?;

		Ok(Self {
			user_id: user.user_id,
			email: user.email,
			name: user.name,
			role,
			created_at: user.created_at,
			updated_at: user.updated_at,
		})
	}
}

impl MedtrackService {
	pub async fn get_profile(&self, user_id: Uuid) -> Result<ProfileResponse> {
		let user = queries::get_user(&self.db, user_id)
			.await?
			.ok_or_else(|| Error::not_found("User profile not found."))?;

		user.try_into()
	}

	/// Creates or replaces the caller's profile. `created_at` is kept on replace.
	pub async fn upsert_profile(
		&self,
		user_id: Uuid,
		req: ProfileRequest,
	) -> Result<ProfileResponse> {
		let email = req.email.trim();
		let name = req.name.trim();

		if email.is_empty() || name.is_empty() {
			return Err(Error::invalid("email and name are required."));
		}
		if !is_plausible_email(email) {
			return Err(Error::invalid("email is not a valid address."));
		}

		let role = Role::parse(&req.role)
			.ok_or_else(|| Error::invalid("role must be one of patient or caretaker."))?;
		let now = OffsetDateTime::now_utc();
		let user = User {
			user_id,
			email: email.to_string(),
			name: name.to_string(),
			role: role.as_str().to_string(),
			created_at: now,
			updated_at: now,
		};
		let saved = queries::upsert_user(&self.db, &user).await.map_err(|err| match err {
			medtrack_storage::Error::Conflict(_) =>
				Error::Conflict { message: "Email already registered.".to_string() },
			other => other.into(),
		})?;

		tracing::info!(%user_id, role = role.as_str(), "Profile saved.");

		saved.try_into()
	}
}

fn is_plausible_email(email: &str) -> bool {
	match email.split_once('@') {
		Some((local, domain)) =>
			!local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace),
		None => false,
	}
}
