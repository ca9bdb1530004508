use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{Error, MedtrackService, Result};
use medtrack_storage::{models::Medication, queries};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MedicationRequest {
	pub name: String,
	pub dosage: String,
	pub frequency: String,
	#[serde(default)]
	pub instructions: Option<String>,
	#[serde(with = "crate::time_serde::date")]
	pub start_date: Date,
	#[serde(default, with = "crate::time_serde::date::option")]
	pub end_date: Option<Date>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MedicationItem {
	pub medication_id: Uuid,
	pub name: String,
	pub dosage: String,
	pub frequency: String,
	pub instructions: Option<String>,
	#[serde(with = "crate::time_serde::date")]
	pub start_date: Date,
	#[serde(with = "crate::time_serde::date::option")]
	pub end_date: Option<Date>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl From<Medication> for MedicationItem {
	fn from(medication: Medication) -> Self {
		Self {
			medication_id: medication.medication_id,
			name: medication.name,
			dosage: medication.dosage,
			frequency: medication.frequency,
			instructions: medication.instructions,
			start_date: medication.start_date,
			end_date: medication.end_date,
			created_at: medication.created_at,
			updated_at: medication.updated_at,
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteMedicationResponse {
	pub medication_id: Uuid,
	pub message: String,
}

struct ValidMedication {
	name: String,
	dosage: String,
	frequency: String,
	instructions: Option<String>,
	start_date: Date,
	end_date: Option<Date>,
}

impl MedtrackService {
	/// Newest first.
	pub async fn list_medications(&self, user_id: Uuid) -> Result<Vec<MedicationItem>> {
		let rows = queries::list_medications(&self.db, user_id).await?;

		Ok(rows.into_iter().map(MedicationItem::from).collect())
	}

	pub async fn create_medication(
		&self,
		user_id: Uuid,
		req: MedicationRequest,
	) -> Result<MedicationItem> {
		let valid = validate(req)?;

		self.require_profile(user_id).await?;

		let now = OffsetDateTime::now_utc();
		let medication = Medication {
			medication_id: Uuid::new_v4(),
			user_id,
			name: valid.name,
			dosage: valid.dosage,
			frequency: valid.frequency,
			instructions: valid.instructions,
			start_date: valid.start_date,
			end_date: valid.end_date,
			created_at: now,
			updated_at: now,
		};
		let saved = queries::insert_medication(&self.db, &medication).await?;

		tracing::info!(%user_id, medication_id = %saved.medication_id, "Medication created.");

		Ok(saved.into())
	}

	pub async fn update_medication(
		&self,
		user_id: Uuid,
		medication_id: Uuid,
		req: MedicationRequest,
	) -> Result<MedicationItem> {
		let valid = validate(req)?;
		let now = OffsetDateTime::now_utc();
		let medication = Medication {
			medication_id,
			user_id,
			name: valid.name,
			dosage: valid.dosage,
			frequency: valid.frequency,
			instructions: valid.instructions,
			start_date: valid.start_date,
			end_date: valid.end_date,
			created_at: now,
			updated_at: now,
		};
		let saved = queries::update_medication(&self.db, &medication)
			.await?
			.ok_or_else(|| Error::not_found("Medication not found."))?;

		tracing::info!(%user_id, %medication_id, "Medication updated.");

		Ok(saved.into())
	}

	/// Removes the medication. Its intake logs are kept.
	pub async fn delete_medication(
		&self,
		user_id: Uuid,
		medication_id: Uuid,
	) -> Result<DeleteMedicationResponse> {
		if !queries::delete_medication(&self.db, user_id, medication_id).await? {
			return Err(Error::not_found("Medication not found."));
		}

		tracing::info!(%user_id, %medication_id, "Medication deleted.");

		Ok(DeleteMedicationResponse {
			medication_id,
			message: "Medication deleted successfully.".to_string(),
		})
	}
}

fn validate(req: MedicationRequest) -> Result<ValidMedication> {
	let name = req.name.trim();
	let dosage = req.dosage.trim();
	let frequency = req.frequency.trim();

	if name.is_empty() || dosage.is_empty() || frequency.is_empty() {
		return Err(Error::invalid("name, dosage, and frequency are required."));
	}
	if let Some(end_date) = req.end_date
		&& end_date < req.start_date
	{
		return Err(Error::invalid("end_date must not be before start_date."));
	}

	Ok(ValidMedication {
		name: name.to_string(),
		dosage: dosage.to_string(),
		frequency: frequency.to_string(),
		instructions: req
			.instructions
			.map(|text| text.trim().to_string())
			.filter(|text| !text.is_empty()),
		start_date: req.start_date,
		end_date: req.end_date,
	})
}
