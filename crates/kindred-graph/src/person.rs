//! The validated [`Person`] value.
//!
//! A `Person` can only be obtained through validation, and it never changes
//! afterwards. Edits go through [`Person::with_update`], which returns a new,
//! re-validated value and leaves the original untouched.

use chrono::NaiveDate;

use kindred_types::{Gender, PersonId, PersonRecord};

use crate::error::GenealogyError;

/// Maximum length of a person's name, in characters, after trimming.
pub const MAX_NAME_CHARS: usize = 255;

/// A validated person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    name: String,
    gender: Gender,
    birth_date: Option<NaiveDate>,
    birth_place: Option<String>,
    death_date: Option<NaiveDate>,
}

/// Field changes applied by [`Person::with_update`].
///
/// `None` keeps the current value. For optional fields, `Some(None)` clears
/// the value and `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New gender.
    pub gender: Option<Gender>,
    /// New birth date, or `Some(None)` to clear it.
    pub birth_date: Option<Option<NaiveDate>>,
    /// New birth place, or `Some(None)` to clear it.
    pub birth_place: Option<Option<String>>,
    /// New death date, or `Some(None)` to clear it.
    pub death_date: Option<Option<NaiveDate>>,
}

impl PersonUpdate {
    /// Update that replaces every field with the values in `record`.
    ///
    /// The record's `person_id` is ignored; identity never changes.
    pub fn replace_all(record: PersonRecord) -> Self {
        Self {
            name: Some(record.name),
            gender: Some(record.gender),
            birth_date: Some(record.birth_date),
            birth_place: Some(record.birth_place),
            death_date: Some(record.death_date),
        }
    }

    /// Whether this update touches the birth date.
    pub const fn changes_birth_date(&self) -> bool {
        self.birth_date.is_some()
    }
}

impl Person {
    /// Validate a record and build a person from it.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::InvariantViolation`] if the trimmed name is
    /// empty or longer than [`MAX_NAME_CHARS`], or if the death date is
    /// earlier than the birth date.
    pub fn new(record: PersonRecord) -> Result<Self, GenealogyError> {
        let name = normalize_name(&record.name)?;
        let birth_place = record
            .birth_place
            .map(|place| place.trim().to_owned())
            .filter(|place| !place.is_empty());

        if let (Some(birth), Some(death)) = (record.birth_date, record.death_date)
            && death < birth
        {
            return Err(GenealogyError::InvariantViolation(format!(
                "death date {death} precedes birth date {birth} for person {}",
                record.person_id
            )));
        }

        Ok(Self {
            id: record.person_id,
            name,
            gender: record.gender,
            birth_date: record.birth_date,
            birth_place,
            death_date: record.death_date,
        })
    }

    /// Return a new person with `update` applied, re-validating all fields.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Person::new`].
    pub fn with_update(&self, update: PersonUpdate) -> Result<Self, GenealogyError> {
        let record = PersonRecord {
            person_id: self.id.clone(),
            name: update.name.unwrap_or_else(|| self.name.clone()),
            gender: update.gender.unwrap_or(self.gender),
            birth_date: update.birth_date.unwrap_or(self.birth_date),
            birth_place: update
                .birth_place
                .unwrap_or_else(|| self.birth_place.clone()),
            death_date: update.death_date.unwrap_or(self.death_date),
        };
        Self::new(record)
    }

    /// The person's identifier.
    pub const fn id(&self) -> &PersonId {
        &self.id
    }

    /// The trimmed display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recorded gender.
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Birth date, if known.
    pub const fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// Birth place, if known.
    pub fn birth_place(&self) -> Option<&str> {
        self.birth_place.as_deref()
    }

    /// Death date, if known.
    pub const fn death_date(&self) -> Option<NaiveDate> {
        self.death_date
    }

    /// Flatten into a storable record.
    pub fn to_record(&self) -> PersonRecord {
        PersonRecord {
            person_id: self.id.clone(),
            name: self.name.clone(),
            gender: self.gender,
            birth_date: self.birth_date,
            birth_place: self.birth_place.clone(),
            death_date: self.death_date,
        }
    }
}

impl TryFrom<PersonRecord> for Person {
    type Error = GenealogyError;

    fn try_from(record: PersonRecord) -> Result<Self, Self::Error> {
        Self::new(record)
    }
}

fn normalize_name(raw: &str) -> Result<String, GenealogyError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(GenealogyError::InvariantViolation(String::from(
            "name must not be empty",
        )));
    }
    let length = name.chars().count();
    if length > MAX_NAME_CHARS {
        return Err(GenealogyError::InvariantViolation(format!(
            "name is {length} characters, limit is {MAX_NAME_CHARS}"
        )));
    }
    Ok(name.to_owned())
}
