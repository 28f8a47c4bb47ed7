use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, weekday_serde};
use crate::membership::ServiceSelection;
use crate::{CoreError, CoreResult};

/// First id handed out when the registry is empty
pub const FIRST_CLIENT_ID: u64 = 101;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Training slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Evening,
}

impl Slot {
    pub fn display_name(&self) -> &'static str {
        match self {
            Slot::Morning => "Morning",
            Slot::Evening => "Evening",
        }
    }
}

/// A registered gym member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub client_id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub dob: NaiveDate,
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub occupation: String,
    pub slot: Slot,
    pub membership: ServiceSelection,
    pub membership_period: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "weekday_serde")]
    pub registration_day: Weekday,
    pub terms_accepted: bool,
    /// Settled total after the offer chosen at checkout
    pub final_amount: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-service registration form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub occupation: String,
    pub slot: Slot,
    pub membership: ServiceSelection,
    pub membership_period: u32,
    /// Defaults to the registration date
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub terms_accepted: bool,
}

impl RegistrationRequest {
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationError("name is required".to_string()));
        }
        if self.mobile.trim().is_empty() {
            return Err(CoreError::ValidationError("mobile is required".to_string()));
        }
        validate_email(&self.email)?;
        validate_membership(&self.membership, self.membership_period)?;
        if !self.terms_accepted {
            return Err(CoreError::ValidationError("terms must be accepted".to_string()));
        }
        Ok(())
    }
}

/// Rejects empty selections and zero-month periods before they reach pricing.
pub fn validate_membership(membership: &ServiceSelection, months: u32) -> CoreResult<()> {
    if membership.is_empty() {
        return Err(CoreError::ValidationError(
            "at least one service must be selected".to_string(),
        ));
    }
    if months == 0 {
        return Err(CoreError::ValidationError(
            "membership period must be at least one month".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> CoreResult<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CoreError::ValidationError(format!("invalid email: {}", email))),
    }
}

/// Next sequential client id: last + 1, or 101 for the first client.
pub fn next_client_id(last: Option<&str>) -> CoreResult<String> {
    match last {
        None => Ok(FIRST_CLIENT_ID.to_string()),
        Some(id) => id
            .trim()
            .parse::<u64>()
            .map(|n| (n + 1).to_string())
            .map_err(|_| CoreError::InternalError(format!("corrupt client id in registry: {}", id))),
    }
}

impl Client {
    /// Build a client from a validated registration. `now` is the creation
    /// instant; `offset` is the gym's local timezone.
    pub fn register(
        client_id: String,
        request: RegistrationRequest,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> CoreResult<Self> {
        request.validate()?;

        let today = now.with_timezone(&offset).date_naive();
        let start_date = request.start_date.unwrap_or(today);
        let end_date = calendar::end_date(start_date, request.membership_period)?;

        Ok(Self {
            client_id,
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            mobile: request.mobile.trim().to_string(),
            dob: request.dob,
            age: calendar::age_on(request.dob, today),
            gender: request.gender,
            address: request.address,
            occupation: request.occupation,
            slot: request.slot,
            membership: request.membership,
            membership_period: request.membership_period,
            start_date,
            end_date,
            registration_day: today.weekday(),
            terms_accepted: request.terms_accepted,
            final_amount: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Local calendar date the client registered on; drives the day offer.
    pub fn registration_date(&self, offset: FixedOffset) -> NaiveDate {
        self.created_at.with_timezone(&offset).date_naive()
    }

    /// Case-insensitive on name and email, substring on id and mobile.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lower = term.to_lowercase();
        self.name.to_lowercase().contains(&lower)
            || self.email.to_lowercase().contains(&lower)
            || self.client_id.contains(term)
            || self.mobile.contains(term)
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Admin edit; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub occupation: Option<String>,
    pub slot: Option<Slot>,
    pub membership: Option<ServiceSelection>,
    pub membership_period: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub final_amount: Option<i64>,
}

impl ClientUpdate {
    pub fn apply(self, client: &mut Client, now: DateTime<Utc>, offset: FixedOffset) -> CoreResult<()> {
        let membership = self.membership.unwrap_or(client.membership);
        let period = self.membership_period.unwrap_or(client.membership_period);
        validate_membership(&membership, period)?;
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CoreError::ValidationError("name is required".to_string()));
        }
        if self.mobile.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(CoreError::ValidationError("mobile is required".to_string()));
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(amount) = self.final_amount {
            if amount < 0 {
                return Err(CoreError::ValidationError("final amount cannot be negative".to_string()));
            }
        }

        let schedule_changed = self.start_date.is_some() || self.membership_period.is_some();

        if let Some(name) = self.name {
            client.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            client.email = email.trim().to_string();
        }
        if let Some(mobile) = self.mobile {
            client.mobile = mobile.trim().to_string();
        }
        if let Some(dob) = self.dob {
            client.dob = dob;
            client.age = calendar::age_on(dob, now.with_timezone(&offset).date_naive());
        }
        if let Some(gender) = self.gender {
            client.gender = gender;
        }
        if let Some(address) = self.address {
            client.address = address;
        }
        if let Some(occupation) = self.occupation {
            client.occupation = occupation;
        }
        if let Some(slot) = self.slot {
            client.slot = slot;
        }
        client.membership = membership;
        client.membership_period = period;
        if let Some(start) = self.start_date {
            client.start_date = start;
        }
        match self.end_date {
            Some(end) => client.end_date = end,
            None if schedule_changed => {
                client.end_date = calendar::end_date(client.start_date, client.membership_period)?;
            }
            None => {}
        }
        if let Some(amount) = self.final_amount {
            client.final_amount = Some(amount);
        }
        client.updated_at = now;
        Ok(())
    }
}
