//! Domain types shared by the services and the HTTP surface.
//!
//! Accounts carry a [`Role`] tag instead of living in separate admin and user
//! tables, so a username resolves to exactly one identity.

pub mod schedule;
pub mod validation;

pub use validation::{ValidationError, ValidationReason};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::delivery::EXPECTED_DELIVERY_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(UnknownVariant {
                kind: "role",
                value: other.to_string(),
            }),
        }
    }
}

/// An authenticated account as stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Order lifecycle. `Cancelled` and `Delivered` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Cancelled,
    Delivered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Order is already cancelled")]
    AlreadyCancelled,

    #[error("Cannot cancel an order that has already been delivered")]
    AlreadyDelivered,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
            Self::Delivered => "delivered",
        }
    }

    /// Returns the status an order moves to when cancelled.
    pub const fn cancel(self) -> Result<Self, TransitionError> {
        match self {
            Self::Pending => Ok(Self::Cancelled),
            Self::Cancelled => Err(TransitionError::AlreadyCancelled),
            Self::Delivered => Err(TransitionError::AlreadyDelivered),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "cancelled" => Ok(Self::Cancelled),
            "delivered" => Ok(Self::Delivered),
            other => Err(UnknownVariant {
                kind: "order status",
                value: other.to_string(),
            }),
        }
    }
}

/// Delivery estimate shown on bookings and orders. Never stored.
#[must_use]
pub fn expected_delivery(created_at: DateTime<Utc>) -> NaiveDate {
    (created_at + Duration::days(EXPECTED_DELIVERY_DAYS)).date_naive()
}
