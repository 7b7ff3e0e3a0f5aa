//! Status enums for orders, RSVPs, and competitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order fulfilment status.
///
/// A flat set: any status may transition to any other. The admin service
/// is the only writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// A user's RSVP to a community event.
///
/// At most one RSVP exists per (event, user); the status is mutated in
/// place when the user changes their mind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Attending,
    Interested,
    NotAttending,
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Attending => "attending",
            Self::Interested => "interested",
            Self::NotAttending => "not_attending",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attending" => Ok(Self::Attending),
            "interested" => Ok(Self::Interested),
            "not_attending" => Ok(Self::NotAttending),
            _ => Err(format!("invalid RSVP status: {s}")),
        }
    }
}

/// Derived lifecycle phase of a competition.
///
/// Never stored; always computed from the competition's window and active
/// flag via [`competition_phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionPhase {
    Upcoming,
    Active,
    Ended,
}

/// Compute a competition's phase at `now`.
///
/// - `Upcoming` iff `now < start`
/// - `Active` iff `start <= now <= end` and the competition is active
///   (both window boundaries count as inside)
/// - `Ended` otherwise (past the window, or deactivated mid-window)
#[must_use]
pub fn competition_phase(
    now: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    is_active: bool,
) -> CompetitionPhase {
    if now < start {
        CompetitionPhase::Upcoming
    } else if now <= end && is_active {
        CompetitionPhase::Active
    } else {
        CompetitionPhase::Ended
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_phase_before_window_is_upcoming() {
        assert_eq!(
            competition_phase(at(1), at(10), at(20), true),
            CompetitionPhase::Upcoming
        );
        // Inactive competitions are still "upcoming" before the window
        assert_eq!(
            competition_phase(at(1), at(10), at(20), false),
            CompetitionPhase::Upcoming
        );
    }

    #[test]
    fn test_phase_within_window() {
        assert_eq!(
            competition_phase(at(15), at(10), at(20), true),
            CompetitionPhase::Active
        );
        // Deactivated mid-window reads as ended
        assert_eq!(
            competition_phase(at(15), at(10), at(20), false),
            CompetitionPhase::Ended
        );
    }

    #[test]
    fn test_phase_window_boundaries_are_inside() {
        assert_eq!(
            competition_phase(at(10), at(10), at(20), true),
            CompetitionPhase::Active
        );
        assert_eq!(
            competition_phase(at(20), at(10), at(20), true),
            CompetitionPhase::Active
        );
    }

    #[test]
    fn test_phase_after_window_is_ended() {
        assert_eq!(
            competition_phase(at(21), at(10), at(20), true),
            CompetitionPhase::Ended
        );
    }

    #[test]
    fn test_order_status_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("express".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_rsvp_status_roundtrip() {
        for status in [
            RsvpStatus::Attending,
            RsvpStatus::Interested,
            RsvpStatus::NotAttending,
        ] {
            assert_eq!(status.to_string().parse::<RsvpStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_order_status_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
    }
}
