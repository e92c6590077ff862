//! # booking-engine
//!
//! Booking-request validation and availability slots for coworking-space clients.
//!
//! The engine decides whether a prospective booking may be submitted to the
//! space-management API, and which slots of a day are still free for a resource.
//! It performs no network I/O: resources come in through a [`ResourceLookup`]
//! and existing bookings are passed in already fetched.
//!
//! ## Quick start
//!
//! ```rust
//! use booking_engine::{
//!     BookingCandidate, BookingTarget, BookingValidator, Resource, ResourceCatalog, ResourceType,
//! };
//!
//! let catalog = ResourceCatalog::new([Resource::new("lgc", "LGC", ResourceType::MeetingRoom)]);
//! let candidate = BookingCandidate::new(
//!     "lgc",
//!     "2026-03-17T10:00:00+00:00".parse().unwrap(),
//!     "2026-03-17T11:00:00+00:00".parse().unwrap(),
//!     BookingTarget::Member("m-1".to_string()),
//!     "Weekly sync",
//! );
//! let now = "2026-03-16T08:00:00Z".parse().unwrap();
//!
//! let request = BookingValidator::default()
//!     .validate_at(&candidate, &catalog, now)
//!     .unwrap();
//! assert_eq!(request.resource_name(), "LGC");
//! ```
//!
//! ## Modules
//!
//! - [`validator`] — ordered, fail-fast booking rules
//! - [`slots`] — free "HH:MM" slots for a day
//! - [`candidate`] — booking candidates and submit-ready requests
//! - [`resource`] — resources and the lookup capability
//! - [`policy`] — rule parameters
//! - [`booking`] — booking records as the API returns them
//! - [`recurrence`] — RRULE expansion into occurrences
//! - [`occurrence`] — concrete booking instances
//! - [`member`] — create-member request checks
//! - [`query`] — resource-listing query strings
//! - [`error`] — Error types

pub mod booking;
pub mod candidate;
pub mod error;
pub mod member;
pub mod occurrence;
pub mod policy;
pub mod query;
pub mod recurrence;
pub mod resource;
pub mod slots;
pub mod validator;

pub use booking::{occurrences_from_bookings, Booking};
pub use candidate::{BookingCandidate, BookingTarget, ValidatedBookingRequest};
pub use error::{BookingError, LookupError, MemberError, ValidationFailure, ValidationRule};
pub use member::MemberRequest;
pub use occurrence::BookingOccurrence;
pub use policy::BookingPolicy;
pub use query::{ResourceParam, ResourceQuery};
pub use recurrence::{
    expand_recurrence, expand_recurrence_between, expand_recurrence_with_exdates,
    DEFAULT_EXPANSION_LIMIT,
};
pub use resource::{Resource, ResourceCatalog, ResourceLookup, ResourceType};
pub use slots::{compute_available_slots, compute_available_slots_from_iso, SlotWindow, TimeSlot};
pub use validator::{validate_booking, BookingValidator};
