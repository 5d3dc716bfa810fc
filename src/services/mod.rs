pub mod expiration;

pub mod pantry_service;
pub use pantry_service::{
    BatchOutcome, ExpiringItem, ItemUpdate, LocationGroup, MalformedOverride, NewItem,
    PantryEntry, PantryError, PantryService, RefillCandidate, RefillOutcome,
};

pub mod pantry_service_impl;
pub use pantry_service_impl::SeaOrmPantryService;

pub mod auth_service;
pub use auth_service::{AuthError, AuthService, Registration, UserInfo};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod location_service;
pub use location_service::{LocationError, LocationService};

pub mod location_service_impl;
pub use location_service_impl::SeaOrmLocationService;
