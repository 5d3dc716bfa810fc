pub use super::barcodes::Entity as Barcodes;
pub use super::foodstuffs::Entity as Foodstuffs;
pub use super::locations::Entity as Locations;
pub use super::users::Entity as Users;
