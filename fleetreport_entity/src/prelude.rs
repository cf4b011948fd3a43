pub use super::device::Entity as Device;
pub use super::device::ProductType;
