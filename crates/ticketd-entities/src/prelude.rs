pub use super::tickets::Entity as Tickets;
