pub mod tickets;

pub mod prelude;
