pub mod locations;
pub mod map;
pub mod preferences;
pub mod routes;
pub mod session;
