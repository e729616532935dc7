pub mod houses;
pub mod ledger;
pub mod rents;
pub mod tenants;
pub mod users;
