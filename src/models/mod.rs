//! Data transfer objects exchanged with the backend services, plus the
//! small amount of pure logic the views derive from them.

/// Organization branches
pub mod branch;
/// Currency settings
pub mod currency;
/// Fee and commission schedules
pub mod fees;
/// Document uploads and checklist
pub mod files;
/// Query-filter vocabularies
pub mod filters;
/// Fixed-point amount parsing
pub mod money;
/// Organization profiles
pub mod org;
/// List paging
pub mod pagination;
/// Partner catalog and service requests
pub mod partner;
/// Revenue-sharing rules
pub mod revenue;
/// Transaction history rows
pub mod transaction;
/// Users, roles and API credentials
pub mod user;
