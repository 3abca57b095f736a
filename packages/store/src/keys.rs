//! Fixed key names for persisted session state.
//!
//! These match the keys the hosted front-end has always written to browser
//! storage, so an existing browser session survives a client upgrade.

pub const ACCESS_TOKEN: &str = "accessToken";
pub const REFRESH_TOKEN: &str = "refreshToken";
pub const USER_ROLE: &str = "userRole";
pub const USER_ID: &str = "userId";

/// Every key owned by the session. Cleared together on logout or failed restore.
pub const SESSION_KEYS: [&str; 4] = [ACCESS_TOKEN, REFRESH_TOKEN, USER_ROLE, USER_ID];
