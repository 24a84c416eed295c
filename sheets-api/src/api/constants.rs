//! Google Sheets API constants

/// Default base URL of the Sheets v4 REST API
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// OAuth scope granting read/write access to spreadsheets
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Grant type for the service-account JWT bearer flow
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Token endpoint used when the key file does not name one
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime requested for each signed assertion (Google caps this at one hour)
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh tokens this many seconds before they actually expire
pub const TOKEN_EXPIRY_SKEW_SECS: i64 = 60;

/// Values are written exactly as given, no formula or date parsing
pub const VALUE_INPUT_OPTION: &str = "RAW";

/// Appends insert new rows instead of overwriting cells below the table
pub const INSERT_DATA_OPTION: &str = "INSERT_ROWS";
