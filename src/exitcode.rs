//! Process exit codes, taken from BSD sysexits.h

/// Bad arguments or an unparseable share link
pub const USAGE: i32 = 64;

/// Input or API response is not valid JSON
pub const DATAERR: i32 = 65;

/// Remote side failed: API status, transport, short link, docs
pub const UNAVAILABLE: i32 = 69;

/// Internal failure such as output serialization
pub const SOFTWARE: i32 = 70;

/// Reading a DSL file or stdin, or building the HTTP client
pub const IOERR: i32 = 74;

/// Token rejected (HTTP 401/403)
pub const NOPERM: i32 = 77;

/// Missing token or broken configuration
pub const CONFIG: i32 = 78;
