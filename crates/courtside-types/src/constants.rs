//! System-wide constants for the Courtside engines.

/// Ratio applied when neither the draft, the player, nor a ratio policy supplies one.
pub const DEFAULT_FALLBACK_RATIO_UNITS: i64 = 1;

/// Ratio a party participant gets when the draft leaves it unset.
pub const DEFAULT_PARTY_RATIO_UNITS: i64 = 1;

/// Upper bound for the number of groups in one organize run.
pub const DEFAULT_MAX_GROUP_COUNT: u32 = 64;

/// Currency code used when the config does not name one.
pub const DEFAULT_CURRENCY: &str = "VND";

/// Level bucket key used for players without a skill level.
pub const NO_LEVEL_KEY: &str = "no_level";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Courtside";
