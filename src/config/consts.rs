// src/config/consts.rs

// Local files
pub const STORE_DIR: &str = ".store";
pub const DEBUG_LOG_FILE: &str = "debug.log";
pub const DEFAULT_SETTINGS_FILE: &str = "vehicle_feed.conf";
pub const ENV_PREFIX: &str = "VEHICLE_FEED_";

// Artifact
pub const DEFAULT_OUT_DIR: &str = "out";
pub const ARTIFACT_PREFIX: &str = "vehicle_feed_";
pub const ARTIFACT_EXT: &str = "xml";
pub const ARTIFACT_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

// Transfer
pub const FTP_PORT: u16 = 21;
pub const FTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REMOTE_PATH: &str = "/";

// Extraction
pub const MAX_OPTIONS: usize = 50;
pub const COMMENT_FALLBACK_WORDS: usize = 60;
pub const TRUNCATION_MARKER: &str = "...";
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

// Source documents
pub const PUBLISHED_STATUS: &str = "publish";
pub const LISTING_KINDS: &[&str] = &["listing", "post", "page"];
