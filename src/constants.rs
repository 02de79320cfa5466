/// Constants used by catalog records and sentinel metadata.
pub mod catalog {
    /// Sentinel value returned for string fields of uncataloged files.
    pub const UNKNOWN_LABEL: &str = "unknown";
    /// Sentinel sub-category id returned for uncataloged files.
    pub const UNKNOWN_SUB_CATEGORY_ID: i64 = -1;
}

/// Constants used by audio file enumeration.
pub mod audio {
    /// File extensions recognized as audio during enumeration (lowercase).
    pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "opus", "m4a", "aac", "wav"];
}

/// Constants used by duration probing across parallel workers.
pub mod probe {
    /// Modulus for the cache-affinity rank check; one worker in every
    /// group of this size is designated to reuse cached probe results.
    pub const CACHE_AFFINITY_MODULUS: u64 = 8;
}
