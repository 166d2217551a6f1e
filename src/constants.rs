pub const TICK_INTERVAL_MS: u64 = 3000;        // Time between two appended slides (milliseconds)
pub const EVICTION_DELAY_MS: u64 = 1000;       // Delay between an append and the eviction of the oldest slide (milliseconds)

pub const DEFAULT_API_BASE: &str = "https://dog.ceo/api"; // Remote catalog serving breeds and their images
pub const HTTP_TIMEOUT_SECS: u64 = 15;          // Per request timeout for catalog fetches

pub const RENDER_POLL_MS: u64 = 100;            // How often the text renderer looks at the window

pub const PLACEHOLDER_CATEGORY: &str = "Choose a dog breed"; // Selection prompt, never a real category
