// DOM contract: selectors and ids the page markup must provide.

pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const REVEAL_CARD_SELECTOR: &str = ".project-card, .team-card";
pub const HERO_CONTENT_SELECTOR: &str = ".hero-content";
pub const STATS_SECTION_SELECTOR: &str = ".mission-stats";
pub const STAT_NUMBER_SELECTOR: &str = ".stat-number";

pub const HERO_CONTAINER_ID: &str = "hero-canvas-container";
pub const HERO_LOADING_ID: &str = "hero-loading";
pub const HERO_LOADING_TEXT_SELECTOR: &str = ".hero-loading-text";

// Served next to the page.
pub const HERO_MODEL_URL: &str = "ROVER 2025 MOVIL.STL";

// Data attribute carrying a card's key in the reveal set
pub const REVEAL_KEY_ATTR: &str = "data-reveal-key";
