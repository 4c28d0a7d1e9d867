//! Engine configuration.
//!
//! All layout and animation constants live here and are handed to the engine
//! once, at construction. Nothing reads them from globals.
//!
//! ```
//! use freecell_engine::core::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_seed(7)
//!     .with_screen_width(1024.0)
//!     .with_strict_import(false);
//!
//! assert_eq!(config.seed, 7);
//! assert!(!config.strict_import);
//! ```

use serde::{Deserialize, Serialize};

/// Board geometry, relative to the screen width.
///
/// Cards keep the aspect ratio of the card artwork
/// (`card_graphic_width` x `card_graphic_height`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width of one card in the artwork.
    pub card_graphic_width: f64,

    /// Height of one card in the artwork.
    pub card_graphic_height: f64,

    /// Card width is `screen_width / cards_across`.
    pub cards_across: f64,

    /// Tableau column pitch is `screen_width / tableau_spacing`.
    pub tableau_spacing: f64,

    /// Free cell and foundation pitch is `screen_width / top_row_spacing`.
    pub top_row_spacing: f64,

    /// Gap between the top row and the tableau, in artwork pixels.
    pub separator: f64,

    /// Vertical offset between fanned tableau cards, as a fraction of card height.
    pub tableau_fan: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_graphic_width: 73.0,
            card_graphic_height: 97.0,
            cards_across: 10.0,
            tableau_spacing: 8.0,
            top_row_spacing: 8.5,
            separator: 10.0,
            tableau_fan: 0.25,
        }
    }
}

/// Move animation speeds, in screen widths per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Speed of a plain single-card move.
    pub speed_factor: f64,

    /// Speed of every leg of a column move that parks cards in free cells.
    pub fast_speed_factor: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed_factor: 1.5,
            fast_speed_factor: 2.0,
        }
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the deal RNG. Same seed produces the same sequence of deals.
    pub seed: u64,

    /// Width of the drawing surface. Layout scales with it.
    pub screen_width: f64,

    /// Board geometry.
    pub layout: LayoutConfig,

    /// Move animation speeds.
    pub animation: AnimationConfig,

    /// Reject imported snapshots that break board invariants
    /// (card conservation, free cell capacity, foundation order).
    pub strict_import: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            screen_width: 730.0,
            layout: LayoutConfig::default(),
            animation: AnimationConfig::default(),
            strict_import: true,
        }
    }
}

impl EngineConfig {
    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with custom screen width.
    #[must_use]
    pub fn with_screen_width(mut self, width: f64) -> Self {
        self.screen_width = width;
        self
    }

    /// Create a new config with custom layout.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Create a new config with custom animation speeds.
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Create a new config with strict or lenient snapshot import.
    #[must_use]
    pub fn with_strict_import(mut self, strict: bool) -> Self {
        self.strict_import = strict;
        self
    }
}
