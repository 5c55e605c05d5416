//! Shared crate-wide constants.

use std::time::Duration;

/// Key-value store key holding the dark-mode flag (`"true"` / `"false"`).
pub const DARK_MODE_KEY: &str = "darkMode";

/// Key-value store key holding the JSON-serialized window layout.
pub const WINDOWS_LAYOUT_KEY: &str = "windowsLayout";

/// Menu bar title shown when no window is open.
pub const FALLBACK_WINDOW_TITLE: &str = "Portfolio";

/// Smallest window a resize may produce, in logical pixels.
pub const MIN_WINDOW_WIDTH: u32 = 400;
pub const MIN_WINDOW_HEIGHT: u32 = 300;

/// Logical pixels per terminal cell used when none are configured.
///
/// Units: pixels. With these values the default 800x600 window occupies
/// 80 columns by 30 rows.
pub const DEFAULT_CELL_WIDTH: u16 = 10;
pub const DEFAULT_CELL_HEIGHT: u16 = 20;

/// How often the menu bar clock re-reads local time.
pub const CLOCK_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Input poll timeout; each timeout without input becomes a frame tick.
pub const POLL_INTERVAL: Duration = Duration::from_millis(33);

/// Rows reserved at the bottom of the screen for the dock.
pub const DOCK_HEIGHT: u16 = 3;

/// Rows reserved at the top of the screen for the menu bar.
pub const MENU_BAR_HEIGHT: u16 = 1;

pub const CONTACT_EMAIL: &str = "contact@kyubae.com";

/// Social links listed next to the contact form, as (icon name, label, URL).
pub const SOCIAL_LINKS: &[(&str, &str, &str)] = &[
    ("FaGithub", "LordKyubae", "https://github.com/LordKyubae"),
    ("FaTwitter", "LordKyubae", "https://x.com/LordKyubae"),
];

/// Client heading used for projects that carry no client.
pub const PERSONAL_PROJECTS_HEADING: &str = "Personal";
