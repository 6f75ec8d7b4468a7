//=========================================================================
// Window Configuration
//=========================================================================
//
// Window settings and the placement policy derived from them.
//
// Policy:
//   Windowed   → configured size (default 800x600), centered on desktop
//   Fullscreen → full desktop resolution at (0, 0), 32-bit color depth
//
//=========================================================================

//=== Constants ===========================================================

/// Title shown in the window chrome.
pub const DEFAULT_TITLE: &str = "Generic Engine";

/// Client area used when the window is not fullscreen.
pub const DEFAULT_WINDOWED_SIZE: Resolution = Resolution::new(800, 600);

/// Color depth requested when switching the display to fullscreen.
pub const FULLSCREEN_COLOR_DEPTH: u16 = 32;

//=== Resolution ==========================================================

/// A width/height pair in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

//=== WindowConfig ========================================================

/// Settings used by the window host when creating the window.
///
/// Built through [`crate::ApplicationBuilder`]; the defaults match the
/// shell's stock window (titled "Generic Engine", 800x600, windowed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,

    /// Cover the whole desktop instead of opening a centered window.
    pub fullscreen: bool,

    /// Client area when windowed.
    pub windowed_size: Resolution,

    /// Bits per pixel requested for the fullscreen display mode.
    pub color_depth: u16,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            fullscreen: false,
            windowed_size: DEFAULT_WINDOWED_SIZE,
            color_depth: FULLSCREEN_COLOR_DEPTH,
        }
    }
}

//=== DisplayMode =========================================================

/// How the resolved window occupies the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Windowed,
    Fullscreen { color_depth: u16 },
}

//=== WindowGeometry ======================================================

/// Final size, position and display mode of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub mode: DisplayMode,
}

impl WindowGeometry {
    /// Resolves placement for `config` on a desktop of size `desktop`.
    ///
    /// Windowed placement centers the configured size. The offsets use
    /// signed arithmetic, so a desktop smaller than the window yields a
    /// negative origin rather than wrapping.
    pub fn resolve(config: &WindowConfig, desktop: Resolution) -> Self {
        if config.fullscreen {
            return Self {
                width: desktop.width,
                height: desktop.height,
                x: 0,
                y: 0,
                mode: DisplayMode::Fullscreen {
                    color_depth: config.color_depth,
                },
            };
        }

        let size = config.windowed_size;
        Self {
            width: size.width,
            height: size.height,
            x: centered_offset(desktop.width, size.width),
            y: centered_offset(desktop.height, size.height),
            mode: DisplayMode::Windowed,
        }
    }

    /// Replaces the requested size with the size the window actually got.
    ///
    /// Window managers and scale factors may clamp or round the request;
    /// position and display mode are kept as resolved.
    pub fn with_actual_size(self, actual: Resolution) -> Self {
        Self {
            width: actual.width,
            height: actual.height,
            ..self
        }
    }

    pub fn size(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    pub fn is_fullscreen(&self) -> bool {
        matches!(self.mode, DisplayMode::Fullscreen { .. })
    }
}

fn centered_offset(available: u32, used: u32) -> i32 {
    ((i64::from(available) - i64::from(used)) / 2) as i32
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn windowed() -> WindowConfig {
        WindowConfig::default()
    }

    fn fullscreen() -> WindowConfig {
        WindowConfig {
            fullscreen: true,
            ..WindowConfig::default()
        }
    }

    //=====================================================================
    // Defaults
    //=====================================================================

    #[test]
    fn defaults_match_stock_window() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "Generic Engine");
        assert!(!config.fullscreen);
        assert_eq!(config.windowed_size, Resolution::new(800, 600));
        assert_eq!(config.color_depth, 32);
    }

    //=====================================================================
    // Windowed Placement
    //=====================================================================

    #[test]
    fn windowed_centers_on_desktop() {
        let desktops = [
            Resolution::new(1920, 1080),
            Resolution::new(1366, 768),
            Resolution::new(2560, 1440),
            Resolution::new(801, 601),
        ];

        for desktop in desktops {
            let geometry = WindowGeometry::resolve(&windowed(), desktop);
            assert_eq!(geometry.size(), Resolution::new(800, 600));
            assert_eq!(geometry.x, (desktop.width as i32 - 800) / 2);
            assert_eq!(geometry.y, (desktop.height as i32 - 600) / 2);
            assert_eq!(geometry.mode, DisplayMode::Windowed);
        }
    }

    #[test]
    fn windowed_on_small_desktop_goes_negative() {
        let geometry = WindowGeometry::resolve(&windowed(), Resolution::new(640, 480));
        assert_eq!(geometry.x, -80);
        assert_eq!(geometry.y, -60);
    }

    #[test]
    fn windowed_honours_custom_size() {
        let config = WindowConfig {
            windowed_size: Resolution::new(1024, 768),
            ..WindowConfig::default()
        };
        let geometry = WindowGeometry::resolve(&config, Resolution::new(1920, 1080));
        assert_eq!(geometry.size(), Resolution::new(1024, 768));
        assert_eq!((geometry.x, geometry.y), (448, 156));
    }

    #[test]
    fn actual_size_overrides_requested_size() {
        let requested = WindowGeometry::resolve(&windowed(), Resolution::new(1920, 1080));

        let actual = requested.with_actual_size(Resolution::new(1600, 1200));

        assert_eq!(actual.size(), Resolution::new(1600, 1200));
        assert_eq!((actual.x, actual.y), (requested.x, requested.y));
        assert_eq!(actual.mode, DisplayMode::Windowed);
    }

    //=====================================================================
    // Fullscreen Placement
    //=====================================================================

    #[test]
    fn fullscreen_uses_desktop_resolution() {
        for desktop in [Resolution::new(1920, 1080), Resolution::new(3840, 2160)] {
            let geometry = WindowGeometry::resolve(&fullscreen(), desktop);
            assert_eq!(geometry.size(), desktop);
            assert_eq!((geometry.x, geometry.y), (0, 0));
            assert_eq!(geometry.mode, DisplayMode::Fullscreen { color_depth: 32 });
            assert!(geometry.is_fullscreen());
        }
    }

    #[test]
    fn fullscreen_ignores_windowed_size() {
        let config = WindowConfig {
            windowed_size: Resolution::new(320, 200),
            ..fullscreen()
        };
        let geometry = WindowGeometry::resolve(&config, Resolution::new(1280, 1024));
        assert_eq!(geometry.size(), Resolution::new(1280, 1024));
    }
}
