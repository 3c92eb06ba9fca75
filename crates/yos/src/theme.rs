//! Wallpaper-driven design system: five accent palettes, each with a dark
//! and a light variant, plus screen brightness applied at paint time.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Read-only accent values handed to every renderer. `glow` is the halo
/// color used for emphasis; `gradient` carries the three wallpaper stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accent {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub glow: Rgb,
    pub gradient: [Rgb; 3],
}

struct Wallpaper {
    name: &'static str,
    dark: Accent,
    light: Accent,
}

const fn accent(primary: Rgb, secondary: Rgb, gradient: [Rgb; 3]) -> Accent {
    Accent {
        primary,
        secondary,
        glow: primary,
        gradient,
    }
}

pub const WALLPAPER_COUNT: usize = 5;

const WALLPAPERS: [Wallpaper; WALLPAPER_COUNT] = [
    Wallpaper {
        name: "Default",
        dark: accent(
            Rgb(0x71, 0xB7, 0xD5),
            Rgb(0xA1, 0xCC, 0xDC),
            [Rgb(0x09, 0x6B, 0x90), Rgb(0x71, 0xB7, 0xD5), Rgb(0xA1, 0xCC, 0xDC)],
        ),
        light: accent(
            Rgb(0x3B, 0x82, 0xF6),
            Rgb(0x60, 0xA5, 0xFA),
            [Rgb(0x3B, 0x82, 0xF6), Rgb(0x60, 0xA5, 0xFA), Rgb(0x93, 0xC5, 0xFD)],
        ),
    },
    Wallpaper {
        name: "Blue",
        dark: accent(
            Rgb(0x60, 0xA5, 0xFA),
            Rgb(0x93, 0xC5, 0xFD),
            [Rgb(0x3B, 0x82, 0xF6), Rgb(0x60, 0xA5, 0xFA), Rgb(0x93, 0xC5, 0xFD)],
        ),
        light: accent(
            Rgb(0x25, 0x63, 0xEB),
            Rgb(0x3B, 0x82, 0xF6),
            [Rgb(0x25, 0x63, 0xEB), Rgb(0x3B, 0x82, 0xF6), Rgb(0x60, 0xA5, 0xFA)],
        ),
    },
    Wallpaper {
        name: "Purple",
        dark: accent(
            Rgb(0xA7, 0x8B, 0xFA),
            Rgb(0xC4, 0xB5, 0xFD),
            [Rgb(0xA8, 0x55, 0xF7), Rgb(0xC0, 0x84, 0xFC), Rgb(0xD8, 0xB4, 0xFE)],
        ),
        light: accent(
            Rgb(0x7C, 0x3A, 0xED),
            Rgb(0x8B, 0x5C, 0xF6),
            [Rgb(0x93, 0x33, 0xEA), Rgb(0xA8, 0x55, 0xF7), Rgb(0xC0, 0x84, 0xFC)],
        ),
    },
    Wallpaper {
        name: "Green",
        dark: accent(
            Rgb(0x34, 0xD3, 0x99),
            Rgb(0x6E, 0xE7, 0xB7),
            [Rgb(0x10, 0xB9, 0x81), Rgb(0x34, 0xD3, 0x99), Rgb(0x6E, 0xE7, 0xB7)],
        ),
        light: accent(
            Rgb(0x05, 0x96, 0x69),
            Rgb(0x10, 0xB9, 0x81),
            [Rgb(0x05, 0x96, 0x69), Rgb(0x10, 0xB9, 0x81), Rgb(0x34, 0xD3, 0x99)],
        ),
    },
    Wallpaper {
        name: "Orange",
        dark: accent(
            Rgb(0xFB, 0x92, 0x3C),
            Rgb(0xFD, 0xBA, 0x74),
            [Rgb(0xF9, 0x73, 0x16), Rgb(0xFB, 0x92, 0x3C), Rgb(0xFD, 0xBA, 0x74)],
        ),
        light: accent(
            Rgb(0xEA, 0x58, 0x0C),
            Rgb(0xF9, 0x73, 0x16),
            [Rgb(0xEA, 0x58, 0x0C), Rgb(0xF9, 0x73, 0x16), Rgb(0xFB, 0x92, 0x3C)],
        ),
    },
];

pub const BRIGHTNESS_MIN: u8 = 50;
pub const BRIGHTNESS_MAX: u8 = 100;
pub const BRIGHTNESS_STEP: u8 = 10;
pub const BRIGHTNESS_DEFAULT: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub brightness: u8,
    pub wallpaper: usize,
}

impl Theme {
    #[must_use]
    pub fn new() -> Self {
        Theme {
            dark: false,
            brightness: BRIGHTNESS_DEFAULT,
            wallpaper: 0,
        }
    }

    #[must_use]
    pub fn accent(&self) -> &'static Accent {
        let wallpaper = &WALLPAPERS[self.wallpaper % WALLPAPER_COUNT];
        if self.dark {
            &wallpaper.dark
        } else {
            &wallpaper.light
        }
    }

    #[must_use]
    pub fn wallpaper_name(&self) -> &'static str {
        WALLPAPERS[self.wallpaper % WALLPAPER_COUNT].name
    }

    pub fn toggle_dark(&mut self) {
        self.dark = !self.dark;
    }

    pub fn next_wallpaper(&mut self) {
        self.wallpaper = (self.wallpaper + 1) % WALLPAPER_COUNT;
    }

    pub fn raise_brightness(&mut self) {
        self.brightness = (self.brightness + BRIGHTNESS_STEP).min(BRIGHTNESS_MAX);
    }

    pub fn lower_brightness(&mut self) {
        self.brightness = self.brightness.saturating_sub(BRIGHTNESS_STEP).max(BRIGHTNESS_MIN);
    }

    /// Scales a color by the current brightness percentage.
    #[must_use]
    pub fn lit(&self, color: Rgb) -> Rgb {
        let scale = |channel: u8| {
            (u16::from(channel) * u16::from(self.brightness) / 100) as u8
        };
        Rgb(scale(color.0), scale(color.1), scale(color.2))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new()
    }
}

/// Truecolor foreground escape for `color`.
#[must_use]
pub fn fg(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.0, color.1, color.2)
}

pub const RESET: &str = "\x1b[0m";
