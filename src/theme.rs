//! Terminal color themes.
//!
//! Each theme maps a short key to an egui palette. Keys are what users type
//! with `set theme` and what the settings store persists.

use egui::Color32;

/// A named terminal palette.
pub struct Theme {
    pub key: &'static str,
    pub background: Color32,
    pub foreground: Color32,
    pub prompt: Color32,
    pub accent: Color32,
    pub error: Color32,
    pub suggestion: Color32,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color32 {
    Color32::from_rgb(r, g, b)
}

macro_rules! themes {
    ($($key:literal => $bg:expr, $fg:expr, $prompt:expr, $accent:expr, $err:expr, $sugg:expr;)+) => {
        /// Theme keys in registry order, for listings and autocompletion.
        pub const THEME_KEYS: &[&str] = &[$($key),+];

        pub const THEMES: &[Theme] = &[$(Theme {
            key: $key,
            background: $bg,
            foreground: $fg,
            prompt: $prompt,
            accent: $accent,
            error: $err,
            suggestion: $sugg,
        }),+];
    };
}

themes! {
    "cobalt"    => rgb(25, 53, 73),    rgb(255, 255, 255), rgb(255, 198, 0),   rgb(0, 170, 255),   rgb(255, 98, 140),  rgb(128, 160, 184);
    "corporate" => rgb(244, 244, 246), rgb(40, 44, 52),    rgb(0, 94, 184),    rgb(0, 122, 204),   rgb(200, 40, 40),   rgb(120, 128, 140);
    "dark"      => rgb(12, 12, 20),    rgb(220, 220, 220), rgb(100, 255, 100), rgb(100, 150, 255), rgb(255, 100, 100), rgb(150, 150, 150);
    "dracula"   => rgb(40, 42, 54),    rgb(248, 248, 242), rgb(80, 250, 123),  rgb(189, 147, 249), rgb(255, 85, 85),   rgb(98, 114, 164);
    "forest"    => rgb(22, 36, 26),    rgb(214, 227, 210), rgb(134, 192, 108), rgb(94, 160, 120),  rgb(224, 108, 90),  rgb(120, 140, 120);
    "gruvbox"   => rgb(40, 40, 40),    rgb(235, 219, 178), rgb(184, 187, 38),  rgb(250, 189, 47),  rgb(251, 73, 52),   rgb(146, 131, 116);
    "hacker"    => rgb(0, 0, 0),       rgb(0, 255, 65),    rgb(0, 255, 65),    rgb(0, 200, 50),    rgb(255, 60, 60),   rgb(0, 140, 40);
    "iceberg"   => rgb(22, 24, 33),    rgb(198, 200, 209), rgb(132, 160, 198), rgb(137, 184, 194), rgb(226, 120, 120), rgb(108, 112, 134);
    "light"     => rgb(255, 255, 255), rgb(34, 34, 34),    rgb(0, 128, 0),     rgb(0, 102, 204),   rgb(200, 0, 0),     rgb(130, 130, 130);
    "matrix"    => rgb(2, 8, 2),       rgb(160, 255, 160), rgb(0, 255, 70),    rgb(0, 180, 60),    rgb(255, 80, 80),   rgb(0, 120, 40);
    "monokai"   => rgb(39, 40, 34),    rgb(248, 248, 242), rgb(166, 226, 46),  rgb(102, 217, 239), rgb(249, 38, 114),  rgb(117, 113, 94);
    "nord"      => rgb(46, 52, 64),    rgb(216, 222, 233), rgb(163, 190, 140), rgb(136, 192, 208), rgb(191, 97, 106),  rgb(118, 129, 146);
    "pirate"    => rgb(20, 16, 8),     rgb(222, 204, 164), rgb(255, 180, 60),  rgb(196, 148, 90),  rgb(220, 70, 50),   rgb(150, 130, 100);
    "retro"     => rgb(40, 24, 8),     rgb(255, 176, 0),   rgb(255, 200, 60),  rgb(255, 140, 0),   rgb(255, 90, 40),   rgb(180, 120, 30);
    "solarized" => rgb(253, 246, 227), rgb(101, 123, 131), rgb(133, 153, 0),   rgb(38, 139, 210),  rgb(220, 50, 47),   rgb(147, 161, 161);
    "sunset"    => rgb(35, 15, 35),    rgb(255, 222, 200), rgb(255, 140, 105), rgb(255, 94, 130),  rgb(255, 70, 70),   rgb(190, 130, 140);
    "tokyo"     => rgb(26, 27, 38),    rgb(192, 202, 245), rgb(158, 206, 106), rgb(122, 162, 247), rgb(247, 118, 142), rgb(86, 95, 137);
    "ubuntu"    => rgb(48, 10, 36),    rgb(238, 238, 236), rgb(142, 226, 52),  rgb(233, 84, 32),   rgb(239, 41, 41),   rgb(160, 140, 155);
}

/// Case-insensitive theme lookup by key.
pub fn lookup(key: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.key.eq_ignore_ascii_case(key))
}

/// Theme used when nothing is persisted, following the platform's
/// light/dark preference.
pub fn system_default(dark: bool) -> &'static Theme {
    let key = if dark { "dark" } else { "light" };
    lookup(key).unwrap_or(&THEMES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_theme_table() {
        assert_eq!(THEME_KEYS.len(), THEMES.len());
        for (key, theme) in THEME_KEYS.iter().zip(THEMES.iter()) {
            assert_eq!(*key, theme.key);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(lookup("DRACULA").is_some());
        assert!(lookup("Nord").is_some());
        assert!(lookup("vaporwave").is_none());
    }

    #[test]
    fn system_default_maps_preference() {
        assert_eq!(system_default(true).key, "dark");
        assert_eq!(system_default(false).key, "light");
    }
}
