// 🎨 Color theme - blue shades with proper contrast + orange for filtering
// Mirrors the palette used by the embedded dashboard page

// Backgrounds
pub const BG_DARK: &str = "#0d1117";
pub const BG_CARD: &str = "#161b22";
pub const BG_ELEVATED: &str = "#1c2128";
pub const BG_HOVER: &str = "#21262d";

// Borders & dividers
pub const BORDER: &str = "#30363d";
pub const BORDER_LIGHT: &str = "#484f58";
pub const DIVIDER: &str = "#21262d";

// Text
pub const TEXT_PRIMARY: &str = "#f0f6fc";
pub const TEXT_SECONDARY: &str = "#8b949e";
pub const TEXT_MUTED: &str = "#6e7681";

// Accent blues
pub const ACCENT_PRIMARY: &str = "#58a6ff";
pub const ACCENT_LIGHT: &str = "#79c0ff";
pub const ACCENT_DARK: &str = "#1f6feb";

// Filter/historical orange
pub const FILTER_ORANGE: &str = "#d4a84b";
pub const FILTER_ORANGE_LIGHT: &str = "#e8c078";
pub const FILTER_ORANGE_SUBTLE: &str = "#d4a84b33";

// Highlight
pub const HIGHLIGHT_ROW: &str = "#1f6feb";

// Chart colors
pub const BAR_DEFAULT: &str = "#58a6ff";
pub const BAR_ACTIVE: &str = "#d4a84b";
pub const BAR_MUTED: &str = "#30363d";

// Status
pub const SUCCESS: &str = "#3fb950";
pub const WARNING: &str = "#d29922";
pub const ERROR: &str = "#f85149";

/// CSS custom properties injected into the served dashboard page.
/// The HTML template carries a `/*__THEME__*/` placeholder for this block.
pub fn css_variables() -> String {
    format!(
        ":root {{\n\
         \x20 --bg-dark: {BG_DARK};\n\
         \x20 --bg-card: {BG_CARD};\n\
         \x20 --bg-elevated: {BG_ELEVATED};\n\
         \x20 --bg-hover: {BG_HOVER};\n\
         \x20 --border: {BORDER};\n\
         \x20 --border-light: {BORDER_LIGHT};\n\
         \x20 --divider: {DIVIDER};\n\
         \x20 --text-primary: {TEXT_PRIMARY};\n\
         \x20 --text-secondary: {TEXT_SECONDARY};\n\
         \x20 --text-muted: {TEXT_MUTED};\n\
         \x20 --accent-primary: {ACCENT_PRIMARY};\n\
         \x20 --accent-light: {ACCENT_LIGHT};\n\
         \x20 --accent-dark: {ACCENT_DARK};\n\
         \x20 --filter-orange: {FILTER_ORANGE};\n\
         \x20 --filter-orange-light: {FILTER_ORANGE_LIGHT};\n\
         \x20 --filter-orange-subtle: {FILTER_ORANGE_SUBTLE};\n\
         \x20 --highlight-row: {HIGHLIGHT_ROW};\n\
         \x20 --bar-default: {BAR_DEFAULT};\n\
         \x20 --bar-active: {BAR_ACTIVE};\n\
         \x20 --bar-muted: {BAR_MUTED};\n\
         \x20 --success: {SUCCESS};\n\
         \x20 --warning: {WARNING};\n\
         \x20 --error: {ERROR};\n\
         }}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_variables_contain_palette() {
        let css = css_variables();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--bg-dark: #0d1117"));
        assert!(css.contains("--filter-orange: #d4a84b"));
        assert!(css.ends_with("}"));
    }
}
