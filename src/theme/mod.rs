//! Theme tokens as CSS custom properties.
//!
//! Every colour scale becomes `--color-<name>-light`, `--color-<name>` and
//! `--color-<name>-dark`. Views reference the variables, never literal colours.

use std::fmt::Write;

use crate::config::{DarkMode, ThemeConfig};

/// Render the theme stylesheet.
pub fn stylesheet(theme: &ThemeConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, scale) in theme.colors.scales() {
        // Writing to a String cannot fail
        let _ = writeln!(css, "  --color-{}-light: {};", name, scale.light);
        let _ = writeln!(css, "  --color-{}: {};", name, scale.default);
        let _ = writeln!(css, "  --color-{}-dark: {};", name, scale.dark);
    }
    css.push_str("}\n");

    let background = "background: var(--color-dark-dark); color: #E2E8F0;";
    match theme.dark_mode {
        DarkMode::Class => {
            let _ = writeln!(css, "html.dark body {{ {} }}", background);
        }
        DarkMode::Media => {
            let _ = writeln!(
                css,
                "@media (prefers-color-scheme: dark) {{ body {{ {} }} }}",
                background
            );
        }
    }

    css.push_str(
        ".el-menu-item.is-active { color: var(--color-primary); }\n\
         .el-button--primary { background: var(--color-primary); color: #fff; }\n\
         .el-alert--error { border-color: var(--color-secondary-dark); }\n",
    );
    css
}

/// Class for the document root element.
pub fn root_class(theme: &ThemeConfig) -> &'static str {
    match (theme.dark_mode, theme.start_dark) {
        (DarkMode::Class, true) => "dark",
        _ => "",
    }
}
