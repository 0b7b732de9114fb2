//! Styles for the roster CLI.
//!
//! Templates only refer to semantic style names (the constants in [`names`]);
//! the colors behind them are decided here, once, in a `once_cell::sync::Lazy`
//! theme. Changing how enabled rules look is a one-line change below and no
//! template has to be touched.
//!
//! Every name used in a template must be registered, otherwise `outstanding`
//! marks the text as using a missing style.
use console::Style;
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    // Records
    pub const RECORD_ID: &str = "record-id";
    pub const RECORD_NAME: &str = "record-name";
    // Filter rules
    pub const RULE_ON: &str = "rule-on";
    pub const RULE_OFF: &str = "rule-off";
    pub const RULE_LABEL: &str = "rule-label";
    // Criteria and config pairs
    pub const KEY: &str = "key";
    pub const VALUE: &str = "value";
}

pub static ROSTER_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(rgb_to_ansi256((140, 140, 140)));
    let accent = Style::new().color256(rgb_to_ansi256((196, 140, 0)));

    Theme::new()
        .add(names::MUTED, muted.clone())
        .add(
            names::FAINT,
            Style::new().color256(rgb_to_ansi256((110, 110, 110))),
        )
        .add(names::RECORD_ID, accent.clone())
        .add(names::RECORD_NAME, Style::new().bold())
        .add(names::RULE_ON, Style::new().green().bold())
        .add(names::RULE_OFF, muted)
        .add(names::RULE_LABEL, Style::new())
        .add(names::KEY, accent)
        .add(names::VALUE, Style::new().cyan())
});
