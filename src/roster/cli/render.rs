//! # Rendering Module
//!
//! Styled terminal output through the `outstanding` crate. Every view has a
//! template in `templates/` and a `*Data` struct here that feeds it.
//!
//! ## Design Philosophy
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they
//! require Unicode-aware processing. Templates handle presentation: which style
//! a piece of text gets, and what to print for an empty list.
//!
//! [`TerminalRenderer`] is the CLI's side of the view coordinator. It renders
//! every frame it is handed into a buffer, and the command loop decides when
//! the frames reach stdout.

use super::styles::{names, ROSTER_THEME};
use super::templates::{FILTERS_TEMPLATE, PAIRS_TEMPLATE, RECORDS_TEMPLATE};
use colored::Colorize;
use outstanding::{render_with_color, ThemeChoice};
use roster::api::{CmdMessage, MessageLevel};
use roster::coordinator::Renderer;
use roster::error::{Result, RosterError};
use roster::model::{Criteria, FilterRule, Record};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Configuration for list rendering.
pub const LINE_WIDTH: usize = 100;
pub const NAME_WIDTH: usize = 28;
pub const LABEL_WIDTH: usize = 24;
pub const MARKER_ON: &str = "[x]";
pub const MARKER_OFF: &str = "[ ]";

/// Record fields that make up the name column.
const NAME_FIELDS: [&str; 2] = ["firstName", "lastName"];

#[derive(Serialize)]
struct RecordLineData {
    id: String,
    name: String,
    padding: String,
    detail: String,
}

#[derive(Serialize)]
struct RecordsData {
    rows: Vec<RecordLineData>,
    summary: String,
    empty_message: String,
}

#[derive(Serialize)]
struct RuleLineData {
    marker: String,
    marker_style: String,
    id: String,
    label: String,
    padding: String,
    criteria: String,
}

#[derive(Serialize)]
struct FiltersData {
    rules: Vec<RuleLineData>,
    empty_message: String,
}

#[derive(Serialize)]
struct PairData {
    key: String,
    padding: String,
    value: String,
}

#[derive(Serialize)]
struct PairsData {
    pairs: Vec<PairData>,
    empty_message: String,
}

fn render_template<T: Serialize>(template: &str, data: &T, use_color: bool) -> Result<String> {
    render_with_color(template, data, ThemeChoice::from(&*ROSTER_THEME), use_color)
        .map_err(|e| RosterError::Render(e.to_string()))
}

/// Renders the visible records, one per line, in the order given.
pub fn render_records(records: &[Record], use_color: bool) -> Result<String> {
    let id_width = records
        .iter()
        .map(|record| record.id().width())
        .max()
        .unwrap_or(0);
    let name_width = records
        .iter()
        .map(|record| display_name(record).width())
        .max()
        .unwrap_or(0)
        .min(NAME_WIDTH);
    let detail_width = LINE_WIDTH.saturating_sub(id_width + name_width + 4);

    let rows = records
        .iter()
        .map(|record| {
            let name = truncate_to_width(&display_name(record), name_width);
            let padding = " ".repeat(name_width.saturating_sub(name.width()));
            RecordLineData {
                id: format!("{:>width$}", record.id(), width = id_width),
                name,
                padding,
                detail: truncate_to_width(&detail(record), detail_width),
            }
        })
        .collect();

    let summary = match records.len() {
        1 => "1 person".to_string(),
        n => format!("{n} people"),
    };

    let data = RecordsData {
        rows,
        summary,
        empty_message: "No matching people.".to_string(),
    };
    render_template(RECORDS_TEMPLATE, &data, use_color)
}

/// Renders the filter list with each rule's state and criteria.
pub fn render_filters(rules: &[FilterRule], use_color: bool) -> Result<String> {
    let id_width = rules.iter().map(|rule| rule.id.width()).max().unwrap_or(0);
    let label_width = rules
        .iter()
        .map(|rule| rule.label.width())
        .max()
        .unwrap_or(0)
        .min(LABEL_WIDTH);

    let rules = rules
        .iter()
        .map(|rule| {
            let (marker, marker_style) = if rule.enabled {
                (MARKER_ON, names::RULE_ON)
            } else {
                (MARKER_OFF, names::RULE_OFF)
            };
            let label = truncate_to_width(&rule.label, label_width);
            let padding = " ".repeat(label_width.saturating_sub(label.width()));
            RuleLineData {
                marker: marker.to_string(),
                marker_style: marker_style.to_string(),
                id: format!("{:<width$}", rule.id, width = id_width),
                label,
                padding,
                criteria: format_criteria(&rule.criteria),
            }
        })
        .collect();

    let data = FiltersData {
        rules,
        empty_message: "No filter rules.".to_string(),
    };
    render_template(FILTERS_TEMPLATE, &data, use_color)
}

/// Renders `key = value` lines with aligned keys.
pub fn render_pairs<K, V>(pairs: &[(K, V)], empty_message: &str, use_color: bool) -> Result<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let key_width = pairs
        .iter()
        .map(|(key, _)| key.as_ref().width())
        .max()
        .unwrap_or(0);

    let pairs = pairs
        .iter()
        .map(|(key, value)| PairData {
            key: key.as_ref().to_string(),
            padding: " ".repeat(key_width - key.as_ref().width()),
            value: value.as_ref().to_string(),
        })
        .collect();

    let data = PairsData {
        pairs,
        empty_message: empty_message.to_string(),
    };
    render_template(PAIRS_TEMPLATE, &data, use_color)
}

/// Renders aggregate criteria; an empty map means every record is shown.
pub fn render_criteria(criteria: &Criteria, use_color: bool) -> Result<String> {
    let pairs: Vec<(&String, &String)> = criteria.iter().collect();
    render_pairs(&pairs, "No criteria: every record is shown.", use_color)
}

/// Prints command messages to stderr, keeping stdout for rendered views.
pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => eprintln!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
        }
    }
}

/// Renders coordinator frames into a buffer of ready-to-print strings.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    use_color: bool,
    frames: Vec<String>,
}

impl TerminalRenderer {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            frames: Vec::new(),
        }
    }

    /// Frames rendered since the last call.
    pub fn take_frames(&mut self) -> Vec<String> {
        std::mem::take(&mut self.frames)
    }

    fn push(&mut self, frame: Result<String>) {
        match frame {
            Ok(text) => self.frames.push(text),
            Err(e) => {
                tracing::error!(error = %e, "failed to render frame");
                self.frames.push(format!("{e}\n"));
            }
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render_records(&mut self, visible: &[Record]) {
        let frame = render_records(visible, self.use_color);
        self.push(frame);
    }

    fn render_filters(&mut self, rules: &[FilterRule]) {
        let frame = render_filters(rules, self.use_color);
        self.push(frame);
    }
}

fn display_name(record: &Record) -> String {
    let name = NAME_FIELDS
        .iter()
        .filter_map(|field| record.get(field))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        "(no name)".to_string()
    } else {
        name
    }
}

fn detail(record: &Record) -> String {
    record
        .fields()
        .iter()
        .filter(|(key, _)| !NAME_FIELDS.contains(&key.as_str()))
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_criteria(criteria: &Criteria) -> String {
    criteria
        .iter()
        .map(|(field, expected)| format!("{field}~{expected}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::model::Fields;

    fn record(pairs: &[(&str, &str)]) -> Record {
        let fields: Fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Record::from_fields(fields).unwrap()
    }

    fn rule(id: &str, label: &str, enabled: bool) -> FilterRule {
        FilterRule {
            id: id.to_string(),
            label: label.to_string(),
            criteria: [("city".to_string(), "portland".to_string())]
                .into_iter()
                .collect(),
            enabled,
            order: 1,
        }
    }

    #[test]
    fn test_render_empty_records() {
        let output = render_records(&[], false).unwrap();
        assert_eq!(output.trim(), "No matching people.");
    }

    #[test]
    fn test_render_records_in_given_order() {
        let records = vec![
            record(&[("id", "2"), ("firstName", "Kate"), ("lastName", "Moss"), ("city", "Hollywood")]),
            record(&[("id", "1"), ("firstName", "Sam"), ("lastName", "Olsen"), ("city", "Portland")]),
        ];

        let output = render_records(&records, false).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("2  Kate Moss"));
        assert!(lines[0].ends_with("Hollywood"));
        assert!(lines[1].starts_with("1  Sam Olsen"));
        assert_eq!(lines[2], "2 people");
    }

    #[test]
    fn test_record_without_name_fields() {
        let output = render_records(&[record(&[("id", "9"), ("city", "Salem")])], false).unwrap();
        assert!(output.contains("(no name)"));
        assert!(output.contains("Salem"));
        assert!(output.contains("1 person"));
    }

    #[test]
    fn test_render_filters_markers() {
        let rules = vec![rule("f1", "In Portland", true), rule("f2", "Moss", false)];

        let output = render_filters(&rules, false).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("[x] f1  In Portland"));
        assert!(lines[0].ends_with("city~portland"));
        assert!(lines[1].starts_with("[ ] f2  Moss"));
    }

    #[test]
    fn test_render_empty_criteria() {
        let output = render_criteria(&Criteria::new(), false).unwrap();
        assert_eq!(output.trim(), "No criteria: every record is shown.");
    }

    #[test]
    fn test_render_pairs_aligned() {
        let output = render_pairs(&[("sort_field", "lastName"), ("color", "true")], "", false)
            .unwrap();
        assert!(output.contains("sort_field = lastName"));
        assert!(output.contains("color      = true"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let output = render_filters(&[rule("f1", "In Portland", true)], false).unwrap();
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_colored_output_uses_registered_styles() {
        let records = vec![record(&[("id", "1"), ("lastName", "Olsen"), ("city", "Portland")])];
        let rules = vec![rule("f1", "In Portland", true), rule("f2", "Moss", false)];
        let criteria: Criteria = [("city".to_string(), "portland".to_string())]
            .into_iter()
            .collect();

        for output in [
            render_records(&records, true).unwrap(),
            render_records(&[], true).unwrap(),
            render_filters(&rules, true).unwrap(),
            render_filters(&[], true).unwrap(),
            render_criteria(&criteria, true).unwrap(),
        ] {
            assert!(!output.contains(outstanding::DEFAULT_MISSING_STYLE_INDICATOR));
        }
    }

    #[test]
    fn test_terminal_renderer_buffers_frames() {
        let mut renderer = TerminalRenderer::new(false);
        renderer.render_records(&[]);
        renderer.render_filters(&[rule("f1", "In Portland", false)]);

        let frames = renderer.take_frames();
        assert_eq!(frames.len(), 2);
        assert!(frames[1].contains("f1"));
        assert!(renderer.take_frames().is_empty());
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Portland", 20), "Portland");
        assert_eq!(truncate_to_width("Portland", 5), "Port…");
        assert_eq!(truncate_to_width("東京都", 4), "東…");
    }
}
