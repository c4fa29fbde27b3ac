use std::collections::HashSet;

use crate::ast::{Document, Node};
use crate::error::ThemeError;
use crate::parser::parse_str;

const DEFAULT_MIN_WIDTH: f32 = 300.0;
const DEFAULT_MIN_HEIGHT: f32 = 120.0;

/// Horizontal anchoring of a text part relative to its `x` coordinate.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// What a program does to its target part.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    Show,
    Hide,
}

/// A named text slot that the application fills at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    /// Logical pixels, top-left of the text box.
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Straight-alpha RGBA.
    pub color: [u8; 4],
    pub align: Align,
    /// Initial visibility, before any program runs.
    pub visible: bool,
    /// Static text shown until the application sets its own.
    pub text: String,
}

/// A clickable rectangle that emits `signal` when tapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub signal: String,
}

impl Region {
    /// Half-open containment test in logical pixels.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Reaction to a named signal: show or hide a part.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub on: String,
    pub target: String,
    pub action: Action,
}

/// A validated layout group, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub group: String,
    pub min_width: f32,
    pub min_height: f32,
    pub background: [u8; 4],
    pub corner_radius: f32,
    /// Font file name or absolute path; resolved by the application.
    pub font: Option<String>,
    pub parts: Vec<Part>,
    pub regions: Vec<Region>,
    pub programs: Vec<Program>,
}

impl Theme {
    /// Parses `src` and extracts the `Theme "<group>"` node.
    pub fn parse(src: &str, group: &str) -> Result<Self, ThemeError> {
        let doc = parse_str(src)?;
        Self::from_document(&doc, group)
    }

    pub fn from_document(doc: &Document, group: &str) -> Result<Self, ThemeError> {
        let node = doc
            .find("Theme", group)
            .ok_or_else(|| ThemeError::GroupNotFound(group.to_string()))?;

        let mut theme = Theme {
            group: group.to_string(),
            min_width: positive_or(node, "min_width", DEFAULT_MIN_WIDTH)?,
            min_height: positive_or(node, "min_height", DEFAULT_MIN_HEIGHT)?,
            background: node.prop_color("background").unwrap_or([0, 0, 0, 0]),
            corner_radius: node.prop_f32("corner_radius").unwrap_or(0.0).max(0.0),
            font: node.prop_str("font").map(str::to_string),
            parts: Vec::new(),
            regions: Vec::new(),
            programs: Vec::new(),
        };

        for child in &node.children {
            match child.kind.as_str() {
                "Part" => theme.parts.push(build_part(child)?),
                "Region" => theme.regions.push(build_region(child)?),
                "Program" => theme.programs.push(build_program(child)?),
                other => {
                    return Err(ThemeError::invalid(
                        child.label(),
                        format!("unknown node kind {other:?}"),
                    ));
                }
            }
        }

        theme.validate()?;
        Ok(theme)
    }

    fn validate(&self) -> Result<(), ThemeError> {
        let mut seen = HashSet::new();
        for part in &self.parts {
            if !seen.insert(part.name.as_str()) {
                return Err(ThemeError::invalid(
                    format!("Part {:?}", part.name),
                    "duplicate part name",
                ));
            }
        }
        for program in &self.programs {
            if !seen.contains(program.target.as_str()) {
                return Err(ThemeError::invalid(
                    format!("Program on {:?}", program.on),
                    format!("target part {:?} does not exist", program.target),
                ));
            }
        }
        Ok(())
    }

    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Returns the topmost region under `(x, y)`; later regions win.
    pub fn region_at(&self, x: f32, y: f32) -> Option<&Region> {
        self.regions.iter().rev().find(|r| r.contains(x, y))
    }

    /// Programs reacting to `signal`, in declaration order.
    pub fn programs_for<'a>(&'a self, signal: &'a str) -> impl Iterator<Item = &'a Program> + 'a {
        self.programs.iter().filter(move |p| p.on == signal)
    }
}

// ── node builders ─────────────────────────────────────────────────────────

fn required_name(node: &Node) -> Result<String, ThemeError> {
    node.name
        .clone()
        .ok_or_else(|| ThemeError::invalid(node.label(), "missing name string"))
}

fn required_f32(node: &Node, key: &str) -> Result<f32, ThemeError> {
    node.prop_f32(key)
        .ok_or_else(|| ThemeError::invalid(node.label(), format!("missing numeric `{key}`")))
}

fn positive_or(node: &Node, key: &str, default: f32) -> Result<f32, ThemeError> {
    match node.prop_f32(key) {
        None => Ok(default),
        Some(v) if v > 0.0 => Ok(v),
        Some(v) => Err(ThemeError::invalid(node.label(), format!("`{key}` must be positive, got {v}"))),
    }
}

fn build_part(node: &Node) -> Result<Part, ThemeError> {
    let align = match node.prop_str("align") {
        None | Some("start") => Align::Start,
        Some("center") => Align::Center,
        Some("end") => Align::End,
        Some(other) => {
            return Err(ThemeError::invalid(node.label(), format!("unknown align {other:?}")));
        }
    };
    let visible = match node.prop_str("visible") {
        None | Some("true") => true,
        Some("false") => false,
        Some(other) => {
            return Err(ThemeError::invalid(node.label(), format!("`visible` must be true or false, got {other:?}")));
        }
    };

    Ok(Part {
        name: required_name(node)?,
        x: node.prop_f32("x").unwrap_or(0.0),
        y: node.prop_f32("y").unwrap_or(0.0),
        size: positive_or(node, "size", 14.0)?,
        color: node.prop_color("color").unwrap_or([255, 255, 255, 255]),
        align,
        visible,
        text: node.prop_str("text").unwrap_or_default().to_string(),
    })
}

fn build_region(node: &Node) -> Result<Region, ThemeError> {
    let width = required_f32(node, "width")?;
    let height = required_f32(node, "height")?;
    if width <= 0.0 || height <= 0.0 {
        return Err(ThemeError::invalid(node.label(), "region must have a positive size"));
    }
    let signal = node
        .prop_str("signal")
        .ok_or_else(|| ThemeError::invalid(node.label(), "missing `signal`"))?;

    Ok(Region {
        name: required_name(node)?,
        x: node.prop_f32("x").unwrap_or(0.0),
        y: node.prop_f32("y").unwrap_or(0.0),
        width,
        height,
        signal: signal.to_string(),
    })
}

fn build_program(node: &Node) -> Result<Program, ThemeError> {
    let on = node
        .prop_str("on")
        .ok_or_else(|| ThemeError::invalid(node.label(), "missing `on` signal"))?;
    let target = node
        .prop_str("target")
        .ok_or_else(|| ThemeError::invalid(node.label(), "missing `target` part"))?;
    let action = match node.prop_str("action") {
        Some("show") => Action::Show,
        Some("hide") => Action::Hide,
        Some(other) => {
            return Err(ThemeError::invalid(node.label(), format!("unknown action {other:?}")));
        }
        None => return Err(ThemeError::invalid(node.label(), "missing `action`")),
    };

    Ok(Program { on: on.to_string(), target: target.to_string(), action })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOCK: &str = r#"
        Theme "clock/main" {
            min_width: 300  min_height: 120
            background: #1e1e24cc  corner_radius: 10
            font: "DejaVuSans.ttf"
            Part "time_text" { x: 20 y: 16 size: 44 }
            Part "date_text" { x: 20 y: 78 size: 14 color: #c8c8d0 }
            Part "close_glyph" { x: 290 y: 2 size: 12 align: center text: "x" }
            Region "close"     { x: 280 y: 0 width: 20 height: 20 signal: "close,clicked" }
            Region "date_area" { x: 0 y: 70 width: 300 height: 40 signal: "date,clicked" }
            Program { on: "date,hide" target: date_text action: hide }
            Program { on: "date,show" target: date_text action: show }
        }
    "#;

    #[test]
    fn loads_clock_group() {
        let theme = Theme::parse(CLOCK, "clock/main").unwrap();
        assert_eq!(theme.min_width, 300.0);
        assert_eq!(theme.background, [0x1e, 0x1e, 0x24, 0xcc]);
        assert_eq!(theme.font.as_deref(), Some("DejaVuSans.ttf"));
        assert_eq!(theme.parts.len(), 3);
        assert_eq!(theme.part("close_glyph").unwrap().text, "x");
        assert_eq!(theme.part("close_glyph").unwrap().align, Align::Center);
        assert_eq!(theme.part("time_text").unwrap().text, "");
        assert_eq!(theme.part("date_text").unwrap().color, [0xc8, 0xc8, 0xd0, 0xff]);
        assert_eq!(theme.programs_for("date,hide").count(), 1);
    }

    #[test]
    fn missing_group_is_reported() {
        let err = Theme::parse(CLOCK, "clock/other").unwrap_err();
        assert_eq!(err, ThemeError::GroupNotFound("clock/other".into()));
    }

    #[test]
    fn region_hit_test_prefers_later_regions() {
        let theme = Theme::parse(CLOCK, "clock/main").unwrap();
        assert_eq!(theme.region_at(290.0, 5.0).unwrap().signal, "close,clicked");
        assert_eq!(theme.region_at(10.0, 80.0).unwrap().name, "date_area");
        assert!(theme.region_at(10.0, 10.0).is_none());
    }

    #[test]
    fn program_with_unknown_target_is_rejected() {
        let src = r#"Theme "g" { Program { on: "x" target: nope action: hide } }"#;
        assert!(matches!(Theme::parse(src, "g"), Err(ThemeError::Invalid { .. })));
    }

    #[test]
    fn duplicate_parts_are_rejected() {
        let src = r#"Theme "g" { Part "a" { } Part "a" { } }"#;
        assert!(matches!(Theme::parse(src, "g"), Err(ThemeError::Invalid { .. })));
    }

    #[test]
    fn zero_sized_region_is_rejected() {
        let src = r#"Theme "g" { Region "r" { width: 0 height: 4 signal: "s" } }"#;
        assert!(matches!(Theme::parse(src, "g"), Err(ThemeError::Invalid { .. })));
    }

    #[test]
    fn syntax_error_surfaces_as_parse_error() {
        assert!(matches!(Theme::parse("Theme \"g\" {", "g"), Err(ThemeError::Parse(_))));
    }
}
