//! Lexer, parser, and layout model for clock gadget **theme files** (`.gtheme`).
//!
//! This crate is intentionally dependency-free so theme files can be checked
//! by tooling without pulling in any window or GPU code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `Document`, `Node`, `Prop`, `Value` |
//! | [`error`] | `ParseError`, `ThemeError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point |
//! | [`theme`] | `Theme`, `Part`, `Region`, `Program` |
//!
//! # Quick start
//!
//! ```rust
//! use gadget_theme::Theme;
//!
//! let src = r#"
//!     Theme "clock/main" {
//!         min_width: 300  min_height: 120
//!         Part "time_text" { x: 20 y: 16 size: 44 color: #ffffffff }
//!         Region "close" { x: 280 y: 0 width: 20 height: 20 signal: "close,clicked" }
//!     }
//! "#;
//!
//! let theme = Theme::parse(src, "clock/main").unwrap();
//! assert_eq!(theme.region_at(290.0, 4.0).unwrap().signal, "close,clicked");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod theme;

pub use ast::Document;
pub use error::{ParseError, ThemeError};
pub use parser::parse_str;
pub use theme::{Action, Align, Part, Program, Region, Theme};
