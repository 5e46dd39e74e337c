// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the shelfsort CLI.
//!
//! OneDark for dark terminals, One Light for light ones. `SHELFSORT_THEME`
//! wins if set, then `COLORFGBG`, then dark. Respects `NO_COLOR` and turns
//! colors off when stdout is not a TTY.

use std::sync::OnceLock;

use shelfsort::{SortMode, SortOrigin};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SHELFSORT_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

/// What a piece of output means. Each theme picks its own color per tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Error,
    Good,
    Weak,
    Price,
    Shopper,
    Heading,
    Muted,
    Best,
}

type Rgb = (u8, u8, u8);

// Indexed by `Tone as usize`.
const ONE_DARK: [Rgb; 8] = [
    (224, 108, 117),
    (152, 195, 121),
    (229, 192, 123),
    (97, 175, 239),
    (198, 120, 221),
    (86, 182, 194),
    (92, 99, 112),
    (166, 226, 46),
];

const ONE_LIGHT: [Rgb; 8] = [
    (228, 86, 73),
    (80, 161, 79),
    (193, 132, 1),
    (64, 120, 242),
    (166, 38, 164),
    (1, 132, 188),
    (160, 161, 167),
    (68, 140, 39),
];

impl Tone {
    /// Escape sequence for this tone under the current theme.
    pub fn code(self) -> String {
        let palette = match theme() {
            Theme::Dark => &ONE_DARK,
            Theme::Light => &ONE_LIGHT,
        };
        let (r, g, b) = palette[self as usize];
        rgb(r, g, b)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(tone: Tone, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), tone.code(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut plain text to `max` characters, ending in `…` when cut.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn border() -> String {
    if use_colors() {
        Tone::Muted.code()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let (b, r) = (border(), reset());
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}│{}{}{}{}│{}", b, r, content, " ".repeat(pad), b, r);
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let (b, r) = (border(), reset());
    let label_part = format!("─ {} ", themed(Tone::Heading, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{}┌{}{}{}{}┐{}", b, r, label_part, b, "─".repeat(remaining), r);
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let (b, r) = (border(), reset());
    let label_part = format!("─ {} ", themed(Tone::Heading, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{}├{}{}{}{}┤{}", b, r, label_part, b, "─".repeat(remaining), r);
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let (b, r) = (border(), reset());
    println!("{}└{}┘{}", b, "─".repeat(BOX_WIDTH), r);
}

/// Print a long value wrapped over as many rows as it needs.
pub fn wrapped_rows(text: &str) {
    let width = BOX_WIDTH - 2;
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        row(&themed(Tone::Muted, &[DIM], " (none)"));
        return;
    }
    for chunk in chars.chunks(width) {
        row(&format!(" {}", chunk.iter().collect::<String>()));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded sort mode badge
pub fn mode_badge(mode: SortMode) -> String {
    let tone = match mode {
        SortMode::Relevance => Tone::Best,
        SortMode::PriceAsc | SortMode::PriceDesc => Tone::Price,
        SortMode::Popularity | SortMode::Rating => Tone::Shopper,
        SortMode::Date | SortMode::MenuOrder => Tone::Heading,
        SortMode::Random => Tone::Weak,
    };
    themed(tone, &[], &format!("[{}]", mode))
}

/// Where a sort came from
pub fn origin_label(origin: SortOrigin) -> String {
    let text = match origin {
        SortOrigin::Requested => "requested",
        SortOrigin::Ambient => "ambient order-by",
        SortOrigin::Fallback => "fallback",
    };
    themed(Tone::Muted, &[], text)
}

/// ✓ or ·
pub fn flag(value: bool) -> String {
    if value {
        themed(Tone::Good, &[BOLD], "✓")
    } else {
        themed(Tone::Muted, &[], "·")
    }
}

/// Color-coded relevance value
pub fn relevance_value(score: i64) -> String {
    let tone = if score >= 300 {
        Tone::Best
    } else if score >= 150 {
        Tone::Good
    } else if score > 0 {
        Tone::Weak
    } else {
        Tone::Error
    };
    themed(tone, &[], &format!("{:>6}", score))
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
