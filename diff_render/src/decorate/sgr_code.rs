// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! More info:
//! - <https://doc.rust-lang.org/reference/tokens.html#ascii-escapes>
//! - <https://notes.burke.libbey.me/ansi-escape-codes/>

use std::fmt::{Display, Formatter, Result};

/// The subset of SGR (select graphic rendition) codes the diff decorations need. The
/// `u8` in the 8 / 16 color variants is the color index `0..=7`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SgrCode {
    Reset,
    Dim,
    ForegroundAnsi8(u8),
    BackgroundAnsi8(u8),
    ForegroundBright(u8),
    BackgroundBright(u8),
    ForegroundAnsi256(u8),
    BackgroundAnsi256(u8),
    ForegroundRGB(u8, u8, u8),
    BackgroundRGB(u8, u8, u8),
}

pub mod sgr_code_impl {
    use super::{Display, Formatter, Result, SgrCode};

    pub const CSI: &str = "\x1b[";
    pub const SGR: &str = "m";

    impl Display for SgrCode {
        /// SGR: set graphics mode command.
        /// More info:
        /// - <https://en.wikipedia.org/wiki/ANSI_escape_code#SGR>
        /// - <https://commons.wikimedia.org/wiki/File:Xterm_256color_chart.svg>
        #[rustfmt::skip]
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match *self {
                SgrCode::Reset                    => write!(f, "{CSI}0{SGR}"),
                SgrCode::Dim                      => write!(f, "{CSI}2{SGR}"),
                SgrCode::ForegroundAnsi8(index)   => write!(f, "{CSI}{}{SGR}", 30 + (index & 7)),
                SgrCode::BackgroundAnsi8(index)   => write!(f, "{CSI}{}{SGR}", 40 + (index & 7)),
                SgrCode::ForegroundBright(index)  => write!(f, "{CSI}{}{SGR}", 90 + (index & 7)),
                SgrCode::BackgroundBright(index)  => write!(f, "{CSI}{}{SGR}", 100 + (index & 7)),
                SgrCode::ForegroundAnsi256(index) => write!(f, "{CSI}38;5;{index}{SGR}"),
                SgrCode::BackgroundAnsi256(index) => write!(f, "{CSI}48;5;{index}{SGR}"),
                SgrCode::ForegroundRGB(r, g, b)   => write!(f, "{CSI}38;2;{r};{g};{b}{SGR}"),
                SgrCode::BackgroundRGB(r, g, b)   => write!(f, "{CSI}48;2;{r};{g};{b}{SGR}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::SgrCode;

    #[test]
    fn reset() {
        let sgr_code = SgrCode::Reset;
        assert_eq!(sgr_code.to_string(), "\x1b[0m");
    }

    #[test]
    fn dim() {
        let sgr_code = SgrCode::Dim;
        assert_eq!(sgr_code.to_string(), "\x1b[2m");
    }

    #[test]
    fn fg_color_ansi8() {
        let sgr_code = SgrCode::ForegroundAnsi8(7);
        assert_eq!(sgr_code.to_string(), "\x1b[37m");
    }

    #[test]
    fn bg_color_ansi8() {
        let sgr_code = SgrCode::BackgroundAnsi8(2);
        assert_eq!(sgr_code.to_string(), "\x1b[42m");
    }

    #[test]
    fn ansi8_index_wraps() {
        let sgr_code = SgrCode::ForegroundAnsi8(9);
        assert_eq!(sgr_code.to_string(), "\x1b[31m");
    }

    #[test]
    fn fg_color_bright() {
        let sgr_code = SgrCode::ForegroundBright(7);
        assert_eq!(sgr_code.to_string(), "\x1b[97m");
    }

    #[test]
    fn bg_color_bright() {
        let sgr_code = SgrCode::BackgroundBright(1);
        assert_eq!(sgr_code.to_string(), "\x1b[101m");
    }

    #[test]
    fn fg_color_ansi256() {
        let sgr_code = SgrCode::ForegroundAnsi256(150);
        assert_eq!(sgr_code.to_string(), "\x1b[38;5;150m");
    }

    #[test]
    fn bg_color_ansi256() {
        let sgr_code = SgrCode::BackgroundAnsi256(150);
        assert_eq!(sgr_code.to_string(), "\x1b[48;5;150m");
    }

    #[test]
    fn fg_color_rgb() {
        let sgr_code = SgrCode::ForegroundRGB(175, 215, 135);
        assert_eq!(sgr_code.to_string(), "\x1b[38;2;175;215;135m");
    }

    #[test]
    fn bg_color_rgb() {
        let sgr_code = SgrCode::BackgroundRGB(175, 215, 135);
        assert_eq!(sgr_code.to_string(), "\x1b[48;2;175;215;135m");
    }
}
