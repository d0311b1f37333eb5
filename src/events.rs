//! Operator command vocabulary.
//!
//! Each operating mode has its own closed command set.  Text becomes a
//! command only through [`Command::parse`], which accepts exactly the
//! listed keywords (case-sensitive, whole line); anything else is rejected
//! before it can reach a state machine.
//!
//! | Mode  | Keywords                  | Type             |
//! |-------|---------------------------|------------------|
//! | Rate  | `faster`, `slower`        | [`RateCommand`]  |
//! | State | `on`, `off`, `reset`      | [`StateCommand`] |

use core::fmt::Debug;

/// Text appended to an echoed line that matched no keyword.
pub const NOT_RECOGNISED: &str = " not recognised";

/// A closed, line-parsable command set.
pub trait Command: Copy + Debug + PartialEq + Send + 'static {
    /// Every accepted keyword and the command it maps to.
    const VOCABULARY: &'static [(&'static str, Self)];

    /// Prompt shown before each console line is read.
    const PROMPT: &'static str;

    /// Map one console line to a command.
    ///
    /// Surrounding whitespace is ignored; the remaining text must equal a
    /// keyword exactly.
    fn parse(line: &str) -> Option<Self> {
        let word = line.trim();
        Self::VOCABULARY
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|(_, cmd)| *cmd)
    }

    /// The keyword that parses to `self`.
    fn keyword(self) -> &'static str {
        Self::VOCABULARY
            .iter()
            .find(|(_, cmd)| *cmd == self)
            .map_or("?", |(keyword, _)| *keyword)
    }
}

/// Rate-mode commands: relative blink-speed adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateCommand {
    /// Select the next shorter dwell time.
    Faster,
    /// Select the next longer dwell time.
    Slower,
}

impl Command for RateCommand {
    const VOCABULARY: &'static [(&'static str, Self)] =
        &[("faster", Self::Faster), ("slower", Self::Slower)];
    const PROMPT: &'static str = "Command: faster / slower>";
}

/// State-mode commands: absolute indicator requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCommand {
    On,
    Off,
    Reset,
}

impl Command for StateCommand {
    const VOCABULARY: &'static [(&'static str, Self)] =
        &[("on", Self::On), ("off", Self::Off), ("reset", Self::Reset)];
    const PROMPT: &'static str = "Command: on / off / reset>";
}
