//! TOML intent timelines for scripted headless runs.

use pixel_shooter_core::Intent;
use serde::Deserialize;
use thiserror::Error;

/// Timeline of control segments indexed by elapsed run time.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct IntentScript {
    segments: Vec<ScriptSegment>,
}

impl IntentScript {
    /// Parses a script from TOML contents and validates its timeline.
    pub(crate) fn parse(contents: &str) -> Result<Self, ScriptError> {
        let file: ScriptFile = toml::from_str(contents)?;
        if file.segments.is_empty() {
            return Err(ScriptError::Empty);
        }

        let mut previous = None;
        for (index, segment) in file.segments.iter().enumerate() {
            if let Some(deadline) = previous {
                if segment.until_ms <= deadline {
                    return Err(ScriptError::OutOfOrder {
                        index,
                        until_ms: segment.until_ms,
                    });
                }
            }
            previous = Some(segment.until_ms);
        }

        Ok(Self {
            segments: file.segments,
        })
    }

    /// Intent held at the provided elapsed run time.
    ///
    /// Steps past the final segment's deadline release every control.
    #[must_use]
    pub(crate) fn intent_at(&self, elapsed_ms: u64) -> Intent {
        self.segments
            .iter()
            .find(|segment| elapsed_ms < segment.until_ms)
            .map_or(Intent::NONE, ScriptSegment::intent)
    }
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    segments: Vec<ScriptSegment>,
}

/// Control flags held until a deadline on the run clock.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub(crate) struct ScriptSegment {
    /// Elapsed-time deadline in milliseconds, exclusive.
    pub(crate) until_ms: u64,
    /// Hold the left movement control.
    #[serde(default)]
    pub(crate) left: bool,
    /// Hold the right movement control.
    #[serde(default)]
    pub(crate) right: bool,
    /// Hold the upward movement control.
    #[serde(default)]
    pub(crate) up: bool,
    /// Hold the downward movement control.
    #[serde(default)]
    pub(crate) down: bool,
    /// Hold the fire control.
    #[serde(default)]
    pub(crate) fire: bool,
}

impl ScriptSegment {
    fn intent(&self) -> Intent {
        Intent {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: self.fire,
        }
    }
}

/// Errors that can occur while loading an intent script.
#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    /// The script did not contain any segments.
    #[error("intent script contains no segments")]
    Empty,
    /// The script was not valid TOML for the expected shape.
    #[error("intent script is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// A segment deadline failed to advance the timeline.
    #[error("segment {index} ends at {until_ms}ms, on or before the previous deadline")]
    OutOfOrder {
        /// Zero-based index of the offending segment.
        index: usize,
        /// Deadline carried by the offending segment.
        until_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_hold_their_controls_until_each_deadline() {
        let script = IntentScript::parse(
            r#"
            [[segments]]
            until_ms = 1000
            right = true
            fire = true

            [[segments]]
            until_ms = 2500
            left = true
            "#,
        )
        .expect("script parses");

        let opening = Intent {
            right: true,
            fire: true,
            ..Intent::NONE
        };
        assert_eq!(script.intent_at(0), opening);
        assert_eq!(script.intent_at(999), opening);
        assert_eq!(
            script.intent_at(1000),
            Intent {
                left: true,
                ..Intent::NONE
            }
        );
        assert_eq!(script.intent_at(2500), Intent::NONE);
    }

    #[test]
    fn empty_scripts_are_rejected() {
        let error = IntentScript::parse("").expect_err("empty script must be rejected");

        assert!(matches!(error, ScriptError::Empty));
    }

    #[test]
    fn stalled_deadlines_are_rejected() {
        let error = IntentScript::parse(
            r#"
            [[segments]]
            until_ms = 1000

            [[segments]]
            until_ms = 1000
            fire = true
            "#,
        )
        .expect_err("stalled deadline must be rejected");

        assert!(matches!(
            error,
            ScriptError::OutOfOrder {
                index: 1,
                until_ms: 1000,
            }
        ));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let error =
            IntentScript::parse("segments = 5").expect_err("malformed script must be rejected");

        assert!(matches!(error, ScriptError::Parse(_)));
    }
}
