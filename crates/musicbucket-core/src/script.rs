//! Line-oriented edit scripts.
//!
//! One command per line, whitespace separated; `#` starts a comment.
//!
//! ```text
//! move <item> <bank|tier> [index]
//! add-item <item>
//! remove-item <item>
//! rename <tier> <label...>
//! color <tier> <#hex>
//! add-tier <label> <#hex> [id]
//! remove-tier <tier>
//! move-tier <tier> <index>
//! undo
//! redo
//! show
//! ```

use thiserror::Error;

use musicbucket_config::HexColor;

use crate::board::{Edit, EditError, ItemRef, Location, TierId};
use crate::editor::TierEditor;

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(Edit),
    Undo,
    Redo,
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: usage: {usage}")]
    Usage { line: usize, usage: &'static str },

    #[error("line {line}: {message}")]
    BadArgument { line: usize, message: String },

    #[error("line {line}: {source}")]
    Edit {
        line: usize,
        #[source]
        source: EditError,
    },
}

/// What running a script did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScriptOutcome {
    /// Edits committed.
    pub applied: usize,
    pub undos: usize,
    pub redos: usize,
    /// Rendered boards, one per `show`.
    pub shown: Vec<String>,
}

/// Parses one line. Blank lines and comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Command>, ScriptError> {
    if line.trim_start().starts_with('#') {
        return Ok(None);
    }
    let mut words = line
        .split_whitespace()
        .take_while(|w| !is_comment_start(w));
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let usage = |usage: &'static str| ScriptError::Usage {
        line: line_no,
        usage,
    };

    let parsed = match command {
        "move" => {
            let (item, dest, index) = match args.as_slice() {
                [item, dest] => (*item, *dest, None),
                [item, dest, index] => (*item, *dest, Some(parse_index(line_no, index)?)),
                _ => return Err(usage("move <item> <bank|tier> [index]")),
            };
            Command::Edit(Edit::MoveItem {
                item: ItemRef::new(item),
                to: parse_location(dest),
                index,
            })
        }
        "add-item" => match args.as_slice() {
            [item] => Command::Edit(Edit::AddItem {
                item: ItemRef::new(*item),
            }),
            _ => return Err(usage("add-item <item>")),
        },
        "remove-item" => match args.as_slice() {
            [item] => Command::Edit(Edit::RemoveItem {
                item: ItemRef::new(*item),
            }),
            _ => return Err(usage("remove-item <item>")),
        },
        "rename" => match args.as_slice() {
            [tier, label @ ..] if !label.is_empty() => Command::Edit(Edit::RenameTier {
                tier: TierId::new(*tier),
                label: label.join(" "),
            }),
            _ => return Err(usage("rename <tier> <label...>")),
        },
        "color" => match args.as_slice() {
            [tier, color] => Command::Edit(Edit::RecolorTier {
                tier: TierId::new(*tier),
                color: parse_color(line_no, color)?,
            }),
            _ => return Err(usage("color <tier> <#hex>")),
        },
        "add-tier" => {
            let (label, color, id) = match args.as_slice() {
                [label, color] => (*label, *color, None),
                [label, color, id] => (*label, *color, Some(TierId::new(*id))),
                _ => return Err(usage("add-tier <label> <#hex> [id]")),
            };
            Command::Edit(Edit::AddTier {
                id,
                label: label.to_string(),
                color: parse_color(line_no, color)?,
            })
        }
        "remove-tier" => match args.as_slice() {
            [tier] => Command::Edit(Edit::RemoveTier {
                tier: TierId::new(*tier),
            }),
            _ => return Err(usage("remove-tier <tier>")),
        },
        "move-tier" => match args.as_slice() {
            [tier, index] => Command::Edit(Edit::MoveTier {
                tier: TierId::new(*tier),
                index: parse_index(line_no, index)?,
            }),
            _ => return Err(usage("move-tier <tier> <index>")),
        },
        "undo" | "redo" | "show" if !args.is_empty() => {
            return Err(ScriptError::BadArgument {
                line: line_no,
                message: format!("`{command}` takes no arguments"),
            });
        }
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "show" => Command::Show,
        other => {
            return Err(ScriptError::UnknownCommand {
                line: line_no,
                command: other.to_string(),
            })
        }
    };
    Ok(Some(parsed))
}

/// Runs every line of `script` against `editor`, stopping at the first
/// error. Edits committed before the error stay committed.
pub fn run_script(editor: &mut TierEditor, script: &str) -> Result<ScriptOutcome, ScriptError> {
    let mut outcome = ScriptOutcome::default();
    for (i, raw) in script.lines().enumerate() {
        let line_no = i + 1;
        let Some(command) = parse_line(line_no, raw)? else {
            continue;
        };
        match command {
            Command::Edit(edit) => {
                editor.apply(edit).map_err(|source| ScriptError::Edit {
                    line: line_no,
                    source,
                })?;
                outcome.applied += 1;
            }
            Command::Undo => {
                editor.undo();
                outcome.undos += 1;
            }
            Command::Redo => {
                editor.redo();
                outcome.redos += 1;
            }
            Command::Show => {
                outcome.shown.push(format!(
                    "{}(undo: {}, redo: {})",
                    editor.current(),
                    editor.history().undo_depth(),
                    editor.history().redo_depth()
                ));
            }
        }
    }
    tracing::debug!(
        applied = outcome.applied,
        undos = outcome.undos,
        redos = outcome.redos,
        "Script finished"
    );
    Ok(outcome)
}

/// A word starting with `#` opens a comment unless it is a hex color.
fn is_comment_start(word: &str) -> bool {
    word.starts_with('#') && HexColor::from_hex(word).is_none()
}

fn parse_location(word: &str) -> Location {
    if word == "bank" {
        Location::Bank
    } else {
        Location::Tier(TierId::new(word))
    }
}

fn parse_index(line: usize, word: &str) -> Result<usize, ScriptError> {
    word.parse().map_err(|_| ScriptError::BadArgument {
        line,
        message: format!("not an index: {word}"),
    })
}

fn parse_color(line: usize, word: &str) -> Result<HexColor, ScriptError> {
    word.parse().map_err(|e| ScriptError::BadArgument {
        line,
        message: format!("{e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Tier, TierBoard};
    use musicbucket_config::AppConfig;

    fn editor() -> TierEditor {
        let board = TierBoard::new(
            vec![
                Tier::new("S", "S", HexColor::rgb(255, 127, 127)),
                Tier::new("A", "A", HexColor::rgb(255, 191, 127)),
            ],
            ["a", "b"],
        );
        TierEditor::open(board, &AppConfig::default())
    }

    fn parse(line: &str) -> Result<Option<Command>, ScriptError> {
        parse_line(1, line)
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("# move a S"), Ok(None));
    }

    #[test]
    fn test_trailing_comment() {
        assert_eq!(parse("undo # oops"), Ok(Some(Command::Undo)));
    }

    #[test]
    fn test_color_then_comment() {
        assert_eq!(
            parse("color S #fff # white"),
            Ok(Some(Command::Edit(Edit::RecolorTier {
                tier: TierId::new("S"),
                color: HexColor::rgb(255, 255, 255),
            })))
        );
    }

    #[test]
    fn test_color_is_not_a_comment() {
        assert_eq!(
            parse("color S #00FF00"),
            Ok(Some(Command::Edit(Edit::RecolorTier {
                tier: TierId::new("S"),
                color: HexColor::rgb(0, 255, 0),
            })))
        );
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse("move a S 2"),
            Ok(Some(Command::Edit(Edit::MoveItem {
                item: ItemRef::new("a"),
                to: Location::Tier(TierId::new("S")),
                index: Some(2),
            })))
        );
        assert_eq!(
            parse("move a bank"),
            Ok(Some(Command::Edit(Edit::MoveItem {
                item: ItemRef::new("a"),
                to: Location::Bank,
                index: None,
            })))
        );
    }

    #[test]
    fn test_parse_rename_joins_words() {
        assert_eq!(
            parse("rename S Desert Island"),
            Ok(Some(Command::Edit(Edit::RenameTier {
                tier: TierId::new("S"),
                label: "Desert Island".to_string(),
            })))
        );
    }

    #[test]
    fn test_parse_add_tier() {
        assert_eq!(
            parse("add-tier Guilty #c0c0c0 guilty"),
            Ok(Some(Command::Edit(Edit::AddTier {
                id: Some(TierId::new("guilty")),
                label: "Guilty".to_string(),
                color: HexColor::rgb(192, 192, 192),
            })))
        );
    }

    #[test]
    fn test_usage_errors() {
        assert!(matches!(parse("move a"), Err(ScriptError::Usage { line: 1, .. })));
        assert!(matches!(parse("rename S"), Err(ScriptError::Usage { .. })));
        assert!(matches!(parse("move-tier S"), Err(ScriptError::Usage { .. })));
    }

    #[test]
    fn test_bad_arguments() {
        let err = parse("move a S first").unwrap_err();
        assert_eq!(err.to_string(), "line 1: not an index: first");

        let err = parse("color S red").unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid hex color: red");

        // Not a color, so `#12` starts a comment and the color is missing.
        assert!(matches!(parse("color S #12"), Err(ScriptError::Usage { .. })));

        let err = parse("undo 3").unwrap_err();
        assert_eq!(err.to_string(), "line 1: `undo` takes no arguments");
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_line(7, "shuffle").unwrap_err();
        assert_eq!(err.to_string(), "line 7: unknown command `shuffle`");
    }

    #[test]
    fn test_run_script() {
        let mut ed = editor();
        let outcome = run_script(
            &mut ed,
            "# rank two items\nmove a S\nmove b A\nundo\nshow\nredo\n",
        )
        .unwrap();

        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.undos, 1);
        assert_eq!(outcome.redos, 1);
        assert_eq!(outcome.shown.len(), 1);
        assert!(outcome.shown[0].ends_with("(undo: 1, redo: 1)"));
        assert_eq!(
            ed.current().locate(&ItemRef::new("b")),
            Some(Location::Tier(TierId::new("A")))
        );
    }

    #[test]
    fn test_show_renders_board_then_depths() {
        let mut ed = editor();
        let outcome = run_script(&mut ed, "move a S\nshow\n").unwrap();
        let expected = format!("{}(undo: 1, redo: 0)", ed.current());
        assert_eq!(outcome.shown, vec![expected]);
    }

    #[test]
    fn test_run_script_stops_at_edit_error() {
        let mut ed = editor();
        let err = run_script(&mut ed, "move a S\nmove zzz S\nmove b S\n").unwrap_err();
        assert_eq!(
            err,
            ScriptError::Edit {
                line: 2,
                source: EditError::UnknownItem(ItemRef::new("zzz")),
            }
        );
        assert_eq!(err.to_string(), "line 2: unknown item: zzz");
        // First edit stays committed, third never ran.
        assert_eq!(ed.history().len(), 2);
        assert_eq!(ed.current().locate(&ItemRef::new("b")), Some(Location::Bank));
    }
}
