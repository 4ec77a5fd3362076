//! Line-oriented command loop over stdin.
//!
//! One command per line. Blank lines and lines starting with `#` are
//! skipped so that scripted sessions can carry comments.

use crate::controller::Controller;
use derive_more::{Display, Error};
use noughts_core::{Cell, CellError, MoveOutcome, Player, UndoOutcome};
use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{debug, info, instrument};

const HELP: &str = "\
Commands:
  move X Y    place the current player's mark at column X, row Y (0-2)
  undo        take back the last move (and the AI reply, if any)
  new-game    abandon the current round
  toggle-ai   switch the computer opponent on or off
  board       print the board
  score       print the win tally
  state       print the session as JSON
  help        print this message
  quit        leave (also: exit)";

/// A parsed REPL line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    /// `move X Y`
    Move {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },
    /// `undo`
    Undo,
    /// `new-game`
    NewGame,
    /// `toggle-ai`
    ToggleAi,
    /// `board`
    Board,
    /// `score`
    Score,
    /// `state`
    State,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// A line the REPL could not act on.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// First word is not a command.
    #[display("Unknown command '{}' (try 'help')", name)]
    Unknown {
        /// The unrecognized word.
        name: String,
    },
    /// A command that takes no arguments was given some.
    #[display("'{}' takes no arguments", command)]
    UnexpectedArguments {
        /// The command as typed.
        command: String,
    },
    /// `move` without exactly two integer coordinates.
    #[display("Malformed coordinates '{}' (usage: move X Y)", input)]
    MalformedCoordinates {
        /// Everything after `move`.
        input: String,
    },
    /// The line is not valid UTF-8.
    #[display("Line is not valid UTF-8")]
    InvalidUtf8,
    /// Integer coordinates off the grid.
    #[display("{}", source)]
    OutOfRange {
        /// Rejection from the engine.
        source: CellError,
    },
}

impl CommandError {
    /// True for errors that count toward the coordinate exit status.
    pub fn is_coordinate_error(&self) -> bool {
        matches!(
            self,
            CommandError::MalformedCoordinates { .. } | CommandError::OutOfRange { .. }
        )
    }
}

impl From<CellError> for CommandError {
    fn from(source: CellError) -> Self {
        CommandError::OutOfRange { source }
    }
}

impl FromStr for ReplCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "move" => return parse_move(&rest),
            "undo" => ReplCommand::Undo,
            "new-game" => ReplCommand::NewGame,
            "toggle-ai" => ReplCommand::ToggleAi,
            "board" => ReplCommand::Board,
            "score" => ReplCommand::Score,
            "state" => ReplCommand::State,
            "help" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            _ => return Err(CommandError::Unknown { name }),
        };

        if rest.is_empty() {
            Ok(command)
        } else {
            Err(CommandError::UnexpectedArguments { command: name })
        }
    }
}

fn parse_move(args: &[&str]) -> Result<ReplCommand, CommandError> {
    let malformed = || CommandError::MalformedCoordinates {
        input: args.join(" "),
    };
    let [x, y] = args else {
        return Err(malformed());
    };
    let x = x.parse::<usize>().map_err(|_| malformed())?;
    let y = y.parse::<usize>().map_err(|_| malformed())?;
    Ok(ReplCommand::Move { x, y })
}

/// How a REPL run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplReport {
    /// Lines rejected for malformed or off-grid coordinates.
    pub coordinate_errors: usize,
    /// Lines rejected for any other reason.
    pub other_errors: usize,
}

impl ReplReport {
    /// Process exit status: 2 for coordinate errors, 1 for other errors, else 0.
    pub fn exit_code(&self) -> ExitCode {
        if self.coordinate_errors > 0 {
            ExitCode::from(2)
        } else if self.other_errors > 0 {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Runs commands from `input` until EOF or `quit`.
///
/// Responses go to `output`; rejected lines are reported on `errors`
/// and the loop carries on.
#[instrument(skip_all)]
pub fn run_repl<R, W, E>(
    controller: &mut Controller,
    mut input: R,
    output: &mut W,
    errors: &mut E,
) -> std::io::Result<ReplReport>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    info!("Starting REPL");
    let mut report = ReplReport::default();
    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;

        let result = match std::str::from_utf8(&buf) {
            Ok(text) => {
                let line = text.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                debug!(line_number = number, line, "Read command");
                handle_line(controller, line, output)
            }
            Err(_) => Err(LineError::Command(CommandError::InvalidUtf8)),
        };

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => {
                info!("Quit requested");
                break;
            }
            Err(LineError::Command(e)) => {
                debug!(line_number = number, error = %e, "Rejected command");
                writeln!(errors, "line {}: {}", number, e)?;
                if e.is_coordinate_error() {
                    report.coordinate_errors += 1;
                } else {
                    report.other_errors += 1;
                }
            }
            Err(LineError::Io(e)) => return Err(e),
        }
    }

    output.flush()?;
    info!(
        coordinate_errors = report.coordinate_errors,
        other_errors = report.other_errors,
        "REPL finished"
    );
    Ok(report)
}

enum Flow {
    Continue,
    Quit,
}

enum LineError {
    Command(CommandError),
    Io(std::io::Error),
}

impl From<CommandError> for LineError {
    fn from(e: CommandError) -> Self {
        LineError::Command(e)
    }
}

impl From<std::io::Error> for LineError {
    fn from(e: std::io::Error) -> Self {
        LineError::Io(e)
    }
}

fn handle_line<W: Write>(
    controller: &mut Controller,
    line: &str,
    out: &mut W,
) -> Result<Flow, LineError> {
    let command: ReplCommand = line.parse()?;
    execute(controller, command, out)
}

fn execute<W: Write>(
    controller: &mut Controller,
    command: ReplCommand,
    out: &mut W,
) -> Result<Flow, LineError> {
    match command {
        ReplCommand::Move { x, y } => {
            let cell = Cell::new(x, y).map_err(CommandError::from)?;
            let mover = controller.engine().current_player();
            let outcome = controller.play(cell);
            report_move(controller, mover, cell, outcome, out)?;

            if let Some((reply, outcome)) = controller.play_ai() {
                report_move(controller, controller.ai_player(), reply, outcome, out)?;
            }
            print_board(controller, out)?;
        }
        ReplCommand::Undo => {
            for outcome in controller.undo() {
                match outcome {
                    UndoOutcome::NothingToUndo => writeln!(out, "Nothing to undo")?,
                    UndoOutcome::Undone {
                        cell,
                        player,
                        revoked_win,
                    } => {
                        write!(out, "Took back {} at {}", player, cell)?;
                        if let Some(line) = revoked_win {
                            write!(out, " (win on {} revoked)", line)?;
                        }
                        writeln!(out)?;
                    }
                }
            }
            print_board(controller, out)?;
        }
        ReplCommand::NewGame => {
            controller.new_round();
            writeln!(out, "New round, {} to move", controller.engine().current_player())?;
        }
        ReplCommand::ToggleAi => {
            let enabled = controller.toggle_ai();
            writeln!(out, "AI {}", if enabled { "on" } else { "off" })?;
            if let Some((reply, outcome)) = controller.play_ai() {
                report_move(controller, controller.ai_player(), reply, outcome, out)?;
                print_board(controller, out)?;
            }
        }
        ReplCommand::Board => print_board(controller, out)?,
        ReplCommand::Score => print_score(controller, out)?,
        ReplCommand::State => {
            let json = serde_json::to_string_pretty(controller.engine().session())
                .map_err(std::io::Error::other)?;
            writeln!(out, "{}", json)?;
        }
        ReplCommand::Help => writeln!(out, "{}", HELP)?,
        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn report_move<W: Write>(
    controller: &Controller,
    player: Player,
    cell: Cell,
    outcome: MoveOutcome,
    out: &mut W,
) -> std::io::Result<()> {
    match outcome {
        MoveOutcome::Continue => writeln!(out, "{} plays {}", player, cell),
        MoveOutcome::Win { player, line } => {
            writeln!(out, "{} plays {} and wins on {}", player, cell, line)?;
            print_finished_round(controller, out)
        }
        MoveOutcome::Draw => {
            writeln!(out, "{} plays {}: draw", player, cell)?;
            print_finished_round(controller, out)
        }
        MoveOutcome::Rejected(reason) => writeln!(out, "Ignored: {}", reason),
    }
}

fn print_finished_round<W: Write>(controller: &Controller, out: &mut W) -> std::io::Result<()> {
    if let Some(summary) = controller.last_round() {
        writeln!(out, "{}", summary.board().display())?;
    }
    print_score(controller, out)?;
    writeln!(out, "New round, {} to move", controller.engine().current_player())
}

fn print_board<W: Write>(controller: &Controller, out: &mut W) -> std::io::Result<()> {
    let engine = controller.engine();
    writeln!(out, "{}", engine.board().display())?;
    if !engine.moves().is_empty() {
        writeln!(out, "{} to move", engine.current_player())?;
    }
    Ok(())
}

fn print_score<W: Write>(controller: &Controller, out: &mut W) -> std::io::Result<()> {
    let engine = controller.engine();
    writeln!(
        out,
        "X {} - {} O",
        engine.score(Player::Cross),
        engine.score(Player::Circle)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn run(script: &str, ai: bool) -> (Controller, ReplReport, String, String) {
        let mut controller = Controller::new(&GameConfig::default());
        if !ai {
            controller.toggle_ai();
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let report = run_repl(&mut controller, script.as_bytes(), &mut out, &mut err).unwrap();
        (
            controller,
            report,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("move 1 2".parse(), Ok(ReplCommand::Move { x: 1, y: 2 }));
        assert_eq!("  MOVE   0 0 ".parse(), Ok(ReplCommand::Move { x: 0, y: 0 }));
        assert_eq!("undo".parse(), Ok(ReplCommand::Undo));
        assert_eq!("new-game".parse(), Ok(ReplCommand::NewGame));
        assert_eq!("toggle-ai".parse(), Ok(ReplCommand::ToggleAi));
        assert_eq!("exit".parse(), Ok(ReplCommand::Quit));
        assert_eq!("state".parse(), Ok(ReplCommand::State));
    }

    #[test]
    fn test_parse_errors() {
        let err = "move 1".parse::<ReplCommand>().unwrap_err();
        assert!(err.is_coordinate_error());

        let err = "move a b".parse::<ReplCommand>().unwrap_err();
        assert_eq!(
            err,
            CommandError::MalformedCoordinates {
                input: "a b".to_string()
            }
        );

        let err = "jump".parse::<ReplCommand>().unwrap_err();
        assert!(!err.is_coordinate_error());

        let err = "undo 3".parse::<ReplCommand>().unwrap_err();
        assert!(matches!(err, CommandError::UnexpectedArguments { .. }));
    }

    #[test]
    fn test_script_plays_to_a_win() {
        let script = "\
# crosses take the top row
move 0 0
move 0 1
move 1 0
move 1 1
move 2 0
score
";
        let (controller, report, out, err) = run(script, false);
        assert_eq!(report, ReplReport::default());
        assert!(err.is_empty());
        assert!(out.contains("X plays (2, 0) and wins on row 0"));
        assert!(out.contains("X 1 - 0 O"));
        assert!(controller.engine().moves().is_empty());
    }

    #[test]
    fn test_ai_replies_after_each_move() {
        let (controller, report, out, _) = run("move 0 0\n", true);
        assert_eq!(report, ReplReport::default());
        assert!(out.contains("O plays (1, 1)"));
        assert_eq!(controller.engine().moves().len(), 2);
    }

    #[test]
    fn test_bad_coordinates_keep_going() {
        let (controller, report, _, err) = run("move 3 0\nmove x\nmove 1 1\n", false);
        assert_eq!(report.coordinate_errors, 2);
        assert_eq!(report.other_errors, 0);
        assert!(err.contains("line 1"));
        assert!(err.contains("line 2"));
        assert_eq!(controller.engine().moves().len(), 1);
    }

    #[test]
    fn test_occupied_cell_is_ignored() {
        let (controller, report, out, _) = run("move 1 1\nmove 1 1\n", false);
        assert_eq!(report, ReplReport::default());
        assert!(out.contains("Ignored: Cell (1, 1) is already occupied"));
        assert_eq!(controller.engine().moves().len(), 1);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (controller, _, _, _) = run("move 0 0\nquit\nmove 1 1\n", false);
        assert_eq!(controller.engine().moves().len(), 1);
    }

    #[test]
    fn test_unknown_command_counts_as_other_error() {
        let (_, report, _, err) = run("dance\n", false);
        assert_eq!(report.other_errors, 1);
        assert_eq!(report.coordinate_errors, 0);
        assert!(err.contains("Unknown command 'dance'"));
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut controller = Controller::new(&GameConfig::default());
        controller.toggle_ai();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let script: &[u8] = b"move 0 0\n\xff\xfe\nmove 1 1\n";

        let report = run_repl(&mut controller, script, &mut out, &mut err).unwrap();
        assert_eq!(report.other_errors, 1);
        assert_eq!(report.coordinate_errors, 0);
        assert!(String::from_utf8(err).unwrap().contains("line 2: Line is not valid UTF-8"));
        assert_eq!(controller.engine().moves().len(), 2);
    }

    #[test]
    fn test_undo_command_takes_back_move_and_reply() {
        let (controller, report, out, _) = run("move 0 0\nundo\n", true);
        assert_eq!(report, ReplReport::default());
        assert!(out.contains("Took back O at (1, 1)"));
        assert!(out.contains("Took back X at (0, 0)"));
        assert!(controller.engine().moves().is_empty());
    }

    #[test]
    fn test_undo_command_on_empty_round() {
        let (_, report, out, _) = run("undo\n", false);
        assert_eq!(report, ReplReport::default());
        assert!(out.contains("Nothing to undo"));
    }

    #[test]
    fn test_toggle_ai_on_its_turn_replies_at_once() {
        let (controller, report, out, _) = run("move 0 0\ntoggle-ai\n", false);
        assert_eq!(report, ReplReport::default());
        assert!(out.contains("AI on"));
        assert!(out.contains("O plays (1, 1)"));
        assert_eq!(controller.engine().moves().len(), 2);
        assert_eq!(controller.engine().current_player(), Player::Cross);
    }

    #[test]
    fn test_toggle_ai_off() {
        let (controller, _, out, _) = run("toggle-ai\nmove 0 0\n", true);
        assert!(out.contains("AI off"));
        assert_eq!(controller.engine().moves().len(), 1);
    }

    #[test]
    fn test_state_is_json() {
        let (_, _, out, _) = run("move 2 2\nstate\n", false);
        let json_start = out.find('{').unwrap();
        let value: serde_json::Value = serde_json::from_str(&out[json_start..]).unwrap();
        assert_eq!(value["moves"].as_array().unwrap().len(), 1);
    }
}
