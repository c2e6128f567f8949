//! Scripted editing sessions
//!
//! A script holds one editor command per line and replays the same actions
//! a user performs with the pointer, keyboard and side panel:
//!
//! ```text
//! # two-storey tower
//! size 8 8
//! tile stone
//! place 1 1
//! floor add
//! tile bed
//! rotate
//! place 0 0
//! counts
//! export Ada_Lovelace Tower
//! ```
//!
//! Floor numbers in scripts start at 1, matching the default floor names.
//! Underscores in export arguments stand for spaces.

use blockplan_core::{EditorError, TileId};
use blockplan_designer::{
    Compositor, ExportError, ExportHeader, ExportLayout, FloorplanState, Placement, SpriteSheet,
    Typesetter,
};
use blockplan_settings::Config;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const KEYWORDS: [&str; 12] = [
    "size", "tile", "rotate", "place", "erase", "fill", "clear", "floor", "undo", "redo",
    "counts", "export",
];

/// Errors raised while reading or replaying a script
#[derive(Error, Debug)]
pub enum ScriptError {
    /// A line could not be understood
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The editor refused a command
    #[error("Line {line}: {source}")]
    Editor {
        line: usize,
        #[source]
        source: EditorError,
    },

    /// Exporting failed
    #[error("Line {line}: {source}")]
    Export {
        line: usize,
        #[source]
        source: ExportError,
    },
}

/// Floor panel actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloorCommand {
    Add,
    /// Deletes the active floor
    Delete,
    Next,
    Prev,
    /// Moves the active floor one position up the stack
    Up,
    /// Moves the active floor one position down the stack
    Down,
    Select(usize),
    Hide(usize),
    Show(usize),
    Name(usize, String),
}

/// One script command. Floor indices are zero-based once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Size(u32, u32),
    Tile(TileId),
    Rotate,
    Place(i64, i64),
    Erase(i64, i64),
    Fill,
    Clear,
    Floor(FloorCommand),
    Undo,
    Redo,
    Counts,
    Export { student: String, project: String },
}

/// A parsed command with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub number: usize,
    pub command: Command,
}

fn number<T: FromStr>(text: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("'{text}' is not a valid number"))
}

fn floor_number(text: &str) -> Result<usize, String> {
    match number::<usize>(text)? {
        0 => Err("floor numbers start at 1".to_string()),
        n => Ok(n - 1),
    }
}

fn spaced(word: Option<&&str>) -> String {
    word.map(|w| w.replace('_', " ")).unwrap_or_default()
}

impl FloorCommand {
    fn parse(action: &str, args: &[&str]) -> Result<Self, String> {
        let command = match (action, args) {
            ("add", []) => FloorCommand::Add,
            ("delete", []) => FloorCommand::Delete,
            ("next", []) => FloorCommand::Next,
            ("prev", []) => FloorCommand::Prev,
            ("up", []) => FloorCommand::Up,
            ("down", []) => FloorCommand::Down,
            ("select", [n]) => FloorCommand::Select(floor_number(n)?),
            ("hide", [n]) => FloorCommand::Hide(floor_number(n)?),
            ("show", [n]) => FloorCommand::Show(floor_number(n)?),
            ("name", [n, text @ ..]) => FloorCommand::Name(floor_number(n)?, text.join(" ")),
            _ => return Err(format!("unknown floor command '{}'", args_line(action, args))),
        };
        Ok(command)
    }
}

fn args_line(keyword: &str, args: &[&str]) -> String {
    std::iter::once(keyword)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let keyword = keyword.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (keyword.as_str(), args.as_slice()) {
            ("size", [w, h]) => Command::Size(number(w)?, number(h)?),
            ("tile", [id]) => Command::Tile(TileId::from(*id)),
            ("rotate", []) => Command::Rotate,
            ("place", [x, y]) => Command::Place(number(x)?, number(y)?),
            ("erase", [x, y]) => Command::Erase(number(x)?, number(y)?),
            ("fill", []) => Command::Fill,
            ("clear", []) => Command::Clear,
            ("floor", [action, rest @ ..]) => Command::Floor(FloorCommand::parse(action, rest)?),
            ("undo", []) => Command::Undo,
            ("redo", []) => Command::Redo,
            ("counts", []) => Command::Counts,
            ("export", rest) if rest.len() <= 2 => Command::Export {
                student: spaced(rest.first()),
                project: spaced(rest.get(1)),
            },
            (other, _) if KEYWORDS.contains(&other) => {
                return Err(format!("wrong arguments for '{other}'"))
            }
            (other, _) => return Err(format!("unknown command '{other}'")),
        };
        Ok(Some(command))
    }
}

/// Parses a whole script, failing on the first malformed line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let parsed = Command::parse(raw).map_err(|message| ScriptError::Parse {
            line: number,
            message,
        })?;
        if let Some(command) = parsed {
            lines.push(ScriptLine { number, command });
        }
    }
    Ok(lines)
}

/// An editor plus everything needed to export from it
pub struct Session {
    designer: FloorplanState,
    sprites: SpriteSheet,
    typesetter: Typesetter,
    layout: ExportLayout,
    output_dir: PathBuf,
}

impl Session {
    pub fn new(
        designer: FloorplanState,
        sprites: SpriteSheet,
        typesetter: Typesetter,
        layout: ExportLayout,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            designer,
            sprites,
            typesetter,
            layout,
            output_dir,
        }
    }

    /// Builds the editor, sprite sheet and export layout from settings.
    pub fn from_config(config: &Config) -> blockplan_core::Result<Self> {
        let designer = FloorplanState::from_config(config)?;
        let sprites = SpriteSheet::load_dir(&config.editor.asset_dir, designer.catalog());
        let typesetter = Typesetter::for_family(&config.export.font_family);
        if !typesetter.has_font() {
            tracing::warn!(
                "No '{}' font found; exported labels will be blank",
                config.export.font_family
            );
        }
        let layout = ExportLayout::from_settings(designer.tile_size(), &config.export);
        Ok(Self::new(
            designer,
            sprites,
            typesetter,
            layout,
            config.export.output_dir.clone(),
        ))
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_sprites(mut self, sprites: SpriteSheet) -> Self {
        self.sprites = sprites;
        self
    }

    pub fn with_typesetter(mut self, typesetter: Typesetter) -> Self {
        self.typesetter = typesetter;
        self
    }

    pub fn designer(&self) -> &FloorplanState {
        &self.designer
    }

    /// Replays `lines` in order and collects their printable output.
    ///
    /// Stops at the first command the editor refuses.
    pub fn run(&mut self, lines: &[ScriptLine]) -> Result<Vec<String>, ScriptError> {
        let mut output = Vec::new();
        for line in lines {
            if let Some(text) = self.execute(line)? {
                output.push(text);
            }
        }
        tracing::info!("Replayed {} commands", lines.len());
        Ok(output)
    }

    /// Runs one command, returning a line of output when it has one.
    pub fn execute(&mut self, line: &ScriptLine) -> Result<Option<String>, ScriptError> {
        let number = line.number;
        let editor = |source| ScriptError::Editor {
            line: number,
            source,
        };
        let designer = &mut self.designer;

        let output = match &line.command {
            Command::Size(w, h) => {
                designer.apply_dimensions(*w, *h).map_err(editor)?;
                None
            }
            Command::Tile(id) => {
                designer.select_tile(id.clone()).map_err(editor)?;
                None
            }
            Command::Rotate => {
                let rotation = designer.rotate_tool();
                tracing::debug!("Tool rotation {}", rotation);
                None
            }
            Command::Place(x, y) => report(number, "place", *x, *y, designer.place_at(*x, *y)),
            Command::Erase(x, y) => report(number, "erase", *x, *y, designer.erase_at(*x, *y)),
            Command::Fill => {
                designer.fill_active().map_err(editor)?;
                None
            }
            Command::Clear => {
                designer.clear_active();
                None
            }
            Command::Floor(action) => {
                floor_action(designer, action).map_err(editor)?;
                None
            }
            Command::Undo => {
                if !designer.undo() {
                    tracing::info!("Line {}: nothing to undo", number);
                }
                None
            }
            Command::Redo => {
                if !designer.redo() {
                    tracing::info!("Line {}: nothing to redo", number);
                }
                None
            }
            Command::Counts => {
                let counts = designer.visible_counts();
                if counts.is_empty() {
                    Some("(no blocks)".to_string())
                } else {
                    Some(counts.summary(designer.catalog()))
                }
            }
            Command::Export { student, project } => {
                let header = ExportHeader::new(student, project);
                let path = self.export(&header).map_err(|source| ScriptError::Export {
                    line: number,
                    source,
                })?;
                Some(format!("Exported {}", path.display()))
            }
        };
        Ok(output)
    }

    fn export(&self, header: &ExportHeader) -> Result<PathBuf, ExportError> {
        let compositor = Compositor::new(
            self.layout,
            self.designer.catalog(),
            &self.sprites,
            self.typesetter,
        );
        compositor
            .export(self.designer.state(), header)?
            .write_to_dir(&self.output_dir)
    }
}

fn report(line: usize, verb: &str, x: i64, y: i64, outcome: Placement) -> Option<String> {
    match outcome {
        Placement::Applied => None,
        Placement::Rejected(reason) => Some(format!(
            "Line {line}: {verb} at ({x}, {y}) rejected: {reason:?}"
        )),
    }
}

fn floor_action(designer: &mut FloorplanState, action: &FloorCommand) -> blockplan_core::Result<()> {
    let active = designer.state().active_index();
    match action {
        FloorCommand::Add => {
            designer.add_floor();
        }
        FloorCommand::Delete => designer.delete_floor(active)?,
        FloorCommand::Next => {
            designer.next_floor();
        }
        FloorCommand::Prev => {
            designer.previous_floor();
        }
        FloorCommand::Up => {
            designer.move_floor_up(active)?;
        }
        FloorCommand::Down => {
            designer.move_floor_down(active)?;
        }
        FloorCommand::Select(index) => designer.set_active_floor(*index)?,
        FloorCommand::Hide(index) => designer.set_floor_visible(*index, false)?,
        FloorCommand::Show(index) => designer.set_floor_visible(*index, true)?,
        FloorCommand::Name(index, text) => designer.rename_floor(*index, text)?,
    }
    Ok(())
}
