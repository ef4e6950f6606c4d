//! Line oriented front-end driving a [`Quadtree`].
//!
//! Every input line holds one command:
//!
//! ```text
//! bounds XL YB XR YT   create the tree over the outer square
//! insert X Y           insert a point
//! point X Y            point search
//! range XL YB XR YT    range search
//! print                dump the tree
//! help                 list the commands
//! close                stop
//! ```
//!
//! Input is validated here, before it reaches the tree: numbers must be finite and coordinates
//! must lie within the outer square.

use crate::{Point, Quadtree, Square};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

pub const HELP: &str = "\
Commands:
  bounds XL YB XR YT   create the tree over the outer square
  insert X Y           insert a point
  point X Y            point search
  range XL YB XR YT    range search
  print                show the entire tree structure
  help                 show this message
  close                stop the program";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bounds(Square),
    Insert(Point),
    Find(Point),
    Range(Square),
    Print,
    Help,
    Close,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unknown command `{0}`, enter \"help\" for a list of commands")]
    UnknownCommand(String),

    #[error("`{command}` takes {expected} numbers, got {found}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("`{0}` is not a number in proper form")]
    InvalidNumber(String),
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        };
        let mut words = line.split_whitespace();
        let keyword = match words.next() {
            Some(w) => w.to_ascii_lowercase(),
            None => return Ok(None),
        };
        let args = words.collect::<Vec<_>>();

        let cmd = match keyword.as_str() {
            "bounds" => {
                let [xl, yb, xr, yt] = numbers::<4>("bounds", &args)?;
                Command::Bounds(Square::from_coords(xl, yb, xr, yt))
            }
            "insert" => {
                let [x, y] = numbers::<2>("insert", &args)?;
                Command::Insert(Point::new(x, y))
            }
            "point" => {
                let [x, y] = numbers::<2>("point", &args)?;
                Command::Find(Point::new(x, y))
            }
            "range" => {
                let [xl, yb, xr, yt] = numbers::<4>("range", &args)?;
                Command::Range(Square::from_coords(xl, yb, xr, yt))
            }
            "print" => {
                numbers::<0>("print", &args)?;
                Command::Print
            }
            "help" => Command::Help,
            "close" | "quit" | "exit" => Command::Close,
            _ => return Err(ParseError::UnknownCommand(keyword)),
        };
        Ok(Some(cmd))
    }
}

fn numbers<const N: usize>(
    command: &'static str,
    args: &[&str],
) -> Result<[f64; N], ParseError> {
    if args.len() != N {
        return Err(ParseError::WrongArity {
            command,
            expected: N,
            found: args.len(),
        });
    }
    let mut res = [0.0; N];
    for (slot, arg) in res.iter_mut().zip(args) {
        *slot = arg
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber(arg.to_string()))?;
    }
    Ok(res)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

/// Executes commands against a tree, writing human readable results to `out`.
pub struct Session<W> {
    tree: Option<Quadtree>,
    out: W,
    print_limit: usize,
}

impl<W: Write> Session<W> {
    pub fn new(out: W) -> Self {
        Self {
            tree: None,
            out,
            print_limit: crate::quadtree::DEFAULT_PRINT_LIMIT,
        }
    }

    pub fn with_tree(tree: Quadtree, out: W) -> Self {
        let mut session = Self::new(out);
        session.tree = Some(tree);
        session
    }

    pub fn print_limit(mut self, print_limit: usize) -> Self {
        self.print_limit = print_limit;
        self
    }

    pub fn tree(&self) -> Option<&Quadtree> {
        self.tree.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Parse and execute a single line. Malformed input is reported and skipped.
    pub fn run_line(&mut self, line: &str) -> io::Result<Flow> {
        match Command::parse(line) {
            Ok(Some(cmd)) => self.execute(cmd),
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "ERROR: {}", err)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Execute lines from `input` until it ends or a `close` command is read.
    /// With `prompt` set a `> ` prompt is written before every line. Lines that are not valid
    /// UTF-8 are reported and skipped.
    pub fn run<R: BufRead>(&mut self, mut input: R, prompt: bool) -> io::Result<Flow> {
        let mut buf = Vec::new();
        loop {
            if prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(Flow::Continue);
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(err) => {
                    warn!(%err, "skipping input line");
                    writeln!(self.out, "ERROR: input line is not valid UTF-8")?;
                    continue;
                }
            };
            if self.run_line(line)? == Flow::Close {
                return Ok(Flow::Close);
            }
        }
    }

    pub fn execute(&mut self, cmd: Command) -> io::Result<Flow> {
        debug!(?cmd, "executing command");

        match cmd {
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Close => {
                writeln!(self.out, "Stopping program...")?;
                return Ok(Flow::Close);
            }
            Command::Bounds(square) => self.bounds(square)?,
            Command::Insert(point) => {
                if let Some(tree) = self.checked_point(&point)? {
                    if let Err(err) = tree.insert(point) {
                        writeln!(self.out, "ERROR: {}", err)?;
                    }
                }
            }
            Command::Find(point) => {
                if let Some(tree) = self.checked_point(&point)? {
                    if tree.contains(&point) {
                        writeln!(self.out, "The point {:.6} has been found.", point)?;
                    } else {
                        writeln!(self.out, "Point not found!")?;
                    }
                }
            }
            Command::Range(rect) => self.range(rect)?,
            Command::Print => match self.tree {
                Some(ref tree) => write!(self.out, "{}", tree.dump(self.print_limit))?,
                None => self.no_tree()?,
            },
        }
        Ok(Flow::Continue)
    }

    fn bounds(&mut self, square: Square) -> io::Result<()> {
        if self.tree.is_some() {
            return writeln!(self.out, "ERROR: outer square is already set!");
        }
        match Quadtree::new(square) {
            Ok(tree) => {
                self.tree = Some(tree);
                writeln!(self.out, "Outer square {}", square)
            }
            Err(_) => writeln!(
                self.out,
                "ERROR: top right coordinates must be larger than bottom left!"
            ),
        }
    }

    fn range(&mut self, rect: Square) -> io::Result<()> {
        let tree = match self.tree {
            Some(ref tree) => tree,
            None => return self.no_tree(),
        };
        for corner in [rect.bl, rect.tr].iter() {
            if let Some(msg) = outside_message(tree.boundary(), corner) {
                return writeln!(self.out, "{}", msg);
            }
        }
        if !rect.is_proper() {
            return writeln!(
                self.out,
                "ERROR: top right coordinates must be larger than bottom left!"
            );
        }

        let out = &mut self.out;
        let mut res = Ok(());
        let found = tree.for_each_in_range(&rect, |p| {
            if res.is_ok() {
                res = writeln!(out, "Range search: {:.6}", p);
            }
        });
        res?;
        match found {
            Ok(0) => writeln!(self.out, "Range search: no point found!"),
            Ok(_) => Ok(()),
            Err(err) => writeln!(self.out, "ERROR: {}", err),
        }
    }

    /// The tree, if one is set up and `point` lies within its outer square. Otherwise the
    /// problem is reported and `None` returned.
    fn checked_point(&mut self, point: &Point) -> io::Result<Option<&mut Quadtree>> {
        let msg = match self.tree {
            None => Some(NO_TREE),
            Some(ref tree) => outside_message(tree.boundary(), point),
        };
        match msg {
            Some(msg) => {
                writeln!(self.out, "{}", msg)?;
                Ok(None)
            }
            None => Ok(self.tree.as_mut()),
        }
    }

    fn no_tree(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", NO_TREE)
    }
}

const NO_TREE: &str = "ERROR: outer square is not set, enter \"bounds XL YB XR YT\" first!";

fn outside_message(boundary: &Square, point: &Point) -> Option<&'static str> {
    if point[0] < boundary.bl[0] || point[0] > boundary.tr[0] {
        Some("ERROR: x-coordinate must be within outer square!")
    } else if point[1] < boundary.bl[1] || point[1] > boundary.tr[1] {
        Some("ERROR: y-coordinate must be within outer square!")
    } else {
        None
    }
}
