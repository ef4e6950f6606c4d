//! `qtree`: build and query a point region quadtree from the command line.

use anyhow::{bail, Context};
use clap::{App, Arg, ArgMatches};
use pr_quadtree::quadtree::DEFAULT_PRINT_LIMIT;
use pr_quadtree::session::{Flow, Session, HELP};
use pr_quadtree::{Point, Quadtree, Square};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = App::new("qtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Point region quadtree: insert points, then run point and range searches.")
        .arg(
            Arg::with_name("BOUNDS")
                .help("Outer square as XL YB XR YT; if omitted enter `bounds` as the first command")
                .multiple(true)
                .max_values(4)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::with_name("script")
                .short("s")
                .long("script")
                .takes_value(true)
                .value_name("FILE")
                .help("Read commands from FILE instead of stdin"),
        )
        .arg(
            Arg::with_name("print-limit")
                .long("print-limit")
                .takes_value(true)
                .value_name("LEVEL")
                .help("Deepest tree level shown by `print`"),
        )
        .arg(
            Arg::with_name("demo")
                .long("demo")
                .conflicts_with_all(&["BOUNDS", "script"])
                .help("Run a fixed demonstration and exit"),
        )
        .get_matches();

    let print_limit = match matches.value_of("print-limit") {
        Some(s) => s
            .parse::<usize>()
            .with_context(|| format!("invalid print limit `{}`", s))?,
        None => DEFAULT_PRINT_LIMIT,
    };

    let stdout = io::stdout();
    let out = stdout.lock();

    if matches.is_present("demo") {
        return demo(out, print_limit);
    }

    let mut session = match bounds(&matches)? {
        Some(square) => {
            let tree = Quadtree::new(square)?;
            info!(%square, "created tree");
            Session::with_tree(tree, out)
        }
        None => Session::new(out),
    }
    .print_limit(print_limit);

    let flow = match matches.value_of("script") {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
            info!(path, "running script");
            session.run(BufReader::new(file), false)?
        }
        None => {
            writeln!(io::stderr(), "{}", HELP)?;
            let stdin = io::stdin();
            let input = stdin.lock();
            session.run(input, true)?
        }
    };

    if let Some(tree) = session.tree() {
        info!(points = tree.len(), depth = tree.depth(), ?flow, "session finished");
    }
    Ok(())
}

fn bounds(matches: &ArgMatches<'_>) -> anyhow::Result<Option<Square>> {
    let values = match matches.values_of("BOUNDS") {
        Some(values) => values.collect::<Vec<_>>(),
        None => return Ok(None),
    };
    if values.len() != 4 {
        bail!("the outer square needs 4 coordinates, got {}", values.len());
    }
    let mut coords = [0.0; 4];
    for (slot, v) in coords.iter_mut().zip(values) {
        *slot = v
            .parse::<f64>()
            .with_context(|| format!("`{}` is not a number", v))?;
    }
    let [xl, yb, xr, yt] = coords;
    Ok(Some(Square::from_coords(xl, yb, xr, yt)))
}

/// Build the tree over (0, 0)-(20, 20) with a handful of points, two of them almost equal,
/// print it and run some searches.
fn demo<W: Write>(out: W, print_limit: usize) -> anyhow::Result<()> {
    let points = [
        Point::new(5.0, 3.0),
        Point::new(6.0, 3.0),
        Point::new(2.0, 2.0),
        Point::new(9.0, 4.0),
        Point::new(12.0, 15.0),
        Point::new(1.0, 13.0),
        Point::new(13.0, 16.0),
        Point::new(5.145687234, 3.415234565),
        Point::new(5.145687234521, 3.415234256565),
    ];

    let mut tree = Quadtree::new(Square::from_coords(0.0, 0.0, 20.0, 20.0))?;
    for p in points.iter() {
        tree.insert(*p)?;
    }
    let mut session = Session::with_tree(tree, out).print_limit(print_limit);

    session.run_line("print")?;
    for p in points.iter().chain(Some(&Point::new(19.0, 19.0))) {
        session.run_line(&format!("point {} {}", p[0], p[1]))?;
    }
    for rect in [
        "range 1 1 5 5",
        "range 3.12345667 2.456723556 9.998762 7.89",
        "range 12 2 18 14",
    ]
    .iter()
    {
        session.run_line(rect)?;
    }
    if session.run_line("close")? != Flow::Close {
        bail!("demo session did not close");
    }
    Ok(())
}
