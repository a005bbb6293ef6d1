//! Easel CLI
//!
//! Read an animation script and render it as text or SVG.
//!
//! ```text
//! easel -in scene.txt -view svg -speed 20 -out scene.svg
//! ```

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use easel_svg::SvgOptions;
use easel_text::ScriptReader;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::{EaselConfig, ViewKind};

/// Long flags that may also be spelled with a single dash
const LONG_FLAGS: &[&str] = &[
    "in", "view", "out", "speed", "loop", "lenient", "config", "verbose",
];

#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render Easel animation scripts", long_about = None)]
struct Cli {
    /// Animation script to read
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// View to produce
    #[arg(long, value_enum)]
    view: Option<ViewKind>,

    /// Output destination (`out` or `System.out` for standard output)
    #[arg(long, value_name = "DEST")]
    out: Option<String>,

    /// Playback speed in ticks per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    speed: Option<u32>,

    /// Restart the SVG animation when it ends
    #[arg(long = "loop")]
    looping: bool,

    /// Skip script lines the model rejects instead of failing
    #[arg(long)]
    lenient: bool,

    /// Configuration file (defaults to ./easel.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    // Initialize logging; stdout is reserved for rendered output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EaselConfig::load(path)?,
        None => EaselConfig::load_from_dir(&std::env::current_dir()?)?,
    };
    let settings = Settings::resolve(cli, &config)?;

    let mut model = ScriptReader::new()
        .lenient(cli.lenient)
        .read_file(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    model.set_tempo(settings.speed);

    info!(
        "Rendering {} shapes from {} as {} at {} ticks/s",
        model.len(),
        cli.input.display(),
        settings.view,
        settings.speed
    );

    let rendered = match settings.view {
        ViewKind::Text => easel_text::render(&model),
        ViewKind::Svg => easel_svg::render(&model, &settings.svg)?,
        ViewKind::Visual | ViewKind::Edit => {
            anyhow::bail!(
                "The {} view needs a windowing front end and is not available in this build",
                settings.view
            );
        }
    };

    settings.out.write(&rendered)
}

/// Rewrite `-in`-style long flags to `--in` so clap accepts them
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(flag) if is_single_dash_long(flag) => OsString::from(format!("-{}", flag)),
            _ => arg,
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(name) if !name.starts_with('-') => {
            let name = name.split('=').next().unwrap_or(name);
            LONG_FLAGS.contains(&name)
        }
        _ => false,
    }
}

/// Where rendered output goes
#[derive(Clone, Debug, PartialEq, Eq)]
enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    fn parse(out: Option<&str>) -> Self {
        match out {
            None | Some("out") | Some("System.out") | Some("-") => Destination::Stdout,
            Some(path) => Destination::File(PathBuf::from(path)),
        }
    }

    fn write(&self, content: &str) -> Result<()> {
        match self {
            Destination::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
            Destination::File(path) => {
                fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
        }
        Ok(())
    }
}

/// Command line merged over the configuration file
#[derive(Debug)]
struct Settings {
    view: ViewKind,
    speed: u32,
    out: Destination,
    svg: SvgOptions,
}

impl Settings {
    fn resolve(cli: &Cli, config: &EaselConfig) -> Result<Self> {
        let view = cli.view.or(config.defaults.view).context(
            "No view selected; pass -view <text|svg|visual|edit> or set defaults.view",
        )?;

        let speed = cli.speed.or(config.defaults.speed).unwrap_or(1);
        if speed == 0 {
            anyhow::bail!("Speed must be a positive number of ticks per second");
        }

        let out = Destination::parse(cli.out.as_deref().or(config.defaults.out.as_deref()));

        let mut svg = config.svg_options();
        svg.looping |= cli.looping;

        Ok(Self {
            view,
            speed,
            out,
            svg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<OsString> {
        line.split_whitespace().map(OsString::from).collect()
    }

    fn parse(line: &str) -> Cli {
        Cli::try_parse_from(normalize_args(args(line))).unwrap()
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let normalized = normalize_args(args("easel -in a.txt -view svg --out=b.svg -v -speed=3"));
        assert_eq!(
            normalized,
            args("easel --in a.txt --view svg --out=b.svg -v --speed=3")
        );

        // Values and unknown words are left alone
        assert_eq!(normalize_args(args("easel -x -out")), args("easel -x --out"));
        assert_eq!(normalize_args(args("easel -7")), args("easel -7"));
    }

    #[test]
    fn test_parse_classic_flags() {
        let cli = parse("easel -in scene.txt -view text -out System.out -speed 20");
        assert_eq!(cli.input, PathBuf::from("scene.txt"));
        assert_eq!(cli.view, Some(ViewKind::Text));
        assert_eq!(cli.speed, Some(20));
        assert_eq!(Destination::parse(cli.out.as_deref()), Destination::Stdout);
    }

    #[test]
    fn test_rejects_bad_flags() {
        assert!(Cli::try_parse_from(normalize_args(args("easel -view svg"))).is_err());
        assert!(Cli::try_parse_from(normalize_args(args("easel -in a -view gif"))).is_err());
        assert!(Cli::try_parse_from(normalize_args(args("easel -in a -speed 0"))).is_err());
    }

    #[test]
    fn test_destination() {
        assert_eq!(Destination::parse(None), Destination::Stdout);
        assert_eq!(Destination::parse(Some("out")), Destination::Stdout);
        assert_eq!(
            Destination::parse(Some("scene.svg")),
            Destination::File(PathBuf::from("scene.svg"))
        );
    }

    #[test]
    fn test_flags_override_config() {
        let config: EaselConfig = toml::from_str(
            "[defaults]\nview = \"svg\"\nspeed = 5\nout = \"x.svg\"\n[svg]\nwidth = 640\n",
        )
        .unwrap();

        let settings = Settings::resolve(&parse("easel -in a"), &config).unwrap();
        assert_eq!(settings.view, ViewKind::Svg);
        assert_eq!(settings.speed, 5);
        assert_eq!(settings.out, Destination::File(PathBuf::from("x.svg")));
        assert_eq!(settings.svg.width, Some(640));
        assert!(!settings.svg.looping);

        let cli = parse("easel -in a -view text -speed 2 -out out -loop");
        let settings = Settings::resolve(&cli, &config).unwrap();
        assert_eq!(settings.view, ViewKind::Text);
        assert_eq!(settings.speed, 2);
        assert_eq!(settings.out, Destination::Stdout);
        assert!(settings.svg.looping);
    }

    #[test]
    fn test_settings_need_view_and_positive_speed() {
        let empty = EaselConfig::default();
        let err = Settings::resolve(&parse("easel -in a"), &empty).unwrap_err();
        assert!(err.to_string().contains("No view selected"));

        let defaults = Settings::resolve(&parse("easel -in a -view svg"), &empty).unwrap();
        assert_eq!(defaults.speed, 1);
        assert_eq!(defaults.out, Destination::Stdout);

        let zero: EaselConfig = toml::from_str("[defaults]\nspeed = 0\n").unwrap();
        assert!(Settings::resolve(&parse("easel -in a -view svg"), &zero).is_err());
    }

    #[test]
    fn test_unsupported_views() {
        let dir = std::env::temp_dir().join(format!("easel-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join("scene.txt");
        fs::write(&script, "canvas 0 0 10 10\nshape r rectangle\n").unwrap();

        let line = format!("easel -in {} -view visual", script.display());
        let err = run(&parse(&line)).unwrap_err();
        assert!(err.to_string().contains("not available"));

        let out = dir.join("scene.svg");
        let line = format!(
            "easel -in {} -view svg -out {}",
            script.display(),
            out.display()
        );
        run(&parse(&line)).unwrap();
        assert!(fs::read_to_string(&out).unwrap().starts_with("<svg"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
