use crate::canvas_dump::write_canvas_dump;
use crate::config::Config;
use crate::diagram::build_decision_tree;
use crate::render::{render_svg, warn_on_overflowing_labels, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug, info};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = "dtree",
    version,
    about = "Render the ChatGPT-5 vs Gemini 3 Pro decision tree"
)]
pub struct Args {
    /// Output file. Defaults to decision_tree_vertical.png (or .svg) in the working directory.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "png")]
    pub output_format: OutputFormat,

    /// Also write the primitive list as JSON to this path
    #[arg(long = "dump-canvas")]
    pub dump_canvas: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");
    render_with(&args, &Config::default())
}

/// Draws the decision tree and writes it as requested by `args`.
pub fn render_with(args: &Args, config: &Config) -> Result<()> {
    let output = resolve_output(args, config);
    let canvas = build_decision_tree(&config.theme);

    if let Some(dump_path) = args.dump_canvas.as_deref() {
        write_canvas_dump(dump_path, &canvas, &config.render)?;
        info!(path:? = dump_path; "Canvas dump written");
    }

    let svg = render_svg(&canvas, &config.theme, &config.render);
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, &output)?,
        OutputFormat::Png => {
            let overflowing = warn_on_overflowing_labels(&canvas, &config.theme, &config.render);
            debug!(overflowing = overflowing; "Checked label widths");
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }

    info!(
        path:? = output,
        width = config.render.pixel_width(),
        height = config.render.pixel_height();
        "Decision tree exported"
    );
    Ok(())
}

fn resolve_output(args: &Args, config: &Config) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }
    PathBuf::from(&config.render.output_name).with_extension(args.output_format.extension())
}

fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
}
