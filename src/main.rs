//! textfit - fit text and images into a region of a base image
//!
//! Reads text from the command line (or stdin) and an optional content
//! image, renders them onto the configured base image and writes a PNG.

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use std::io::Read;
use std::path::PathBuf;
use textfit::{Align, Config, ImageSource, Session, VAlign};

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    base: Option<String>,
    align: Option<Align>,
    valign: Option<VAlign>,
    text: Option<String>,
    init_config: bool,
    force: bool,
}

impl Args {
    /// Parse arguments (without the program name)
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Args::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            // Accept both "--opt value" and "--opt=value"
            let (name, inline) = match arg.split_once('=') {
                Some((n, v)) if n.starts_with("--") => (n, Some(v.to_string())),
                _ => (arg.as_str(), None),
            };
            let mut value = |flag: &str| -> Result<String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => iter
                        .next()
                        .cloned()
                        .ok_or_else(|| anyhow!("{} requires a value", flag)),
                }
            };

            match name {
                "-c" | "--config" => parsed.config = Some(PathBuf::from(value(name)?)),
                "-i" | "--image" => parsed.image = Some(PathBuf::from(value(name)?)),
                "-o" | "--output" => parsed.output = Some(PathBuf::from(value(name)?)),
                "-b" | "--base" => parsed.base = Some(value(name)?),
                "--align" => {
                    parsed.align = Some(value(name)?.parse().map_err(|e: String| anyhow!(e))?)
                }
                "--valign" => {
                    parsed.valign = Some(value(name)?.parse().map_err(|e: String| anyhow!(e))?)
                }
                "--init-config" => parsed.init_config = true,
                "-f" | "--force" => parsed.force = true,
                "-" => parsed.set_text("-".to_string())?,
                other if other.starts_with('-') => bail!("Unknown option: {}", other),
                _ => parsed.set_text(arg.clone())?,
            }
        }
        Ok(parsed)
    }

    fn set_text(&mut self, text: String) -> Result<()> {
        if self.text.is_some() {
            bail!("Only one TEXT argument is allowed (quote text containing spaces)");
        }
        self.text = Some(text);
        Ok(())
    }
}

fn help_text() -> String {
    format!(
        r##"textfit {} - fit text and images into a base image

USAGE:
    textfit [OPTIONS] [TEXT]

ARGS:
    TEXT                    Text to draw ("-" reads stdin). A mapped keyword
                            such as "#开心#" selects the base image and is removed.

OPTIONS:
    -c, --config PATH       Config file (default: search order below)
    -i, --image PATH        Content image to place in the region
    -o, --output PATH       Output PNG (default: textfit_YYYYmmdd_HHMMSS.png)
    -b, --base KEYWORD      Select base image by keyword
        --align ALIGN       left | center | right
        --valign VALIGN     top | middle | bottom
        --init-config       Generate config file template
    -f, --force             Overwrite existing config file
    -h, --help              Print this help message
    -V, --version           Print version information

EXAMPLES:
    textfit "你好[世界]"                  Bracketed span drawn in bracket color
    textfit -i photo.png "caption"        Image and text split in one region
    echo "long text" | textfit - -o out.png
    textfit --init-config --force         Overwrite config with template

CONFIG FILE (first found):
    $TEXTFIT_CONFIG
    ~/.config/textfit/config.toml
    ./config.toml

LOGGING:
    RUST_LOG=info textfit ...
"##,
        env!("CARGO_PKG_VERSION")
    )
}

fn print_help() {
    print!("{}", help_text());
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("textfit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let args = Args::parse(&args)?;

    if args.init_config {
        let path = Config::write_default_config(args.force)?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load(),
    };
    if let Some(align) = args.align {
        config.text.align = align;
    }
    if let Some(valign) = args.valign {
        config.text.valign = valign;
    }

    let mut session = Session::new(config);
    if let Some(keyword) = &args.base {
        session.select_base(keyword);
    }

    let text = match args.text.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
        Some(text) => text.to_string(),
        None => String::new(),
    };
    let text = session.take_keyword(&text);
    let content = args.image.map(ImageSource::Path);

    let Some(rendered) = session.generate(&text, content)? else {
        bail!("Nothing to render: give TEXT and/or --image (see --help)");
    };

    let output = args.output.unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("textfit_{}.png", timestamp))
    });
    std::fs::write(&output, &rendered.png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Wrote {} ({}x{}, font size {:?}, truncated {})",
        output.display(),
        rendered.width,
        rendered.height,
        rendered.font_size,
        rendered.truncated
    );
    if rendered.truncated {
        eprintln!("Warning: text did not fit and was truncated");
    }
    println!("{}", output.display());
    Ok(())
}
