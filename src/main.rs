use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use qrforge::{ECLevel, QRBuilder, Version};

#[derive(Parser)]
#[command(name = "qrforge")]
#[command(about = "Encode text into a QR code and print it to the terminal", long_about = None)]
struct Cli {
    /// Text to encode
    text: String,
    /// Error correction level
    #[arg(value_enum, default_value = "m", ignore_case = true)]
    level: Level,
    /// Symbol version from 1 to 40, smallest fitting version when omitted
    version: Option<usize>,
    /// Also write the symbol as a PNG image
    #[arg(long)]
    png: Option<PathBuf>,
    /// Pixels per module in the PNG image
    #[arg(long, default_value_t = 8)]
    scale: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut builder = QRBuilder::new(&cli.text);
    builder.ec_level(cli.level.into());
    if let Some(v) = cli.version {
        builder.version(Version::new(v)?);
    }
    let qr = builder.build()?;

    println!("{}", qr.to_str(1));
    println!("{}", qr.metadata());

    if let Some(path) = cli.png {
        qr.to_image(cli.scale).save(&path)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}
