// Thaiswap CLI
// Fixes text typed on the wrong keyboard layout (Thai <-> QWERTY)

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use thaiswap_core::settings::{default_settings_content, Settings};
use thaiswap_core::{
    conversion_direction, convert, ConversionTrigger, FileBuffer, LayoutTable, TriggerOutcome,
};

/// Thai/QWERTY keyboard layout converter
#[derive(Parser, Debug)]
#[command(name = "thaiswap")]
#[command(author = "thaiswap contributors")]
#[command(version)]
#[command(about = "Convert text typed on the wrong Thai/QWERTY layout", long_about = None)]
struct Args {
    /// Text to convert (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    text: Vec<String>,

    /// TOML settings file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print the conversion direction instead of converting
    #[arg(short, long, conflicts_with = "file")]
    direction: bool,

    /// Convert a file in place
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Print the layout table and exit
    #[arg(long)]
    table: bool,

    /// Print a default settings file and exit
    #[arg(long)]
    default_config: bool,

    /// Validate settings and exit
    #[arg(long)]
    check_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Main application state
struct Application {
    settings: Settings,
    args: Args,
}

impl Application {
    /// Create a new application from CLI arguments
    fn new(args: Args) -> Result<Self, Box<dyn std::error::Error>> {
        let settings = match args.config {
            Some(ref path) => Settings::from_file(path)?,
            None => Settings::load_default()?,
        };

        Ok(Self { settings, args })
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.settings.validate()?;
        let hotkey = self.settings.parsed_hotkey()?;
        match self.settings.source_path() {
            Some(path) => println!("Configuration is valid ({})", path.display()),
            None => println!("Configuration is valid (defaults)"),
        }
        println!("  hotkey = {}", hotkey);
        Ok(())
    }

    /// Print the forward table, one `thai<TAB>latin` pair per line
    fn print_table() {
        for (thai, latin) in LayoutTable::thai_qwerty().entries() {
            println!("{}\t{}", thai, latin);
        }
    }

    /// Text from the arguments, or all of stdin
    fn input_text(&self) -> io::Result<String> {
        if !self.args.text.is_empty() {
            return Ok(self.args.text.join(" "));
        }

        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    }

    /// Run the file trigger and report the outcome
    fn run_file(&self, path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let mut trigger =
            ConversionTrigger::new(FileBuffer::new(&path)).with_settings(&self.settings);
        let outcome = trigger.fire();

        if self.settings.notifications_enabled() {
            log::debug!(
                "notification for {:?}",
                self.settings.notification_duration()
            );
            println!("{}", outcome);
        }

        match outcome {
            TriggerOutcome::ReadFailed => Err(format!("could not read {}", path.display()).into()),
            TriggerOutcome::WriteFailed => {
                Err(format!("could not write {}", path.display()).into())
            }
            _ => Ok(()),
        }
    }

    fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref path) = self.args.file {
            return self.run_file(path.clone());
        }

        let text = self.input_text()?;
        log::debug!("read {} code points", text.chars().count());

        print!("{}", self.render(&text));
        Ok(())
    }

    /// Output for converted or inspected text.
    ///
    /// Text from arguments gets a trailing newline; stdin is echoed as read.
    fn render(&self, text: &str) -> String {
        if self.args.direction {
            return format!("{}\n", conversion_direction(text));
        }

        let converted = convert(text);
        if self.args.text.is_empty() {
            converted
        } else {
            format!("{}\n", converted)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    // These don't need settings
    if args.table {
        Application::print_table();
        return Ok(());
    }
    if args.default_config {
        print!("{}", default_settings_content());
        return Ok(());
    }

    let app = Application::new(args)?;

    if app.args.check_config {
        return app.validate();
    }

    app.run()
}
