// Fri Oct 16 2026 - Alex

use super::args::Args;
use crate::config::Config;
use crate::memory::SharedBuffer;
use crate::ui::repl::Repl;
use crate::utils::LoggingUtils;
use colored::Colorize;
use std::io;
use std::sync::Arc;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = self.resolve_config(&args)?;
        self.setup_logging(&args, &config);

        if !config.use_color {
            colored::control::set_override(false);
        }
        if !args.quiet {
            Self::print_banner();
        }

        let buffer = Arc::new(SharedBuffer::new());
        match &config.buffer_path {
            Some(path) => {
                buffer.attach_file(path)?;
                println!("{} Mapped {}", "[+]".green(), path.display());
            }
            None => println!(
                "{} No buffer mapped yet, use 'attach <file>'",
                "[*]".blue()
            ),
        }

        let mut repl = Repl::new(buffer, config);
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        repl.run(stdin.lock(), &mut stdout)
    }

    fn resolve_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(path) = &args.buffer {
            config.buffer_path = Some(path.clone());
        }
        if let Some(width) = args.width {
            config.default_width = width;
        }
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        if args.no_color {
            config.use_color = false;
        }

        config.validate()?;
        Ok(config)
    }

    fn setup_logging(&self, args: &Args, config: &Config) {
        let level = if args.verbose > 0 {
            LoggingUtils::level_from_verbosity(args.verbose as usize)
        } else {
            LoggingUtils::level_from_str(&config.log_level)
        };
        LoggingUtils::init_logger(level);
    }

    fn print_banner() {
        println!("{}", "heap-narrower".cyan().bold());
        println!("{}", "=".repeat(40).cyan());
        println!("type 'help' for commands");
        println!();
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
