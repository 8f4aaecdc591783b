
#[macro_use]
extern crate tracing;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use runtime::args::{parse_args, parse_number, parse_param, ArgError};
use runtime::utils::format_error_disp;
use site::ConfigBuilder;

fn usage(arg0: &str) -> String {
    format!("\
Usage:
  {arg0} sanitize [-in=FILE]
  {arg0} build -in=FILE -out=DIR [options]

Commands:
  sanitize    Read markup from FILE (or stdin) and print it sanitized
  build       Render the posts in a JSON export into DIR

Build options:
  -base-url=URL      Absolute site URL used in structured data (SITE_BASE_URL)
  -site-name=NAME    Listing heading and publisher name (SITE_NAME)
  -per-page=N        Posts per listing page, default 10 (SITE_PER_PAGE)
  -delta=N           Page links shown around the current page, default 2
  -utc-offset=H      Hours from UTC for displayed dates (SITE_UTC_OFFSET)

Logging is controlled by RUST_LOG.
")
}

#[derive(Debug)]
enum Command {
    Sanitize,
    Build,
}

fn parse_command() -> Result<Option<(Command, ConfigBuilder)>, ArgError> {
    let mut builder = ConfigBuilder::default();
    let mut command = None;

    let res = parse_args(
        std::env::args(),
        |flag, inline, args, arg0| {
            match flag {
                "h" | "help" => {
                    print!("{}", usage(arg0));
                    return Ok(None);
                },
                "in" => builder.input = Some(parse_param(flag, args, inline)?.into()),
                "out" => builder.output = Some(parse_param(flag, args, inline)?.into()),
                "base-url" => builder.base_url = Some(parse_param(flag, args, inline)?),
                "site-name" => builder.site_name = Some(parse_param(flag, args, inline)?),
                "per-page" => builder.per_page = Some(parse_number(flag, args, inline)?),
                "delta" => builder.pagination_delta = Some(parse_number(flag, args, inline)?),
                "utc-offset" => {
                    let value = parse_param(flag, args, inline)?;
                    let hours = value.parse::<i8>()
                        .map_err(|_| ArgError::InvalidNumber(flag.into(), value))?;
                    builder.utc_offset = Some(hours);
                },
                _ => return Err(ArgError::UnknownFlag(flag.into())),
            }
            Ok(Some(()))
        },
        |index, arg| {
            command = match (index, arg.as_str()) {
                (0, "sanitize") => Some(Command::Sanitize),
                (0, "build") => Some(Command::Build),
                _ => return Err(ArgError::UnexpectedArg(arg)),
            };
            Ok(Some(()))
        },
    )?;

    if res.is_none() {
        return Ok(None);
    }
    match command {
        Some(command) => Ok(Some((command, builder))),
        None => Err(ArgError::MissingArg("command".into())),
    }
}

fn run_sanitize(input: Option<PathBuf>) -> Result<(), anyhow::Error> {
    let markup = match input.as_deref().filter(|path| path.as_os_str() != "-") {
        Some(path) => fs_err::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Reading stdin")?;
            buf
        },
    };
    print!("{}", sanitize::sanitize(&markup));
    Ok(())
}

fn run(command: Command, builder: ConfigBuilder) -> Result<(), anyhow::Error> {
    match command {
        Command::Sanitize => run_sanitize(builder.input),
        Command::Build => {
            let config = builder.with_env()?.build()?;
            debug!("{:?}", config);
            site::build::build_site(&config)?;
            Ok(())
        },
    }
}

fn main() -> ExitCode {
    if let Err(e) = runtime::log::setup_logger(&["sitegen", "site"]) {
        eprintln!("{}", format_error_disp(&e));
        return ExitCode::FAILURE;
    }

    let (command, builder) = match parse_command() {
        Ok(Some(parsed)) => parsed,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}\nRun with -h for usage");
            return ExitCode::from(2);
        },
    };

    match run(command, builder) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", format_error_disp(AsRef::<dyn std::error::Error>::as_ref(&e)));
            ExitCode::FAILURE
        },
    }
}
