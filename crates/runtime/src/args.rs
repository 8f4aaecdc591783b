
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArgError {
    #[error("Invalid boolean flag: {:?}", .0)]
    InvalidBool(String),
    #[error("Flag -{} is missing an argument", .0)]
    MissingArg(String),
    #[error("Flag -{} expects a number, got {:?}", .0, .1)]
    InvalidNumber(String, String),
    #[error("Unknown flag -{}", .0)]
    UnknownFlag(String),
    #[error("Unexpected argument {:?}", .0)]
    UnexpectedArg(String),
}

/// Parse a boolean flag; true is "-c" or "-c=true", false is "-c=false"
pub fn parse_flag_optional_bool(value: Option<&str>) -> Result<bool, ArgError> {
    match value {
        None => Ok(true),
        Some("false" | "no") => Ok(false),
        Some("true" | "yes") => Ok(true),
        Some(s) => Err(ArgError::InvalidBool(s.into())),
    }
}
/// Parse a required parameter for an option, either inline or as the next arg
pub fn parse_param(
    flag: &str, args: &mut impl Iterator<Item = String>, inline: Option<&str>
) -> Result<String, ArgError> {
    match inline {
        Some(v) => Ok(v.into()),
        None => args.next().ok_or_else(|| ArgError::MissingArg(flag.into())),
    }
}
/// Like [`parse_param`], for unsigned integers
pub fn parse_number(
    flag: &str, args: &mut impl Iterator<Item = String>, inline: Option<&str>
) -> Result<usize, ArgError> {
    let value = parse_param(flag, args, inline)?;
    value.parse().map_err(|_| ArgError::InvalidNumber(flag.into(), value))
}

/// Walk the arguments after argv[0], handing flags and positionals to callbacks.
///
/// Flags are `-name`, `-name=value` or `-name value` (the handler pulls the
/// value from the iterator). A bare `--` ends flag parsing. A handler
/// returning `Ok(None)` stops early (e.g. after printing help).
pub fn parse_args<I, F, P, E>(
    mut args: I,
    mut handle_flag: F,
    mut handle_pos: P,
) -> Result<Option<()>, E>
where
    I: Iterator<Item = String>,
    F: FnMut(&str, Option<&str>, &mut I, &str) -> Result<Option<()>, E>,
    P: FnMut(usize, String) -> Result<Option<()>, E>,
{
    let mut in_flags = true;
    let mut pos_index = 0;
    let arg0 = args.next().unwrap_or_else(|| "unknown".into());

    while let Some(arg) = args.next() {
        if in_flags && arg.starts_with('-') && arg.len() > 1 {
            let (flag, inline) = arg[1..].split_once('=').unzip();
            let flag = flag.unwrap_or(&arg[1..]);

            if flag == "-" && inline.is_none() {
                in_flags = false;
            } else {
                let res = handle_flag(flag, inline, &mut args, &arg0)?;
                if res.is_none() { return Ok(None); }
            }
        } else {
            let res = handle_pos(pos_index, arg)?;
            if res.is_none() { return Ok(None); }
            pos_index += 1;
        }
    }

    Ok(Some(()))
}
