use std::path::PathBuf;

use sdl_check::ImportError;
use sdl_check_config::SdlCheckConfigError;

pub const USAGE: &str = "\
Usage: sdl_check <command> [...]

Commands:
  validate <file>... [--json]   check schema files for obvious mistakes
  parse <file> [--json]         print the type and input blocks of a valid schema
  help                          print this message

Use '-' as the file to read the schema from stdin.
Files that cannot be read are reported and skipped; the exit code is then 2.
The configuration file path can be set with SDL_CHECK_CONFIG_FILE_PATH.";

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}\n\n{usage}", usage = USAGE)]
    Usage(String),
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("{failed} of {total} files could not be checked")]
    Unchecked { failed: usize, total: usize },
    #[error("{0}")]
    InvalidInputConfig(String),
    #[error(transparent)]
    Config(#[from] SdlCheckConfigError),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_arg(arg: &str) -> Self {
        match arg {
            "-" => Input::Stdin,
            path => Input::File(PathBuf::from(path)),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Validate { inputs: Vec<Input>, json: bool },
    Parse { input: Input, json: bool },
    Help,
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = args
        .next()
        .ok_or_else(|| CliError::Usage("Missing command".to_string()))?;

    let mut json = false;
    let mut inputs = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("Unknown flag '{}'", flag)));
            }
            other => inputs.push(Input::from_arg(other)),
        }
    }

    match command.as_str() {
        "validate" => {
            if inputs.is_empty() {
                return Err(CliError::Usage(
                    "'validate' expects at least one file".to_string(),
                ));
            }
            Ok(Command::Validate { inputs, json })
        }
        "parse" => {
            if inputs.len() != 1 {
                return Err(CliError::Usage("'parse' expects exactly one file".to_string()));
            }
            let input = inputs.remove(0);
            Ok(Command::Parse { input, json })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(CliError::Usage(format!("Unknown command '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn validate_many_files() {
        let command = parse_args(args(&["validate", "a.graphql", "-", "b.gql"])).unwrap();
        assert_eq!(
            command,
            Command::Validate {
                inputs: vec![
                    Input::File("a.graphql".into()),
                    Input::Stdin,
                    Input::File("b.gql".into()),
                ],
                json: false,
            }
        );
    }

    #[test]
    fn json_flag_anywhere() {
        let command = parse_args(args(&["parse", "--json", "schema.graphql"])).unwrap();
        assert_eq!(
            command,
            Command::Parse {
                input: Input::File("schema.graphql".into()),
                json: true,
            }
        );
    }

    #[test]
    fn parse_needs_exactly_one_file() {
        assert!(matches!(
            parse_args(args(&["parse", "a.graphql", "b.graphql"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(parse_args(args(&["parse"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn unknown_command_and_flag() {
        let err = parse_args(args(&["lint", "a.graphql"])).unwrap_err();
        assert!(err.to_string().starts_with("Unknown command 'lint'"));

        let err = parse_args(args(&["validate", "--yaml", "a.graphql"])).unwrap_err();
        assert!(err.to_string().starts_with("Unknown flag '--yaml'"));
    }

    #[test]
    fn missing_command() {
        assert!(matches!(parse_args(Vec::new()), Err(CliError::Usage(_))));
    }

    #[test]
    fn help() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), Command::Help);
    }
}
