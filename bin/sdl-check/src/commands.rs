use std::fs;
use std::io::{Read, Write};

use sdl_check::{ImportPolicy, ParsedType, SchemaSession, SchemaSource, ValidationResult};
use sdl_check_config::{input::InputConfig, SdlCheckConfig};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::cli::{CliError, Command, Input};

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<&'a ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    types: Option<Option<&'a [ParsedType]>>,
}

impl<'a> FileReport<'a> {
    fn for_validation(file: &'a str, loaded: &'a Result<SchemaSession, CliError>) -> Self {
        let (validation, error) = match loaded {
            Ok(session) => (Some(session.validation()), None),
            Err(err) => (None, Some(err.to_string())),
        };

        Self {
            file,
            validation,
            error,
            types: None,
        }
    }
}

pub fn import_policy(config: &InputConfig) -> Result<ImportPolicy, CliError> {
    let max_bytes = config
        .max_file_size_bytes()
        .map_err(CliError::InvalidInputConfig)?;

    Ok(ImportPolicy::new(&config.allowed_extensions, Some(max_bytes)))
}

/// Runs `command` and reports whether every checked schema was valid.
pub fn run(command: Command, config: &SdlCheckConfig, out: &mut impl Write) -> Result<bool, CliError> {
    let policy = import_policy(&config.input)?;

    match command {
        Command::Validate { inputs, json } => run_validate(&inputs, &policy, json, out),
        Command::Parse { input, json } => run_parse(&input, &policy, json, out),
        Command::Help => {
            writeln!(out, "{}", crate::cli::USAGE)?;
            Ok(true)
        }
    }
}

pub fn exit_code(outcome: &Result<bool, CliError>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

/// Checks every input, even after one of them failed to load. Load failures
/// are reported next to the other files and turn the outcome into
/// [`CliError::Unchecked`] once everything has been written.
fn run_validate(
    inputs: &[Input],
    policy: &ImportPolicy,
    json: bool,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let loaded: Vec<(String, Result<SchemaSession, CliError>)> = inputs
        .iter()
        .map(|input| {
            let name = input.display_name();
            let session = load_session(input, policy);
            if let Err(err) = &session {
                error!(file = %name, "{}", err);
            }
            (name, session)
        })
        .collect();

    if json {
        let reports: Vec<FileReport> = loaded
            .iter()
            .map(|(name, session)| FileReport::for_validation(name, session))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
    } else {
        for (name, session) in &loaded {
            match session {
                Ok(session) => write_validation(out, name, session.validation())?,
                Err(err) => writeln!(out, "{}: error: {}", name, err)?,
            }
        }
    }

    let total = loaded.len();
    let failed = loaded.iter().filter(|(_, session)| session.is_err()).count();
    let all_valid = loaded
        .iter()
        .all(|(_, session)| session.as_ref().is_ok_and(|session| session.is_valid()));

    info!(files = total, failed, all_valid, "validation finished");

    if failed > 0 {
        return Err(CliError::Unchecked { failed, total });
    }

    Ok(all_valid)
}

fn run_parse(
    input: &Input,
    policy: &ImportPolicy,
    json: bool,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let name = input.display_name();
    let session = load_session(input, policy)?;

    write_parse(out, &name, &session, json)?;

    Ok(session.is_valid())
}

pub fn write_validation(
    out: &mut impl Write,
    name: &str,
    validation: &ValidationResult,
) -> Result<(), CliError> {
    if validation.is_valid() {
        writeln!(out, "{}: ok", name)?;
        return Ok(());
    }

    writeln!(out, "{}: invalid", name)?;
    for issue in validation.errors() {
        writeln!(out, "  - {}", issue)?;
    }

    Ok(())
}

/// Extracted types are only printed for valid schemas; otherwise the
/// validation errors are printed instead (and `types` is `null` in JSON).
pub fn write_parse(
    out: &mut impl Write,
    name: &str,
    session: &SchemaSession,
    json: bool,
) -> Result<(), CliError> {
    if json {
        let report = FileReport {
            file: name,
            validation: Some(session.validation()),
            error: None,
            types: Some(
                session
                    .trusted_types()
                    .map(|schema| schema.types.as_slice()),
            ),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    match session.trusted_types() {
        Some(types) => write!(out, "{}", types)?,
        None => write_validation(out, name, session.validation())?,
    }

    Ok(())
}

fn load_session(input: &Input, policy: &ImportPolicy) -> Result<SchemaSession, CliError> {
    match input {
        Input::Stdin => read_session(&input.display_name(), std::io::stdin().lock()),
        Input::File(path) => {
            let file_name = input.display_name();
            let read_error = |source| CliError::Read {
                path: file_name.clone(),
                source,
            };

            // Reject by size before reading the whole file.
            let size = fs::metadata(path).map_err(read_error)?.len();
            policy.check(&file_name, size)?;

            let contents = fs::read_to_string(path).map_err(read_error)?;
            debug!(file = %file_name, bytes = contents.len(), "schema file read");

            let mut session = SchemaSession::new();
            let validation = session.import_file(&file_name, contents, policy)?;
            if !validation.is_valid() {
                warn!(file = %file_name, errors = ?validation.messages(), "schema is invalid");
            }

            Ok(session)
        }
    }
}

/// Text piped in is treated like typed text: no extension or size rules.
fn read_session(name: &str, mut reader: impl Read) -> Result<SchemaSession, CliError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| CliError::Read {
            path: name.to_string(),
            source,
        })?;
    debug!(input = name, bytes = text.len(), "schema read");

    Ok(SchemaSession::with_text(text, SchemaSource::Manual))
}
