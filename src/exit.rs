use std::fmt;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    InvalidArgs,
    ScanFailed,
    BackendUnreachable,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::InvalidArgs => 2,
            ExitCode::ScanFailed => 10,
            ExitCode::BackendUnreachable => 20,
        }
    }
}

#[derive(Debug)]
pub struct ExitError {
    pub code: ExitCode,
    pub err: anyhow::Error,
}

impl ExitError {
    pub fn new(code: ExitCode, err: anyhow::Error) -> Self {
        Self { code, err }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.err.fmt(f)
    }
}

impl std::error::Error for ExitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.err.as_ref())
    }
}

pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(exit) = err.downcast_ref::<ExitError>() {
        return exit.code.as_i32();
    }
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return api_exit_code(api).as_i32();
    }
    ExitCode::ScanFailed.as_i32()
}

pub fn api_exit_code(err: &ApiError) -> ExitCode {
    match err {
        ApiError::Unreachable { .. } => ExitCode::BackendUnreachable,
        ApiError::Detail { .. } | ApiError::Failed { .. } => ExitCode::ScanFailed,
    }
}

pub fn invalid_args(message: impl Into<String>) -> anyhow::Error {
    ExitError::new(ExitCode::InvalidArgs, anyhow::anyhow!(message.into())).into()
}

pub fn invalid_args_err(err: anyhow::Error) -> anyhow::Error {
    ExitError::new(ExitCode::InvalidArgs, err).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_distinct_codes() {
        let unreachable: anyhow::Error = ApiError::Unreachable {
            reason: "connection refused".to_string(),
        }
        .into();
        assert_eq!(exit_code(&unreachable), 20);

        let detail: anyhow::Error = ApiError::Detail {
            status: 422,
            message: "URL tidak valid".to_string(),
        }
        .into();
        assert_eq!(exit_code(&detail), 10);

        assert_eq!(exit_code(&invalid_args("bad")), 2);
    }
}
