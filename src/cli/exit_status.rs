use std::process::ExitCode;

/// Process exit status for weft commands.
///
/// - `Success` (0): pass completed, nothing at error severity
/// - `Failure` (1): pass completed but produced error-severity issues
/// - `Error` (2): the command itself failed (bad config, unreadable catalog)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Status for a completed pass with `error_count` error-severity issues.
    pub fn from_error_count(error_count: usize) -> Self {
        if error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values() {
        let render = |code: ExitCode| format!("{:?}", code);
        assert_eq!(
            render(ExitCode::from(ExitStatus::Success)),
            render(ExitCode::from(0))
        );
        assert_eq!(
            render(ExitCode::from(ExitStatus::Failure)),
            render(ExitCode::from(1))
        );
        assert_eq!(
            render(ExitCode::from(ExitStatus::Error)),
            render(ExitCode::from(2))
        );
    }

    #[test]
    fn error_count_maps_to_status() {
        assert_eq!(ExitStatus::from_error_count(0), ExitStatus::Success);
        assert_eq!(ExitStatus::from_error_count(2), ExitStatus::Failure);
    }
}
