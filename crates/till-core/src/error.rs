use std::fmt;

/// Machine-readable error codes for terminal and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Unauthenticated,
    SessionCorrupt,
    ConfigParseError,
    ValidationFailed,
    RequestFailed,
    ServerRejected,
    InvalidArgument,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Unauthenticated => "E1001",
            Self::SessionCorrupt => "E1002",
            Self::ConfigParseError => "E1003",
            Self::ValidationFailed => "E2001",
            Self::RequestFailed => "E3001",
            Self::ServerRejected => "E3002",
            Self::InvalidArgument => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Unauthenticated => "Not logged in",
            Self::SessionCorrupt => "Cached session is unreadable",
            Self::ConfigParseError => "Config file parse error",
            Self::ValidationFailed => "Local validation failed",
            Self::RequestFailed => "Request failed",
            Self::ServerRejected => "Server rejected the operation",
            Self::InvalidArgument => "Invalid argument",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint surfaced under the error message.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::Unauthenticated => Some("Run `till login` to start a session."),
            Self::SessionCorrupt => {
                Some("Run `till logout` to clear the cached session, then log in again.")
            }
            Self::ConfigParseError => Some("Fix syntax in till/config.toml and retry."),
            Self::ValidationFailed => Some("Correct the listed lines and resubmit."),
            Self::RequestFailed => {
                Some("Check the server address (TILL_API_URL) and retry manually.")
            }
            Self::ServerRejected | Self::InvalidArgument => None,
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 8] = [
        ErrorCode::Unauthenticated,
        ErrorCode::SessionCorrupt,
        ErrorCode::ConfigParseError,
        ErrorCode::ValidationFailed,
        ErrorCode::RequestFailed,
        ErrorCode::ServerRejected,
        ErrorCode::InvalidArgument,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let code = code.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }
}
