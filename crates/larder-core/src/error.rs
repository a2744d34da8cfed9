use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for script-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    CatalogNotFound,
    CatalogParseError,
    UnsupportedCatalogFormat,
    ConfigParseError,
    RecipeNotFound,
    IngredientNotFound,
    StorageIo,
    LockContention,
    ExportFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CatalogNotFound => "E1001",
            Self::CatalogParseError => "E1002",
            Self::UnsupportedCatalogFormat => "E1003",
            Self::ConfigParseError => "E1004",
            Self::RecipeNotFound => "E2001",
            Self::IngredientNotFound => "E2002",
            Self::StorageIo => "E3001",
            Self::LockContention => "E3002",
            Self::ExportFailed => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CatalogNotFound => "Recipe catalog not found",
            Self::CatalogParseError => "Recipe catalog parse error",
            Self::UnsupportedCatalogFormat => "Unsupported catalog format",
            Self::ConfigParseError => "Config file parse error",
            Self::RecipeNotFound => "Recipe not found",
            Self::IngredientNotFound => "Ingredient not on the grocery list",
            Self::StorageIo => "Planner storage I/O failure",
            Self::LockContention => "Lock contention",
            Self::ExportFailed => "Export failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::CatalogNotFound => {
                Some("Pass --catalog <PATH> or set `catalog` in .larder/config.toml.")
            }
            Self::CatalogParseError => Some("Fix the catalog document and retry."),
            Self::UnsupportedCatalogFormat => Some("Use a .md, .json, or .toml catalog."),
            Self::ConfigParseError => Some("Fix syntax in .larder/config.toml and retry."),
            Self::RecipeNotFound => Some("Run `larder recipes` to list recipe ids."),
            Self::IngredientNotFound => Some("Run `larder groceries` to list current items."),
            Self::StorageIo => Some("Check disk space and write permissions for the store file."),
            Self::LockContention => {
                Some("Retry after the other `larder` process releases its lock.")
            }
            Self::ExportFailed => Some("Check the destination and retry the export."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced by larder-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("catalog not found at {}", path.display())]
    CatalogNotFound { path: PathBuf },

    #[error("failed to parse catalog {}: {reason}", path.display())]
    CatalogParse { path: PathBuf, reason: String },

    #[error("unsupported catalog format for {}", path.display())]
    UnsupportedCatalogFormat { path: PathBuf },

    #[error("no recipe matches '{0}'")]
    RecipeNotFound(String),

    #[error("'{0}' is not on the current grocery list")]
    IngredientNotFound(String),

    #[error("storage I/O failed at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lock(#[from] crate::lock::LockError),

    #[error("export failed: {0}")]
    Export(String),

    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::CatalogNotFound { .. } => ErrorCode::CatalogNotFound,
            Self::CatalogParse { .. } => ErrorCode::CatalogParseError,
            Self::UnsupportedCatalogFormat { .. } => ErrorCode::UnsupportedCatalogFormat,
            Self::RecipeNotFound(_) => ErrorCode::RecipeNotFound,
            Self::IngredientNotFound(_) => ErrorCode::IngredientNotFound,
            Self::Storage { .. } => ErrorCode::StorageIo,
            Self::Lock(err) => err.code(),
            Self::Export(_) => ErrorCode::ExportFailed,
            Self::Encode(_) => ErrorCode::InternalUnexpected,
        }
    }

    /// Remediation text for this error, falling back to the code summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::{Error, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::CatalogNotFound,
            ErrorCode::CatalogParseError,
            ErrorCode::UnsupportedCatalogFormat,
            ErrorCode::ConfigParseError,
            ErrorCode::RecipeNotFound,
            ErrorCode::IngredientNotFound,
            ErrorCode::StorageIo,
            ErrorCode::LockContention,
            ErrorCode::ExportFailed,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::RecipeNotFound.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn recipe_not_found_carries_hint() {
        let err = Error::RecipeNotFound("soup".into());
        assert_eq!(err.error_code(), ErrorCode::RecipeNotFound);
        assert!(err.suggestion().contains("larder recipes"));
        assert_eq!(err.to_string(), "no recipe matches 'soup'");
    }
}
