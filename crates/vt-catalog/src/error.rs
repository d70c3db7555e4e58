//! Catalog error type.

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    /// Database could not be reached or the pool is closed.
    Unavailable,
    /// Waiting for a connection timed out.
    Timeout,
    /// A stored row could not be turned into a record.
    InvalidRecord,
    /// Connection settings are wrong.
    Configuration,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance.
#[derive(Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Don't retry (bad configuration, malformed data).
    #[default]
    Permanent,
    /// Retry immediately (pool timeout, connection reset).
    Temporary,
    /// Retry with backoff (database unavailable).
    Persistent,
}

/// Catalog error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct CatalogError {
    /// Semantic error category.
    pub kind: CatalogErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Slug being looked up (if applicable).
    pub slug: Option<String>,
    /// Backend identifier (e.g., "Sqlite", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CatalogError {
    /// Create a new catalog error.
    #[must_use]
    pub fn new(kind: CatalogErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            slug: None,
            backend: None,
            source: None,
        }
    }

    /// Attach slug context.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Whether retrying the same lookup may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.status != ErrorStatus::Permanent
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, status) = match &err {
            sqlx::Error::PoolTimedOut => (CatalogErrorKind::Timeout, ErrorStatus::Temporary),
            sqlx::Error::Io(_) => (CatalogErrorKind::Unavailable, ErrorStatus::Temporary),
            sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
                (CatalogErrorKind::Unavailable, ErrorStatus::Persistent)
            }
            sqlx::Error::Configuration(_) => {
                (CatalogErrorKind::Configuration, ErrorStatus::Permanent)
            }
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => (CatalogErrorKind::InvalidRecord, ErrorStatus::Permanent),
            _ => (CatalogErrorKind::Other, ErrorStatus::Permanent),
        };
        Self::new(kind).with_status(status).with_source(err)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (slug: foo)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            CatalogErrorKind::Unavailable => "Unavailable",
            CatalogErrorKind::Timeout => "Timeout",
            CatalogErrorKind::InvalidRecord => "Invalid record",
            CatalogErrorKind::Configuration => "Configuration error",
            CatalogErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(slug) = &self.slug {
            write!(f, " (slug: {slug})")?;
        }

        Ok(())
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}
