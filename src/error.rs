use derive_more::Display;

pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error type. User-facing messages live in the `Display` impls;
/// the TUI shows them in the status banner and the CLI prints them as-is.
#[derive(Debug, Display)]
pub enum Error {
    #[display("Please paste a YouTube URL first.")]
    EmptyUrl,

    #[display("Invalid YouTube URL. Please check and try again.")]
    InvalidUrl,

    #[display("Transcripts are disabled for this video.")]
    TranscriptsDisabled,

    #[display("No transcript found for this video.")]
    NoTranscriptFound,

    /// Unclassified transcript-provider failure, surfaced verbatim.
    #[display("{_0}")]
    Provider(String),

    #[display("Model request failed: {_0}")]
    OpenAi(async_openai::error::OpenAIError),

    #[display("IO error: {_0}")]
    Io(std::io::Error),

    #[display("{_0}")]
    Custom(String),
}

impl Error {
    pub fn custom(message: impl Into<String>) -> Self {
        Error::Custom(message.into())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenAi(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<async_openai::error::OpenAIError> for Error {
    fn from(e: async_openai::error::OpenAIError) -> Self {
        Error::OpenAi(e)
    }
}
