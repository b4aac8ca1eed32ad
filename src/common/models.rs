// Blog models shared between client and server
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id carried by placeholder entries. UUID-shaped, but deliberately not a valid UUID
/// so it can never collide with a stored entry.
pub const ERROR_ENTRY_ID: &str = "00000000-0000-0000-0000-00000000000";

pub const ERROR_ENTRY_TITLE: &str = "An error occurred";

/// One block of an entry body. The backend emits three kinds, told apart by their fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BlogSection {
    Header {
        #[serde(default)]
        ordinal: u32,
        level: u8,
        header: String,
    },
    Image {
        #[serde(default)]
        ordinal: u32,
        src: String,
        alt: String,
    },
    Text {
        #[serde(default)]
        ordinal: u32,
        text: String,
    },
}

impl BlogSection {
    pub fn text(ordinal: u32, text: impl Into<String>) -> Self {
        BlogSection::Text { ordinal, text: text.into() }
    }

    pub fn ordinal(&self) -> u32 {
        match self {
            BlogSection::Header { ordinal, .. }
            | BlogSection::Image { ordinal, .. }
            | BlogSection::Text { ordinal, .. } => *ordinal,
        }
    }

    /// Storage discriminator, see `server::database`.
    pub fn kind(&self) -> &'static str {
        match self {
            BlogSection::Header { .. } => "header",
            BlogSection::Image { .. } => "image",
            BlogSection::Text { .. } => "text",
        }
    }
}

/// What `/blog/newest` lists: an entry without its body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub id: String,
    pub publication_date: DateTime<Utc>,
    pub title: String,
    pub teaser: String,
}

/// A displayable blog entry. `id` stays a string: placeholder ids are not valid UUIDs.
/// Summaries decode into this type with an empty body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub id: String,
    pub publication_date: DateTime<Utc>,
    pub title: String,
    pub teaser: String,
    #[serde(default)]
    pub body: Vec<BlogSection>,
}

impl BlogEntry {
    pub fn summary(&self) -> BlogSummary {
        BlogSummary {
            id: self.id.clone(),
            publication_date: self.publication_date,
            title: self.title.clone(),
            teaser: self.teaser.clone(),
        }
    }

    /// Placeholder rendered in place of an entry that could not be fetched.
    pub fn placeholder(message: &str) -> Self {
        Self {
            id: ERROR_ENTRY_ID.to_string(),
            publication_date: Utc::now(),
            title: ERROR_ENTRY_TITLE.to_string(),
            teaser: message.to_string(),
            body: vec![BlogSection::text(0, message)],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == ERROR_ENTRY_ID
    }
}

/// Error body returned by the blog service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
