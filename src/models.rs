use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A multiple-choice question generated by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl Mcq {
    pub fn is_valid(&self) -> bool {
        self.correct_answer < self.options.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// A processed document and the study material generated from it.
/// Write-once: built from a backend response and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub document_id: String,
    pub filename: String,
    #[serde(default)]
    pub mcqs: Vec<Mcq>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,
}

impl Document {
    /// Index of the first question whose `correct_answer` does not point into its options.
    pub fn first_invalid_mcq(&self) -> Option<usize> {
        self.mcqs.iter().position(|mcq| !mcq.is_valid())
    }
}

/// Entry of the backend's document listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub upload_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(rename = "type")]
    pub role: ChatRole,
    pub message: String,
}

impl ChatTurn {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            message: message.into(),
        }
    }

    pub fn ai(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Ai,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Health,
    Upload {
        path: PathBuf,
    },
    Chat {
        document_id: String,
        message: String,
    },
    ListDocuments,
    OpenDocument {
        summary: DocumentSummary,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Health {
        online: bool,
    },
    Uploaded(Result<Document, String>),
    ChatReply {
        document_id: String,
        result: Result<String, String>,
    },
    Documents(Result<Vec<DocumentSummary>, String>),
    Opened(Result<(Document, Vec<ChatTurn>), String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Upload,
    Library,
    Study,
    ResetConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Quiz,
    Flashcards,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Quiz, Tab::Flashcards, Tab::Chat];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Quiz => "Quiz",
            Tab::Flashcards => "Flashcards",
            Tab::Chat => "AI Tutor",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Quiz => 0,
            Tab::Flashcards => 1,
            Tab::Chat => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}
