/// One question/answer pair served by the FAQ backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaqEntry {
    #[cfg_attr(feature = "serde", serde(default))]
    pub question: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub answer: String,
}

/// `{ "data": [...] }` envelope; a missing `data` means no entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaqResponse {
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Option<Vec<FaqEntry>>,
}

impl FaqResponse {
    pub fn into_entries(self) -> Vec<FaqEntry> {
        self.data.unwrap_or_default()
    }
}
