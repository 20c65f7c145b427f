//! Payload records carried by notifications

/// Where a chat message should appear on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Normal,
    Status1,
    Status2,
    Status3,
    BottomRight1,
    BottomRight2,
    BottomRight3,
    Announcement,
    ClientStatus1,
    ClientStatus2,
}

/// A chat message, rewritable by subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    /// Raw text including `&x` colour codes
    pub text: String,
    pub kind: MessageType,
}

impl ChatEvent {
    pub fn new(text: impl Into<String>, kind: MessageType) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// A texture-pack file was replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEvent {
    /// File name inside the pack, without directory (e.g. "snow.png")
    pub name: String,
    /// Raw file contents
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourCodeEvent {
    pub code: char,
}
