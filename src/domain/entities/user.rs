use std::fmt;

/// A platform user, either the invoking member or the one being quoted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub is_bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            avatar_url: None,
            is_bot: false,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn with_bot(mut self, is_bot: bool) -> Self {
        self.is_bot = is_bot;
        self
    }

    /// `<@id>`, rendered by Discord as a ping
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// `@username`, used for embed attribution
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.id)?;
        if self.is_bot {
            write!(f, " [bot]")?;
        }
        Ok(())
    }
}
