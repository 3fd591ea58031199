//! Builders for [`InlineKeyboardMarkup`] and signing of its callback data
use crate::api::types::*;
use crate::bot::callback_data::{CallbackDataCache, Resolution};
use crate::error::Result;
use tracing::{debug, trace};

/// Maximum buttons in one row before [`InlineKeyboardMarkup::add_button`] starts a new row
pub const MAX_BUTTONS_IN_ROW: usize = 8;

impl InlineKeyboardMarkup {
    /// # Create new [`InlineKeyboardMarkup`]
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }
    /// # Append row with buttons to [`InlineKeyboardMarkup`]
    pub fn add_row(mut self) -> Self {
        self.inline_keyboard.push(vec![]);
        self
    }
    /// # Append button to last row of [`InlineKeyboardMarkup`]
    /// Maximum buttons in row is 8. If row is full, add new row
    pub fn add_button(mut self, button: InlineKeyboardButton) -> Self {
        match self.inline_keyboard.last_mut() {
            Some(row) if row.len() < MAX_BUTTONS_IN_ROW => row.push(button),
            _ => self.inline_keyboard.push(vec![button]),
        }
        self
    }
    /// Buttons carrying `callback_data`
    pub fn callback_buttons(&self) -> impl Iterator<Item = &InlineKeyboardButton> {
        self.inline_keyboard
            .iter()
            .flatten()
            .filter(|b| b.callback_data.is_some())
    }
    /// # Replace every `callback_data` with a signed token
    ///
    /// Payloads are stored in `cache` bound to `chat_id`, the chat the
    /// keyboard is about to be sent to (`None` for inline messages).
    ///
    /// ## Errors
    /// - `BotError::CallbackData` - cache lock is poisoned
    pub fn sign_callback_data(
        mut self,
        cache: &CallbackDataCache,
        chat_id: Option<i64>,
    ) -> Result<Self> {
        for button in self.inline_keyboard.iter_mut().flatten() {
            if let Some(payload) = button.callback_data.take() {
                button.callback_data = Some(cache.sign(chat_id, payload)?);
            }
        }
        debug!("Signed callback data of keyboard for chat {:?}", chat_id);
        Ok(self)
    }
    /// # Put original payloads back in place of signed tokens
    ///
    /// Buttons whose token cannot be resolved keep the data as sent.
    /// Returns the number of resolved buttons.
    pub fn resolve_callback_data(&mut self, cache: &CallbackDataCache, chat_id: Option<i64>) -> usize {
        let mut resolved = 0;
        for button in self.inline_keyboard.iter_mut().flatten() {
            let Some(data) = button.callback_data.as_deref() else {
                continue;
            };
            match cache.resolve(data, chat_id) {
                Ok(Resolution::Found(payload)) => {
                    button.callback_data = Some(payload);
                    resolved += 1;
                }
                Ok(_) => {}
                Err(e) => trace!("Keeping button callback data as sent: {}", e),
            }
        }
        resolved
    }
}

impl InlineKeyboardButton {
    /// Create new [`InlineKeyboardButton`] with URL
    /// ## Parameters
    /// - `text`: [`String`] - Button text
    /// - `url`: [`String`] - URL
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineKeyboardButton {
            text: text.into(),
            url: Some(url.into()),
            ..Default::default()
        }
    }
    /// Create new [`InlineKeyboardButton`] with callback data
    /// ## Parameters
    /// - `text`: [`String`] - Button text
    /// - `cb`: [`String`] - Callback data
    pub fn cb(text: impl Into<String>, cb: impl Into<String>) -> Self {
        InlineKeyboardButton {
            text: text.into(),
            callback_data: Some(cb.into()),
            ..Default::default()
        }
    }
    /// Create new [`InlineKeyboardButton`] that launches the bot's game
    pub fn game(text: impl Into<String>) -> Self {
        InlineKeyboardButton {
            text: text.into(),
            callback_game: Some(CallbackGame {}),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::callback_data::TOKEN_LEN;

    #[test]
    fn test_keyboard_new_and_add_row() {
        let mut kb = InlineKeyboardMarkup::new();
        assert_eq!(kb.inline_keyboard.len(), 1);
        kb = kb.add_row();
        assert_eq!(kb.inline_keyboard.len(), 2);
    }

    #[test]
    fn test_keyboard_add_button_and_row_limits() {
        let mut kb = InlineKeyboardMarkup::new();
        let btn = InlineKeyboardButton::url("A", "http://a");
        for _ in 0..MAX_BUTTONS_IN_ROW {
            kb = kb.add_button(btn.clone());
        }
        assert_eq!(kb.inline_keyboard.len(), 1);
        assert_eq!(kb.inline_keyboard[0].len(), 8);
        kb = kb.add_button(btn);
        assert_eq!(kb.inline_keyboard.len(), 2);
        assert_eq!(kb.inline_keyboard[1].len(), 1);
    }

    #[test]
    fn test_keyboard_add_button_to_empty_markup() {
        let kb = InlineKeyboardMarkup {
            inline_keyboard: vec![],
        }
        .add_button(InlineKeyboardButton::cb("B", "cb"));
        assert_eq!(kb.inline_keyboard.len(), 1);
    }

    #[test]
    fn test_button_constructors() {
        let url = InlineKeyboardButton::url("Link", "http://link");
        assert_eq!(url.url.as_deref(), Some("http://link"));
        assert!(url.callback_data.is_none());
        let cb = InlineKeyboardButton::cb("CB", "data");
        assert_eq!(cb.callback_data.as_deref(), Some("data"));
        assert!(cb.url.is_none());
        let game = InlineKeyboardButton::game("Play");
        assert_eq!(game.callback_game, Some(CallbackGame {}));
    }

    #[test]
    fn test_sign_and_resolve_keyboard() {
        let cache = CallbackDataCache::new("secret", 16, true);
        let payload = "x".repeat(200);
        let kb = InlineKeyboardMarkup::new()
            .add_button(InlineKeyboardButton::cb("long", payload.clone()))
            .add_button(InlineKeyboardButton::url("link", "http://a"))
            .add_row()
            .add_button(InlineKeyboardButton::cb("short", "s"));

        let mut signed = kb.clone().sign_callback_data(&cache, Some(5)).unwrap();
        assert_eq!(cache.len(), 2);
        for button in signed.callback_buttons() {
            assert_eq!(button.callback_data.as_ref().map(String::len), Some(TOKEN_LEN));
        }
        assert!(signed.inline_keyboard[0][1].callback_data.is_none());

        assert_eq!(signed.resolve_callback_data(&cache, Some(5)), 2);
        assert_eq!(signed, kb);
    }

    #[test]
    fn test_resolve_keyboard_keeps_unresolvable_buttons() {
        let cache = CallbackDataCache::new("secret", 16, true);
        let mut signed = InlineKeyboardMarkup::new()
            .add_button(InlineKeyboardButton::cb("a", "a"))
            .sign_callback_data(&cache, Some(5))
            .unwrap();
        let token = signed.inline_keyboard[0][0].callback_data.clone();
        // wrong chat
        assert_eq!(signed.resolve_callback_data(&cache, Some(6)), 0);
        assert_eq!(signed.inline_keyboard[0][0].callback_data, token);
    }
}
