//! Plain-text result card for sharing a profile in a chat.

use crate::profile::Profile;
use crate::questionnaire::Questionnaire;

const TELEGRAM_SHARE_ENDPOINT: &str = "https://t.me/share/url";

pub fn share_text(questionnaire: &Questionnaire, profile: &Profile, bot_handle: &str) -> String {
    let primary = profile.primary.as_ref();
    let definition = primary.and_then(|entry| questionnaire.type_definition(&entry.key));

    let type_name = match primary {
        Some(entry) => questionnaire.type_name(&entry.key),
        None => "My type",
    };

    let disc = definition
        .and_then(|definition| definition.disc.as_ref())
        .filter(|disc| !disc.code.is_empty())
        .map(|disc| format!("{} - {}", disc.code, disc.label))
        .unwrap_or_default();
    let jung = definition
        .and_then(|definition| definition.jung.as_ref())
        .map(|jung| jung.label.clone())
        .unwrap_or_default();
    let archetype = definition
        .and_then(|definition| definition.archetype.clone())
        .unwrap_or_default();

    let meta = [disc, jung, archetype]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");

    let secondary = match &profile.secondary {
        Some(entry) => format!(
            "\nSecondary vector: {} ({}%)",
            questionnaire.type_name(&entry.key),
            entry.percentage
        ),
        None => String::new(),
    };

    format!("My seller type: {type_name}\n{meta}{secondary}\n\nTry the bot: {bot_handle}")
}

/// Telegram share link carrying `origin` as the URL and `text` as the message.
pub fn share_url(origin: &str, text: &str) -> String {
    format!(
        "{TELEGRAM_SHARE_ENDPOINT}?url={}&text={}",
        urlencoding::encode(origin),
        urlencoding::encode(text)
    )
}
