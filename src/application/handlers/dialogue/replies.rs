//! Outbound messages for each step.
//!
//! Every prompt pairs a body text with reply controls. Controls whose label
//! is not configured are left out.

use url::Url;

use crate::domain::customer::{Address, Language};
use crate::domain::dialogue::{Control, ControlRow, LocalizedText, OutboundMessage, TextKey};
use crate::domain::foundation::CustomerId;

use super::texts::Texts;

/// One control per row, skipping unconfigured labels.
fn column(controls: impl IntoIterator<Item = Option<Control>>) -> Vec<ControlRow> {
    controls.into_iter().flatten().map(|c| vec![c]).collect()
}

impl Texts {
    async fn reply_button(&self, text: LocalizedText, language: Language) -> Option<Control> {
        self.label(text.in_language(language)).await.map(Control::reply)
    }

    async fn back_button(&self, language: Language) -> Option<Control> {
        self.reply_button(LocalizedText::BackButton, language).await
    }

    /// Language picker. `None` is the first-contact prompt.
    pub(crate) async fn language_prompt(&self, language: Option<Language>) -> OutboundMessage {
        let body = match language {
            None => self.body(TextKey::InitialLanguagesPrompt).await,
            Some(language) => self.body(LocalizedText::LanguagesPrompt.in_language(language)).await,
        };

        let mut buttons = Vec::with_capacity(Language::ALL.len());
        for candidate in Language::ALL {
            buttons.push(self.label(TextKey::LanguageButton(candidate)).await.map(Control::reply));
        }

        OutboundMessage::with_controls(body, column(buttons))
    }

    /// Language whose button label equals `input`.
    pub(crate) async fn language_for(&self, input: &str) -> Option<Language> {
        for candidate in Language::ALL {
            if self.matches(TextKey::LanguageButton(candidate), input).await {
                return Some(candidate);
            }
        }
        None
    }

    pub(crate) async fn phone_prompt(&self, language: Language, with_back: bool) -> OutboundMessage {
        let body = self.body(LocalizedText::PhonePrompt.in_language(language)).await;
        let share = self
            .label(LocalizedText::SharePhoneButton.in_language(language))
            .await
            .map(Control::request_contact);
        let back = if with_back {
            self.back_button(language).await
        } else {
            None
        };
        OutboundMessage::with_controls(body, column([share, back]))
    }

    pub(crate) async fn main_menu(&self, language: Language) -> OutboundMessage {
        let body = self.body(LocalizedText::MainPrompt.in_language(language)).await;
        let menu = self.reply_button(LocalizedText::MenuButton, language).await;
        let settings = self.reply_button(LocalizedText::SettingsButton, language).await;
        OutboundMessage::with_controls(body, column([menu, settings]))
    }

    /// Saved addresses (newest first), then location sharing, then back.
    pub(crate) async fn address_list(&self, language: Language, addresses: &[Address]) -> OutboundMessage {
        let body = self.body(LocalizedText::AddressPrompt.in_language(language)).await;

        let mut controls: Vec<Option<Control>> = addresses
            .iter()
            .map(|address| Some(Control::reply(address.value.clone())))
            .collect();
        controls.push(
            self.label(LocalizedText::ShareLocationButton.in_language(language))
                .await
                .map(Control::request_location),
        );
        controls.push(self.back_button(language).await);

        OutboundMessage::with_controls(body, column(controls))
    }

    pub(crate) async fn delivery_type_prompt(&self, language: Language) -> OutboundMessage {
        let body = self.body(LocalizedText::DeliveryTypePrompt.in_language(language)).await;
        let delivery = self.reply_button(LocalizedText::DeliveryButton, language).await;
        let pickup = self.reply_button(LocalizedText::PickupButton, language).await;
        let back = self.back_button(language).await;
        OutboundMessage::with_controls(body, column([delivery, pickup, back]))
    }

    /// Handoff to the web menu, with `customer_id` and `language` query parameters.
    pub(crate) async fn web_app_prompt(&self, language: Language, customer_id: CustomerId) -> OutboundMessage {
        let body = self.body(LocalizedText::WebAppPrompt.in_language(language)).await;

        let open = match (
            self.label(LocalizedText::WebAppButton.in_language(language)).await,
            self.url(TextKey::WebAppUrl).await,
        ) {
            (Some(label), Some(base)) => Some(Control::open_url(label, web_app_url(base, customer_id, language))),
            _ => None,
        };
        let back = self.back_button(language).await;
        let to_main = self.reply_button(LocalizedText::ToMainButton, language).await;

        OutboundMessage::with_controls(body, column([open, back, to_main]))
    }

    pub(crate) async fn settings_menu(&self, language: Language) -> OutboundMessage {
        let body = self.body(LocalizedText::SettingsPrompt.in_language(language)).await;
        let edit_language = self.reply_button(LocalizedText::EditLanguageButton, language).await;
        let edit_phone = self.reply_button(LocalizedText::EditPhoneButton, language).await;
        let back = self.back_button(language).await;
        OutboundMessage::with_controls(body, column([edit_language, edit_phone, back]))
    }

    /// Body-only reply; the keyboard already shown stays.
    pub(crate) async fn notice(&self, text: LocalizedText, language: Language) -> OutboundMessage {
        OutboundMessage::text(self.body(text.in_language(language)).await)
    }
}

pub(crate) fn web_app_url(mut base: Url, customer_id: CustomerId, language: Language) -> Url {
    base.query_pairs_mut()
        .append_pair("customer_id", &customer_id.to_string())
        .append_pair("language", language.code());
    base
}
