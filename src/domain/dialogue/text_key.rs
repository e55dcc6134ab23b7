//! Keys into the text/config resolver.
//!
//! Localized keys are `<PREFIX>_<LANG>` (e.g. `MAIN_MESSAGE_UZ`); a few keys
//! are language-independent.

use std::fmt;

use crate::domain::customer::Language;

/// Text that exists once per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalizedText {
    LanguagesPrompt,
    PhonePrompt,
    SharePhoneButton,
    MainPrompt,
    MenuButton,
    SettingsButton,
    AddressPrompt,
    ShareLocationButton,
    NotInDeliveryZone,
    AddressNotResolved,
    DeliveryTypePrompt,
    DeliveryButton,
    PickupButton,
    WebAppPrompt,
    WebAppButton,
    ToMainButton,
    SettingsPrompt,
    EditLanguageButton,
    EditPhoneButton,
    BackButton,
    Welcome,
}

impl LocalizedText {
    fn prefix(&self) -> &'static str {
        match self {
            LocalizedText::LanguagesPrompt => "LANGUAGES_MESSAGE",
            LocalizedText::PhonePrompt => "PHONE_MESSAGE",
            LocalizedText::SharePhoneButton => "SET_PHONE",
            LocalizedText::MainPrompt => "MAIN_MESSAGE",
            LocalizedText::MenuButton => "MENU_BUTTON",
            LocalizedText::SettingsButton => "SETTINGS_BUTTON",
            LocalizedText::AddressPrompt => "ADDRESS_MESSAGE",
            LocalizedText::ShareLocationButton => "SET_ADDRESS_BUTTON",
            LocalizedText::NotInDeliveryZone => "NOT_IN_DELIVERY_ZONE",
            LocalizedText::AddressNotResolved => "ADDRESS_NOT_RESOLVED",
            LocalizedText::DeliveryTypePrompt => "DELIVERY_TYPE_MESSAGE",
            LocalizedText::DeliveryButton => "DELIVERY_BUTTON",
            LocalizedText::PickupButton => "PICKUP_BUTTON",
            LocalizedText::WebAppPrompt => "WEB_APP_MESSAGE",
            LocalizedText::WebAppButton => "WEB_APP_BUTTON",
            LocalizedText::ToMainButton => "TO_MAIN_BUTTON",
            LocalizedText::SettingsPrompt => "SETTINGS_MESSAGE",
            LocalizedText::EditLanguageButton => "EDIT_LANGUAGE_BUTTON",
            LocalizedText::EditPhoneButton => "EDIT_PHONE_BUTTON",
            LocalizedText::BackButton => "GET_BACK_BUTTON",
            LocalizedText::Welcome => "WELCOME_MESSAGE",
        }
    }

    pub fn in_language(self, language: Language) -> TextKey {
        TextKey::Localized(self, language)
    }
}

/// A resolvable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    /// Language prompt shown before any language is known.
    InitialLanguagesPrompt,
    /// Label of the button selecting a language.
    LanguageButton(Language),
    /// Base URL of the web menu.
    WebAppUrl,
    /// Boolean switch for the one-time welcome message.
    WelcomeBonusOn,
    Localized(LocalizedText, Language),
}

impl TextKey {
    pub fn as_key(&self) -> String {
        match self {
            TextKey::InitialLanguagesPrompt => "LANGUAGES_MESSAGE".to_string(),
            TextKey::LanguageButton(language) => format!("LANGUAGE_BUTTON_{}", language.key_suffix()),
            TextKey::WebAppUrl => "WEB_APP_URL".to_string(),
            TextKey::WelcomeBonusOn => "WELCOME_BONUS_ON".to_string(),
            TextKey::Localized(text, language) => format!("{}_{}", text.prefix(), language.key_suffix()),
        }
    }
}

impl fmt::Display for TextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}
