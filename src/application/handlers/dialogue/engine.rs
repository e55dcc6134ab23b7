//! DialogueEngine - drives one user's ordering conversation per inbound event.
//!
//! The engine is constructed explicitly with its collaborators and holds no
//! per-user state of its own: the current step lives in the
//! `DialogueStateStore`, profile fields in the relational repositories.
//! Each call to [`DialogueEngine::handle`] is independent, so many events can
//! be processed concurrently.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::customer::{Coordinates, Customer, DeliveryMode, Language, NewAddress};
use crate::domain::delivery::{normalize_address, GeoPoint, Geofence};
use crate::domain::dialogue::{DialogueState, InboundEvent, LocalizedText, OutboundMessage, Step, TextKey};
use crate::domain::foundation::{ChatId, DomainError, ExternalUserId, StateMachine, ValidationError};
use crate::ports::{
    AddressRepository, CustomerRepository, DeliveryZoneReader, DialogueStateStore, Notifier,
    ReverseGeocoder, StateStoreError, TextResolver,
};

use super::texts::Texts;

/// Language used when a customer past language selection has none stored.
const FALLBACK_LANGUAGE: Language = Language::Ru;

/// Default bound on a reverse-geocoding call.
pub const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures that abort an event.
///
/// Recoverable conditions (geofence miss, geocoder failure) never surface
/// here; they become replies. Anything in this enum means the event was not
/// applied and should be redelivered.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("Dialogue state store failed: {0}")]
    StateStore(#[from] StateStoreError),

    #[error("Repository failed: {0}")]
    Repository(#[from] DomainError),

    #[error("Illegal dialogue transition: {0}")]
    Transition(#[from] ValidationError),
}

/// What happened to one event.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueOutcome {
    /// `None` when the event was silently ignored.
    pub reply: Option<OutboundMessage>,
    /// Persisted step after the event; `None` when no state is stored.
    pub step: Option<Step>,
}

impl DialogueOutcome {
    fn ignored(step: Option<Step>) -> Self {
        Self { reply: None, step }
    }

    fn replied(reply: OutboundMessage, step: Step) -> Self {
        Self {
            reply: Some(reply),
            step: Some(step),
        }
    }
}

/// Everything the engine talks to.
#[derive(Clone)]
pub struct DialogueCollaborators {
    pub state_store: Arc<dyn DialogueStateStore>,
    pub customers: Arc<dyn CustomerRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub zones: Arc<dyn DeliveryZoneReader>,
    pub texts: Arc<dyn TextResolver>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub notifier: Arc<dyn Notifier>,
}

/// The conversational ordering state machine.
pub struct DialogueEngine {
    store: Arc<dyn DialogueStateStore>,
    customers: Arc<dyn CustomerRepository>,
    addresses: Arc<dyn AddressRepository>,
    zones: Arc<dyn DeliveryZoneReader>,
    texts: Texts,
    geocoder: Arc<dyn ReverseGeocoder>,
    notifier: Arc<dyn Notifier>,
    geocode_timeout: Duration,
}

/// Per-event context once the user's state and customer row are loaded.
struct Turn {
    user_id: ExternalUserId,
    state: DialogueState,
    customer: Customer,
}

impl Turn {
    fn language(&self) -> Language {
        self.customer.language.unwrap_or(FALLBACK_LANGUAGE)
    }

    fn ignore(&self) -> DialogueOutcome {
        DialogueOutcome::ignored(Some(self.state.step))
    }
}

impl DialogueEngine {
    pub fn new(collaborators: DialogueCollaborators) -> Self {
        Self {
            store: collaborators.state_store,
            customers: collaborators.customers,
            addresses: collaborators.addresses,
            zones: collaborators.zones,
            texts: Texts::new(collaborators.texts),
            geocoder: collaborators.geocoder,
            notifier: collaborators.notifier,
            geocode_timeout: DEFAULT_GEOCODE_TIMEOUT,
        }
    }

    /// Override the reverse-geocoding bound.
    pub fn with_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }

    /// Apply one inbound event.
    ///
    /// # Errors
    ///
    /// Returns `DialogueError` when a store or repository is unavailable. No
    /// step change is persisted in that case.
    #[tracing::instrument(skip_all, fields(user_id = %event.user_id(), kind = event.kind()))]
    pub async fn handle(&self, event: InboundEvent) -> Result<DialogueOutcome, DialogueError> {
        if let InboundEvent::Start { user_id, chat_id } = event {
            return self.start(user_id, chat_id).await;
        }

        let user_id = event.user_id();

        // 1. Load the step; users without one must send start first
        let Some(state) = self.store.get(user_id).await? else {
            tracing::debug!("No dialogue state; ignoring event");
            return Ok(DialogueOutcome::ignored(None));
        };

        // 2. Load the customer; a dangling state is dropped
        let Some(customer) = self.customers.find_by_external_id(user_id).await? else {
            tracing::warn!(step = %state.step, "Dialogue state without customer; clearing");
            self.store.clear(user_id).await?;
            return Ok(DialogueOutcome::ignored(None));
        };

        let turn = Turn {
            user_id,
            state,
            customer,
        };

        // 3. Dispatch on the current step
        match turn.state.step {
            Step::Initial => Ok(turn.ignore()),
            Step::SetInitialLanguage | Step::SetLanguage => self.on_language(&turn, &event).await,
            Step::SetPhone => self.on_phone(&turn, &event).await,
            Step::Main => self.on_main(&turn, &event).await,
            Step::AddressSection => self.on_address(&turn, &event).await,
            Step::DeliveryType => self.on_delivery_type(&turn, &event).await,
            Step::WebView => self.on_web_view(&turn, &event).await,
            Step::Settings => self.on_settings(&turn, &event).await,
        }
    }

    /// Reset the conversation and route by profile completeness.
    async fn start(&self, user_id: ExternalUserId, chat_id: ChatId) -> Result<DialogueOutcome, DialogueError> {
        self.store.clear(user_id).await?;

        let registration = self.customers.insert_if_absent(user_id, chat_id).await?;
        if registration.created {
            tracing::info!(customer_id = %registration.customer.id, "New customer registered");
        }
        let customer = registration.customer;

        let (next, reply) = match customer.language {
            None => (
                DialogueState::new(Step::SetInitialLanguage),
                self.texts.language_prompt(None).await,
            ),
            Some(language) if !customer.has_phone() => (
                DialogueState::new(Step::SetPhone),
                self.texts.phone_prompt(language, false).await,
            ),
            Some(language) => (DialogueState::new(Step::Main), self.texts.main_menu(language).await),
        };

        self.advance(user_id, Step::Initial, next, reply).await
    }

    /// Validate and persist a transition, then report it.
    async fn advance(
        &self,
        user_id: ExternalUserId,
        from: Step,
        next: DialogueState,
        reply: OutboundMessage,
    ) -> Result<DialogueOutcome, DialogueError> {
        let to = from.transition_to(next.step)?;
        self.store.set(user_id, &next).await?;
        tracing::debug!(from = %from, to = %to, "Dialogue transition");
        Ok(DialogueOutcome::replied(reply, to))
    }

    /// Reply without moving.
    fn stay(turn: &Turn, reply: OutboundMessage) -> DialogueOutcome {
        DialogueOutcome::replied(reply, turn.state.step)
    }

    async fn is_button(&self, turn: &Turn, button: LocalizedText, input: &str) -> bool {
        self.texts.matches(button.in_language(turn.language()), input).await
    }

    // ----- step handlers -----

    async fn on_language(&self, turn: &Turn, event: &InboundEvent) -> Result<DialogueOutcome, DialogueError> {
        let InboundEvent::Text { text, .. } = event else {
            return Ok(turn.ignore());
        };
        let Some(language) = self.texts.language_for(text).await else {
            return Ok(turn.ignore());
        };

        self.customers.set_language(turn.customer.id, language).await?;
        tracing::info!(language = %language, "Language selected");

        let (next, reply) = if turn.state.step == Step::SetInitialLanguage {
            (
                DialogueState::new(Step::SetPhone),
                self.texts.phone_prompt(language, false).await,
            )
        } else {
            (DialogueState::new(Step::Main), self.texts.main_menu(language).await)
        };

        self.advance(turn.user_id, turn.state.step, next, reply).await
    }

    async fn on_phone(&self, turn: &Turn, event: &InboundEvent) -> Result<DialogueOutcome, DialogueError> {
        let language = turn.language();

        match event {
            InboundEvent::ContactShared {
                phone_number,
                first_name,
                ..
            } => {
                if !event.is_own_contact() {
                    tracing::warn!("Contact belongs to another user; ignoring");
                    return Ok(turn.ignore());
                }

                let capture = self
                    .customers
                    .record_phone(turn.customer.id, phone_number, first_name.as_deref())
                    .await?;

                if capture.first_capture {
                    self.send_welcome(turn.customer.chat_id, language).await;
                }

                let reply = self.texts.main_menu(language).await;
                self.advance(turn.user_id, Step::SetPhone, DialogueState::new(Step::Main), reply)
                    .await
            }
            // Back is only offered when the phone edit started from settings
            InboundEvent::Text { text, .. } if turn.state.origin() == Some(Step::Settings) => {
                if !self.is_button(turn, LocalizedText::BackButton, text).await {
                    return Ok(turn.ignore());
                }
                let reply = self.texts.settings_menu(language).await;
                self.advance(turn.user_id, Step::SetPhone, DialogueState::new(Step::Settings), reply)
                    .await
            }
            _ => Ok(turn.ignore()),
        }
    }

    /// Fire-and-forget welcome on first phone capture.
    async fn send_welcome(&self, chat_id: ChatId, language: Language) {
        if !self.texts.flag(TextKey::WelcomeBonusOn).await {
            return;
        }
        let Some(text) = self.texts.optional(LocalizedText::Welcome.in_language(language)).await else {
            tracing::debug!("Welcome enabled but no text for language");
            return;
        };

        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.send(chat_id, &text).await {
                tracing::warn!(chat_id = %chat_id, error = %e, "Welcome message not sent");
            }
        });
    }

    async fn on_main(&self, turn: &Turn, event: &InboundEvent) -> Result<DialogueOutcome, DialogueError> {
        let InboundEvent::Text { text, .. } = event else {
            return Ok(turn.ignore());
        };
        let language = turn.language();

        if self.is_button(turn, LocalizedText::MenuButton, text).await {
            let addresses = self.addresses.list_for_customer(turn.customer.id).await?;
            let reply = self.texts.address_list(language, &addresses).await;
            return self
                .advance(turn.user_id, Step::Main, DialogueState::new(Step::AddressSection), reply)
                .await;
        }
        if self.is_button(turn, LocalizedText::SettingsButton, text).await {
            let reply = self.texts.settings_menu(language).await;
            return self
                .advance(turn.user_id, Step::Main, DialogueState::new(Step::Settings), reply)
                .await;
        }
        Ok(turn.ignore())
    }

    async fn on_address(&self, turn: &Turn, event: &InboundEvent) -> Result<DialogueOutcome, DialogueError> {
        let language = turn.language();

        match event {
            InboundEvent::LocationShared {
                latitude, longitude, ..
            } => self.on_location(turn, *latitude, *longitude).await,
            InboundEvent::Text { text, .. } => {
                if self.is_button(turn, LocalizedText::BackButton, text).await {
                    let reply = self.texts.main_menu(language).await;
                    return self
                        .advance(turn.user_id, Step::AddressSection, DialogueState::new(Step::Main), reply)
                        .await;
                }

                let addresses = self.addresses.list_for_customer(turn.customer.id).await?;
                let Some(selected) = addresses.iter().find(|a| a.value == text.trim()) else {
                    return Ok(turn.ignore());
                };

                self.addresses.mark_current(turn.customer.id, selected.id).await?;
                tracing::debug!(address_id = %selected.id, "Saved address selected");

                let reply = self.texts.delivery_type_prompt(language).await;
                self.advance(turn.user_id, Step::AddressSection, DialogueState::new(Step::DeliveryType), reply)
                    .await
            }
            _ => Ok(turn.ignore()),
        }
    }

    async fn on_location(&self, turn: &Turn, latitude: f64, longitude: f64) -> Result<DialogueOutcome, DialogueError> {
        let language = turn.language();

        // 1. Quantize; out-of-range input cannot be in any zone
        let coordinates = match Coordinates::from_degrees(latitude, longitude) {
            Ok(coordinates) => coordinates,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected shared location");
                let reply = self.texts.notice(LocalizedText::NotInDeliveryZone, language).await;
                return Ok(Self::stay(turn, reply));
            }
        };

        // 2. Geofence
        let zones = self.zones.active_zones().await?;
        let geofence = Geofence::from_zones(&zones);
        if !geofence.contains(GeoPoint::from(coordinates.lon_lat())) {
            tracing::debug!(zones = geofence.len(), "Location outside delivery area");
            let reply = self.texts.notice(LocalizedText::NotInDeliveryZone, language).await;
            return Ok(Self::stay(turn, reply));
        }

        // 3. Reverse geocode within the timeout and normalize
        let Some(value) = self.resolve_address(&coordinates).await else {
            let reply = self.texts.notice(LocalizedText::AddressNotResolved, language).await;
            return Ok(Self::stay(turn, reply));
        };

        // 4. Save as the current address
        let address = NewAddress::new(coordinates, value).map_err(DomainError::from)?;
        let saved = self.addresses.save_current(turn.customer.id, &address).await?;
        tracing::info!(address_id = %saved.id, "Delivery address saved");

        let reply = self.texts.delivery_type_prompt(language).await;
        self.advance(turn.user_id, Step::AddressSection, DialogueState::new(Step::DeliveryType), reply)
            .await
    }

    /// Normalized address, or `None` on failure, timeout or empty result.
    async fn resolve_address(&self, coordinates: &Coordinates) -> Option<String> {
        let raw = match tokio::time::timeout(self.geocode_timeout, self.geocoder.reverse(coordinates)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Reverse geocoding failed");
                return None;
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.geocode_timeout, "Reverse geocoding timed out");
                return None;
            }
        };

        let normalized = normalize_address(&raw);
        if normalized.is_empty() {
            tracing::warn!(raw = %raw, "Geocoder address too short to normalize");
            return None;
        }
        Some(normalized)
    }

    async fn on_delivery_type(&self, turn: &Turn, event: &InboundEvent) -> Result<DialogueOutcome, DialogueError> {
        let InboundEvent::Text { text, .. } = event else {
            return Ok(turn.ignore());
        };
        let language = turn.language();

        let mode = if self.is_button(turn, LocalizedText::DeliveryButton, text).await {
            Some(DeliveryMode::Delivery)
        } else if self.is_button(turn, LocalizedText::PickupButton, text).await {
            Some(DeliveryMode::Pickup)
        } else {
            None
        };

        if let Some(mode) = mode {
            self.customers.set_delivery_mode(turn.customer.id, mode).await?;
            let reply = self.texts.web_app_prompt(language, turn.customer.id).await;
            return self
                .advance(turn.user_id, Step::DeliveryType, DialogueState::new(Step::WebView), reply)
                .await;
        }

        if self.is_button(turn, LocalizedText::BackButton, text).await {
            let addresses = self.addresses.list_for_customer(turn.customer.id).await?;
            let reply = self.texts.address_list(language, &addresses).await;
            return self
                .advance(turn.user_id, Step::DeliveryType, DialogueState::new(Step::AddressSection), reply)
                .await;
        }

        Ok(turn.ignore())
    }

    async fn on_web_view(&self, turn: &Turn, event: &InboundEvent) -> Result<DialogueOutcome, DialogueError> {
        let InboundEvent::Text { text, .. } = event else {
            return Ok(turn.ignore());
        };
        let language = turn.language();

        if self.is_button(turn, LocalizedText::BackButton, text).await {
            let reply = self.texts.delivery_type_prompt(language).await;
            return self
                .advance(turn.user_id, Step::WebView, DialogueState::new(Step::DeliveryType), reply)
                .await;
        }
        if self.is_button(turn, LocalizedText::ToMainButton, text).await {
            let reply = self.texts.main_menu(language).await;
            return self
                .advance(turn.user_id, Step::WebView, DialogueState::new(Step::Main), reply)
                .await;
        }
        Ok(turn.ignore())
    }

    async fn on_settings(&self, turn: &Turn, event: &InboundEvent) -> Result<DialogueOutcome, DialogueError> {
        let InboundEvent::Text { text, .. } = event else {
            return Ok(turn.ignore());
        };
        let language = turn.language();

        let (next, reply) = if self.is_button(turn, LocalizedText::EditLanguageButton, text).await {
            (
                DialogueState::new(Step::SetLanguage),
                self.texts.language_prompt(Some(language)).await,
            )
        } else if self.is_button(turn, LocalizedText::EditPhoneButton, text).await {
            (
                DialogueState::new(Step::SetPhone).entered_from(Step::Settings),
                self.texts.phone_prompt(language, true).await,
            )
        } else if self.is_button(turn, LocalizedText::BackButton, text).await {
            (DialogueState::new(Step::Main), self.texts.main_menu(language).await)
        } else {
            return Ok(turn.ignore());
        };

        self.advance(turn.user_id, Step::Settings, next, reply).await
    }
}
