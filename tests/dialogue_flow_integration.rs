//! End-to-end dialogue flows over the in-memory adapters.
//!
//! Each test drives the engine with platform-neutral events and checks the
//! replies, the persisted step and the relational side effects together.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use menu_bot::adapters::geocoding::FixedGeocoder;
use menu_bot::adapters::memory::{
    InMemoryAddressRepository, InMemoryCustomerRepository, InMemoryDeliveryZoneReader,
    RecordingNotifier, StaticTextResolver,
};
use menu_bot::adapters::storage::InMemoryDialogueStore;
use menu_bot::application::{DialogueCollaborators, DialogueEngine, DialogueOutcome};
use menu_bot::domain::customer::{Address, Coordinates, Customer, DeliveryMode, Language};
use menu_bot::domain::delivery::DeliveryZone;
use menu_bot::domain::dialogue::{ControlAction, DialogueState, InboundEvent, Step};
use menu_bot::domain::foundation::{AddressId, ChatId, ExternalUserId, Timestamp};
use menu_bot::ports::{CustomerRepository, DialogueStateStore, GeocodingError, ReverseGeocoder};

const USER: i64 = 9001;
const OTHER_USER: i64 = 9002;
const GEOCODED: &str = "123, Main Street, District, City, Region, Country";
const NORMALIZED: &str = "City, District, Main Street, 123";

// ════════════════════════════════════════════════════════════════════════════
// Fixture
// ════════════════════════════════════════════════════════════════════════════

/// Geocoder that answers after a delay.
struct SlowGeocoder(Duration);

#[async_trait]
impl ReverseGeocoder for SlowGeocoder {
    async fn reverse(&self, _: &Coordinates) -> Result<String, GeocodingError> {
        tokio::time::sleep(self.0).await;
        Ok(GEOCODED.to_string())
    }
}

fn texts() -> StaticTextResolver {
    StaticTextResolver::new()
        .with("LANGUAGES_MESSAGE", "Tilni tanlang / Выберите язык")
        .with("LANGUAGES_MESSAGE_UZ", "Tilni tanlang")
        .with("LANGUAGE_BUTTON_RU", "🇷🇺 Русский")
        .with("LANGUAGE_BUTTON_UZ", "🇺🇿 O'zbekcha")
        .with("LANGUAGE_BUTTON_QP", "Qaraqalpaqsha")
        .with("PHONE_MESSAGE_UZ", "Telefon raqamingizni yuboring")
        .with("SET_PHONE_UZ", "📞 Raqamni yuborish")
        .with("MAIN_MESSAGE_UZ", "Asosiy menyu")
        .with("MAIN_MESSAGE_RU", "Главное меню")
        .with("MENU_BUTTON_UZ", "🍽 Menyu")
        .with("MENU_BUTTON_RU", "🍽 Меню")
        .with("SETTINGS_BUTTON_UZ", "⚙️ Sozlamalar")
        .with("ADDRESS_MESSAGE_UZ", "Manzilni tanlang")
        .with("SET_ADDRESS_BUTTON_UZ", "📍 Joylashuvni yuborish")
        .with("NOT_IN_DELIVERY_ZONE_UZ", "Bu hududga yetkazib bermaymiz")
        .with("ADDRESS_NOT_RESOLVED_UZ", "Manzil aniqlanmadi, qayta yuboring")
        .with("DELIVERY_TYPE_MESSAGE_UZ", "Yetkazib berish turini tanlang")
        .with("DELIVERY_BUTTON_UZ", "🚚 Yetkazib berish")
        .with("PICKUP_BUTTON_UZ", "🏃 Olib ketish")
        .with("WEB_APP_MESSAGE_UZ", "Menyuni oching")
        .with("WEB_APP_BUTTON_UZ", "🛒 Buyurtma berish")
        .with("WEB_APP_URL", "https://menu.example.com/app")
        .with("TO_MAIN_BUTTON_UZ", "🏠 Bosh sahifa")
        .with("SETTINGS_MESSAGE_UZ", "Sozlamalar")
        .with("EDIT_LANGUAGE_BUTTON_UZ", "🌐 Tilni o'zgartirish")
        .with("EDIT_PHONE_BUTTON_UZ", "📞 Raqamni o'zgartirish")
        .with("GET_BACK_BUTTON_UZ", "⬅️ Orqaga")
        .with("WELCOME_BONUS_ON", json!(true))
        .with("WELCOME_MESSAGE_UZ", "Xush kelibsiz! Sizga bonus berildi")
}

fn square_zone() -> DeliveryZone {
    // Tashkent-ish square, (lon, lat) vertices
    DeliveryZone::new(
        true,
        Some(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[69.0, 41.0], [69.0, 41.5], [69.5, 41.5], [69.5, 41.0], [69.0, 41.0]]]
                }
            }]
        })),
    )
}

struct World {
    store: InMemoryDialogueStore,
    customers: InMemoryCustomerRepository,
    addresses: InMemoryAddressRepository,
    notifier: RecordingNotifier,
    geocoder: FixedGeocoder,
    engine: DialogueEngine,
}

impl World {
    fn new() -> Self {
        Self::with_geocoder(FixedGeocoder::resolving(GEOCODED))
    }

    fn with_geocoder(geocoder: FixedGeocoder) -> Self {
        let store = InMemoryDialogueStore::new();
        let customers = InMemoryCustomerRepository::new();
        let addresses = InMemoryAddressRepository::new();
        let notifier = RecordingNotifier::new();
        let engine = DialogueEngine::new(DialogueCollaborators {
            state_store: Arc::new(store.clone()),
            customers: Arc::new(customers.clone()),
            addresses: Arc::new(addresses.clone()),
            zones: Arc::new(InMemoryDeliveryZoneReader::new(vec![
                square_zone(),
                DeliveryZone::new(false, None),
            ])),
            texts: Arc::new(texts()),
            geocoder: Arc::new(geocoder.clone()),
            notifier: Arc::new(notifier.clone()),
        });
        Self {
            store,
            customers,
            addresses,
            notifier,
            geocoder,
            engine,
        }
    }

    async fn send(&self, event: InboundEvent) -> DialogueOutcome {
        self.engine.handle(event).await.unwrap()
    }

    async fn step(&self) -> Option<Step> {
        self.store
            .get(ExternalUserId::new(USER))
            .await
            .unwrap()
            .map(|state| state.step)
    }

    async fn customer(&self) -> Customer {
        self.customers
            .find_by_external_id(ExternalUserId::new(USER))
            .await
            .unwrap()
            .unwrap()
    }

    async fn put_step(&self, state: DialogueState) {
        self.store.set(ExternalUserId::new(USER), &state).await.unwrap();
    }

    /// A user with language `uz` and a phone, sitting at `step`.
    async fn registered_at(&self, step: Step) -> Customer {
        let mut customer = Customer::new(ExternalUserId::new(USER), ChatId::new(USER));
        customer.language = Some(Language::Uz);
        customer.phone_number = Some("+998901112233".to_string());
        self.customers.insert(customer.clone()).await;
        self.put_step(DialogueState::new(step)).await;
        customer
    }

    async fn current_addresses(&self) -> Vec<Address> {
        self.addresses
            .all()
            .await
            .into_iter()
            .filter(|a| a.is_current)
            .collect()
    }
}

fn start() -> InboundEvent {
    InboundEvent::Start {
        user_id: ExternalUserId::new(USER),
        chat_id: ChatId::new(USER),
    }
}

fn text(t: &str) -> InboundEvent {
    InboundEvent::Text {
        user_id: ExternalUserId::new(USER),
        text: t.to_string(),
    }
}

fn contact(owner: i64) -> InboundEvent {
    InboundEvent::ContactShared {
        user_id: ExternalUserId::new(USER),
        contact_user_id: Some(ExternalUserId::new(owner)),
        phone_number: "+998901234567".to_string(),
        first_name: Some("Aziz".to_string()),
    }
}

fn location(latitude: f64, longitude: f64) -> InboundEvent {
    InboundEvent::LocationShared {
        user_id: ExternalUserId::new(USER),
        latitude,
        longitude,
    }
}

fn saved(customer: &Customer, value: &str, is_current: bool, age_secs: i64) -> Address {
    Address {
        id: AddressId::new(),
        customer_id: customer.id,
        coordinates: Coordinates::from_degrees(41.3, 69.2).unwrap(),
        value: value.to_string(),
        is_current,
        created_at: Timestamp::from_datetime(chrono::Utc::now() - chrono::Duration::seconds(age_secs)),
    }
}

async fn wait_for_notifications(notifier: &RecordingNotifier, count: usize) -> Vec<(ChatId, String)> {
    for _ in 0..50 {
        let sent = notifier.sent().await;
        if sent.len() >= count {
            return sent;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    notifier.sent().await
}

// ════════════════════════════════════════════════════════════════════════════
// Onboarding
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn new_user_picks_language_then_shares_phone() {
    let world = World::new();

    let prompt = world.send(start()).await;
    let reply = prompt.reply.unwrap();
    assert_eq!(reply.text, "Tilni tanlang / Выберите язык");
    assert_eq!(reply.labels(), vec!["🇷🇺 Русский", "🇺🇿 O'zbekcha", "Qaraqalpaqsha"]);
    assert_eq!(world.step().await, Some(Step::SetInitialLanguage));
    assert_eq!(world.customers.len().await, 1);

    let picked = world.send(text("🇺🇿 O'zbekcha")).await;
    assert_eq!(picked.step, Some(Step::SetPhone));
    assert_eq!(world.customer().await.language, Some(Language::Uz));
    let phone_prompt = picked.reply.unwrap();
    assert_eq!(phone_prompt.text, "Telefon raqamingizni yuboring");
    assert_eq!(phone_prompt.labels(), vec!["📞 Raqamni yuborish"]);
    assert_eq!(
        phone_prompt.find_control("📞 Raqamni yuborish").unwrap().action,
        ControlAction::RequestContact
    );

    let shared = world.send(contact(USER)).await;
    assert_eq!(shared.step, Some(Step::Main));
    assert_eq!(shared.reply.unwrap().labels(), vec!["🍽 Menyu", "⚙️ Sozlamalar"]);

    let customer = world.customer().await;
    assert_eq!(customer.phone_number.as_deref(), Some("+998901234567"));
    assert_eq!(customer.name.as_deref(), Some("Aziz"));
}

#[tokio::test]
async fn unknown_language_text_is_ignored() {
    let world = World::new();
    world.send(start()).await;

    let outcome = world.send(text("English")).await;

    assert_eq!(outcome.reply, None);
    assert_eq!(outcome.step, Some(Step::SetInitialLanguage));
    assert_eq!(world.customer().await.language, None);
}

#[tokio::test]
async fn start_routes_existing_users_by_profile() {
    let world = World::new();
    world.send(start()).await;
    world.send(text("🇺🇿 O'zbekcha")).await;

    // Language set, phone missing
    let again = world.send(start()).await;
    assert_eq!(again.step, Some(Step::SetPhone));
    assert_eq!(world.customers.len().await, 1);

    world.send(contact(USER)).await;

    // Complete profile
    let complete = world.send(start()).await;
    assert_eq!(complete.step, Some(Step::Main));
    assert_eq!(complete.reply.unwrap().text, "Asosiy menyu");
}

#[tokio::test]
async fn start_resets_a_conversation_in_progress() {
    let world = World::new();
    world.registered_at(Step::WebView).await;

    let outcome = world.send(start()).await;

    assert_eq!(outcome.step, Some(Step::Main));
    assert_eq!(world.step().await, Some(Step::Main));
}

#[tokio::test]
async fn events_before_start_are_ignored() {
    let world = World::new();

    let outcome = world.send(text("🍽 Menyu")).await;

    assert_eq!(outcome.reply, None);
    assert_eq!(outcome.step, None);
    assert!(world.customers.is_empty().await);
}

// ════════════════════════════════════════════════════════════════════════════
// Phone capture
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn contact_of_another_user_is_rejected() {
    let world = World::new();
    world.send(start()).await;
    world.send(text("🇺🇿 O'zbekcha")).await;

    let outcome = world.send(contact(OTHER_USER)).await;

    assert_eq!(outcome.reply, None);
    assert_eq!(world.step().await, Some(Step::SetPhone));
    assert_eq!(world.customer().await.phone_number, None);
}

#[tokio::test]
async fn welcome_is_sent_once_on_first_phone_capture() {
    let world = World::new();
    world.send(start()).await;
    world.send(text("🇺🇿 O'zbekcha")).await;
    world.send(contact(USER)).await;

    let sent = wait_for_notifications(&world.notifier, 1).await;
    assert_eq!(
        sent,
        vec![(ChatId::new(USER), "Xush kelibsiz! Sizga bonus berildi".to_string())]
    );

    // Phone edit from settings is not a first capture
    world
        .put_step(DialogueState::new(Step::SetPhone).entered_from(Step::Settings))
        .await;
    world.send(contact(USER)).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(world.notifier.sent().await.len(), 1);
}

#[tokio::test]
async fn back_from_phone_prompt_requires_settings_origin() {
    let world = World::new();
    world.registered_at(Step::SetPhone).await;

    let ignored = world.send(text("⬅️ Orqaga")).await;
    assert_eq!(ignored.reply, None);
    assert_eq!(world.step().await, Some(Step::SetPhone));

    world
        .put_step(DialogueState::new(Step::SetPhone).entered_from(Step::Settings))
        .await;
    let back = world.send(text("⬅️ Orqaga")).await;
    assert_eq!(back.step, Some(Step::Settings));
}

// ════════════════════════════════════════════════════════════════════════════
// Address capture
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn menu_lists_saved_addresses_newest_first() {
    let world = World::new();
    let customer = world.registered_at(Step::Main).await;
    world.addresses.insert(saved(&customer, "Old Street 1", false, 120)).await;
    world.addresses.insert(saved(&customer, "New Street 2", true, 10)).await;

    let outcome = world.send(text("🍽 Menyu")).await;

    assert_eq!(outcome.step, Some(Step::AddressSection));
    let reply = outcome.reply.unwrap();
    assert_eq!(reply.text, "Manzilni tanlang");
    assert_eq!(
        reply.labels(),
        vec!["New Street 2", "Old Street 1", "📍 Joylashuvni yuborish", "⬅️ Orqaga"]
    );
    assert_eq!(
        reply.find_control("📍 Joylashuvni yuborish").unwrap().action,
        ControlAction::RequestLocation
    );
}

#[tokio::test]
async fn location_outside_every_zone_is_undeliverable() {
    let world = World::new();
    world.registered_at(Step::AddressSection).await;

    let outcome = world.send(location(40.0, 71.0)).await;

    assert_eq!(outcome.reply.unwrap().text, "Bu hududga yetkazib bermaymiz");
    assert_eq!(world.step().await, Some(Step::AddressSection));
    assert!(world.addresses.all().await.is_empty());
    assert!(world.geocoder.calls().await.is_empty());
}

#[tokio::test]
async fn location_inside_a_zone_becomes_the_current_address() {
    let world = World::new();
    let customer = world.registered_at(Step::AddressSection).await;
    world.addresses.insert(saved(&customer, "Old Street 1", true, 60)).await;

    let outcome = world.send(location(41.311_081_234_567, 69.240_562_987_654)).await;

    assert_eq!(outcome.step, Some(Step::DeliveryType));
    assert_eq!(outcome.reply.unwrap().labels(), vec!["🚚 Yetkazib berish", "🏃 Olib ketish", "⬅️ Orqaga"]);

    let current = world.current_addresses().await;
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].value, NORMALIZED);
    assert_eq!(current[0].coordinates.latitude().to_string(), "41.31108123");
    assert_eq!(current[0].coordinates.longitude().to_string(), "69.24056299");
    assert_eq!(world.addresses.all().await.len(), 2);

    // Geocoder saw the quantized point
    assert_eq!(world.geocoder.calls().await, vec![current[0].coordinates]);
}

#[tokio::test]
async fn resharing_the_same_location_reuses_the_address() {
    let world = World::new();
    world.registered_at(Step::AddressSection).await;

    world.send(location(41.3, 69.2)).await;
    world.put_step(DialogueState::new(Step::AddressSection)).await;
    world.send(location(41.3, 69.2)).await;

    let all = world.addresses.all().await;
    assert_eq!(all.len(), 1);
    assert!(all[0].is_current);
}

#[tokio::test]
async fn geocoder_failure_reprompts_in_place() {
    let world = World::with_geocoder(FixedGeocoder::unreachable());
    world.registered_at(Step::AddressSection).await;

    let outcome = world.send(location(41.3, 69.2)).await;

    assert_eq!(outcome.reply.unwrap().text, "Manzil aniqlanmadi, qayta yuboring");
    assert_eq!(world.step().await, Some(Step::AddressSection));
    assert!(world.addresses.all().await.is_empty());
}

#[tokio::test]
async fn too_short_geocoder_answer_is_not_stored() {
    let world = World::with_geocoder(FixedGeocoder::resolving("Region, Country"));
    world.registered_at(Step::AddressSection).await;

    let outcome = world.send(location(41.3, 69.2)).await;

    assert_eq!(outcome.reply.unwrap().text, "Manzil aniqlanmadi, qayta yuboring");
    assert_eq!(outcome.step, Some(Step::AddressSection));
    assert!(world.addresses.all().await.is_empty());
}

#[tokio::test]
async fn geocoder_timeout_reprompts_in_place() {
    let store = InMemoryDialogueStore::new();
    let customers = InMemoryCustomerRepository::new();
    let addresses = InMemoryAddressRepository::new();
    let engine = DialogueEngine::new(DialogueCollaborators {
        state_store: Arc::new(store.clone()),
        customers: Arc::new(customers.clone()),
        addresses: Arc::new(addresses.clone()),
        zones: Arc::new(InMemoryDeliveryZoneReader::new(vec![square_zone()])),
        texts: Arc::new(texts()),
        geocoder: Arc::new(SlowGeocoder(Duration::from_secs(5))),
        notifier: Arc::new(RecordingNotifier::new()),
    })
    .with_geocode_timeout(Duration::from_millis(20));

    let mut customer = Customer::new(ExternalUserId::new(USER), ChatId::new(USER));
    customer.language = Some(Language::Uz);
    customer.phone_number = Some("+998901112233".to_string());
    customers.insert(customer).await;
    store
        .set(ExternalUserId::new(USER), &DialogueState::new(Step::AddressSection))
        .await
        .unwrap();

    let outcome = engine.handle(location(41.3, 69.2)).await.unwrap();

    assert_eq!(outcome.reply.unwrap().text, "Manzil aniqlanmadi, qayta yuboring");
    assert_eq!(outcome.step, Some(Step::AddressSection));
    assert!(addresses.all().await.is_empty());
}

#[tokio::test]
async fn selecting_a_saved_address_moves_the_current_flag() {
    let world = World::new();
    let customer = world.registered_at(Step::AddressSection).await;
    let home = saved(&customer, "Home 1", false, 100);
    world.addresses.insert(home.clone()).await;
    world.addresses.insert(saved(&customer, "Work 2", true, 50)).await;

    let outcome = world.send(text("Home 1")).await;
    assert_eq!(outcome.step, Some(Step::DeliveryType));

    // Applying the same selection again changes nothing
    world.put_step(DialogueState::new(Step::AddressSection)).await;
    world.send(text("Home 1")).await;

    let current = world.current_addresses().await;
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, home.id);
}

#[tokio::test]
async fn unknown_address_text_is_ignored() {
    let world = World::new();
    let customer = world.registered_at(Step::AddressSection).await;
    world.addresses.insert(saved(&customer, "Home 1", true, 10)).await;

    let outcome = world.send(text("Home")).await;

    assert_eq!(outcome.reply, None);
    assert_eq!(world.step().await, Some(Step::AddressSection));
}

#[tokio::test]
async fn back_from_address_section_returns_to_main() {
    let world = World::new();
    world.registered_at(Step::AddressSection).await;

    let outcome = world.send(text("⬅️ Orqaga")).await;

    assert_eq!(outcome.step, Some(Step::Main));
}

// ════════════════════════════════════════════════════════════════════════════
// Delivery type and web menu handoff
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn pickup_choice_opens_the_web_menu() {
    let world = World::new();
    let customer = world.registered_at(Step::DeliveryType).await;

    let outcome = world.send(text("🏃 Olib ketish")).await;

    assert_eq!(outcome.step, Some(Step::WebView));
    assert_eq!(world.customer().await.delivery_mode, DeliveryMode::Pickup);

    let reply = outcome.reply.unwrap();
    assert_eq!(reply.text, "Menyuni oching");
    assert_eq!(reply.labels(), vec!["🛒 Buyurtma berish", "⬅️ Orqaga", "🏠 Bosh sahifa"]);
    match &reply.find_control("🛒 Buyurtma berish").unwrap().action {
        ControlAction::OpenUrl(url) => {
            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
            assert_eq!(
                pairs,
                vec![
                    ("customer_id".to_string(), customer.id.to_string()),
                    ("language".to_string(), "uz".to_string()),
                ]
            );
        }
        other => panic!("expected open_url control, got {:?}", other),
    }
}

#[tokio::test]
async fn delivery_choice_is_persisted() {
    let world = World::new();
    world.registered_at(Step::DeliveryType).await;

    world.send(text("🚚 Yetkazib berish")).await;

    assert_eq!(world.customer().await.delivery_mode, DeliveryMode::Delivery);
    assert_eq!(world.step().await, Some(Step::WebView));
}

#[tokio::test]
async fn web_view_navigation() {
    let world = World::new();
    let customer = world.registered_at(Step::WebView).await;
    world.addresses.insert(saved(&customer, "Home 1", true, 10)).await;

    let back = world.send(text("⬅️ Orqaga")).await;
    assert_eq!(back.step, Some(Step::DeliveryType));

    let to_addresses = world.send(text("⬅️ Orqaga")).await;
    assert_eq!(to_addresses.step, Some(Step::AddressSection));
    assert_eq!(to_addresses.reply.unwrap().labels()[0], "Home 1");

    world.put_step(DialogueState::new(Step::WebView)).await;
    let home = world.send(text("🏠 Bosh sahifa")).await;
    assert_eq!(home.step, Some(Step::Main));
}

// ════════════════════════════════════════════════════════════════════════════
// Settings
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn settings_language_edit_returns_to_main_in_new_language() {
    let world = World::new();
    world.registered_at(Step::Main).await;

    let settings = world.send(text("⚙️ Sozlamalar")).await;
    assert_eq!(settings.step, Some(Step::Settings));

    let prompt = world.send(text("🌐 Tilni o'zgartirish")).await;
    assert_eq!(prompt.step, Some(Step::SetLanguage));
    assert_eq!(prompt.reply.unwrap().text, "Tilni tanlang");

    let changed = world.send(text("🇷🇺 Русский")).await;
    assert_eq!(changed.step, Some(Step::Main));
    assert_eq!(world.customer().await.language, Some(Language::Ru));
    let reply = changed.reply.unwrap();
    assert_eq!(reply.text, "Главное меню");
    assert_eq!(reply.labels(), vec!["🍽 Меню"]);
}

#[tokio::test]
async fn settings_phone_edit_offers_back() {
    let world = World::new();
    world.registered_at(Step::Settings).await;

    let prompt = world.send(text("📞 Raqamni o'zgartirish")).await;

    assert_eq!(prompt.step, Some(Step::SetPhone));
    assert_eq!(prompt.reply.unwrap().labels(), vec!["📞 Raqamni yuborish", "⬅️ Orqaga"]);
    let stored = world.store.get(ExternalUserId::new(USER)).await.unwrap().unwrap();
    assert_eq!(stored.origin(), Some(Step::Settings));

    let updated = world.send(contact(USER)).await;
    assert_eq!(updated.step, Some(Step::Main));
    assert_eq!(world.customer().await.phone_number.as_deref(), Some("+998901234567"));
}

#[tokio::test]
async fn settings_back_returns_to_main() {
    let world = World::new();
    world.registered_at(Step::Settings).await;

    let outcome = world.send(text("⬅️ Orqaga")).await;

    assert_eq!(outcome.step, Some(Step::Main));
}

// ════════════════════════════════════════════════════════════════════════════
// Noise and duplicates
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn unrecognized_input_never_moves_any_step() {
    for step in [
        Step::Main,
        Step::AddressSection,
        Step::DeliveryType,
        Step::WebView,
        Step::Settings,
        Step::SetLanguage,
    ] {
        let world = World::new();
        world.registered_at(step).await;

        let noise = world.send(text("asdf")).await;
        let location_elsewhere = if step == Step::AddressSection {
            None
        } else {
            Some(world.send(location(41.3, 69.2)).await)
        };

        assert_eq!(noise.reply, None, "step {}", step);
        if let Some(outcome) = location_elsewhere {
            assert_eq!(outcome.reply, None, "step {}", step);
        }
        assert_eq!(world.step().await, Some(step));
    }
}

#[tokio::test]
async fn duplicate_language_delivery_is_harmless() {
    let world = World::new();
    world.send(start()).await;

    world.send(text("🇺🇿 O'zbekcha")).await;
    let duplicate = world.send(text("🇺🇿 O'zbekcha")).await;

    // The duplicate arrives at set_phone, where text is noise
    assert_eq!(duplicate.reply, None);
    assert_eq!(world.step().await, Some(Step::SetPhone));
    assert_eq!(world.customer().await.language, Some(Language::Uz));
}
