//! Notification bus
//!
//! Typed publish/subscribe registry used to announce that shared client
//! state changed. Each notification kind is an [`Event`] field on
//! [`NotificationBus`], so subscribers and raisers agree on the payload type
//! at compile time.
//!
//! Dispatch is synchronous. Subscribers run in subscription order and all
//! receive the same `&mut` payload, so a rewrite made by an earlier
//! subscriber is what later subscribers see.
//!
//! ```ignore
//! let bus = NotificationBus::shared();
//! bus.chat_received.subscribe(|chat| {
//!     chat.text = chat.text.replace("&e", "");
//!     Ok(())
//! });
//!
//! let mut text = String::from("&eHello");
//! bus.raise_chat_received(&mut text, MessageType::Normal);
//! assert_eq!(text, "Hello");
//! ```

mod args;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

pub use args::{ChatEvent, ColourCodeEvent, MessageType, TextureEvent};

/// Handle returned by [`Event::subscribe`], used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }
}

type Handler<P> = Rc<dyn Fn(&mut P) -> anyhow::Result<()>>;

/// A single notification kind with its ordered subscriber list
pub struct Event<P: 'static = ()> {
    name: &'static str,
    handlers: RefCell<Vec<(SubscriptionId, Handler<P>)>>,
}

impl<P: 'static> Event<P> {
    /// Creates an event with no subscribers
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Name used when logging subscriber failures
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Appends a subscriber; it runs after every existing subscriber
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&mut P) -> anyhow::Result<()> + 'static,
    {
        let id = SubscriptionId::next();
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Removes a subscriber. Returns false if the id is not subscribed here.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    /// Number of current subscribers
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Invokes every subscriber in subscription order
    ///
    /// The subscriber list is snapshotted first: handlers may subscribe,
    /// unsubscribe or raise again while this call is iterating, and those
    /// changes only apply to later raises. A handler returning an error is
    /// logged and does not stop delivery to the rest.
    pub fn raise(&self, payload: &mut P) {
        let snapshot: Vec<Handler<P>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in snapshot {
            if let Err(error) = handler(payload) {
                warn!(event = self.name, error = %error, "Subscriber failed");
            }
        }
    }
}

impl Event<()> {
    /// Raises a notification that carries no payload
    pub fn notify(&self) {
        self.raise(&mut ());
    }
}

impl<P> fmt::Debug for Event<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("subscribers", &self.handlers.borrow().len())
            .finish()
    }
}

/// Process-wide set of notification kinds
///
/// Created once before any subsystem starts and shared as
/// `Rc<NotificationBus>`.
#[derive(Debug)]
pub struct NotificationBus {
    /// The terrain atlas ("terrain.png") was replaced
    pub terrain_atlas_changed: Event,
    /// The texture pack was replaced
    pub texture_pack_changed: Event,
    /// A single texture such as "rain" or "snow" was replaced
    pub texture_changed: Event<TextureEvent>,
    /// The user changed view/fog distance
    pub view_distance_changed: Event,
    /// The held block changed, by the user or by the server
    pub held_block_changed: Event,
    /// Place/delete permissions changed
    pub block_permissions_changed: Event,
    /// A block definition changed
    pub block_definition_changed: Event,
    /// A message is being added to chat
    pub chat_received: Event<ChatEvent>,
    /// The user is sending a message
    pub chat_sending: Event<ChatEvent>,
    /// The chat font changed
    pub chat_font_changed: Event,
    /// The player's hack permissions changed
    pub hack_permissions_changed: Event,
    /// The colour codes usable by the player changed
    pub colour_code_changed: Event<ColourCodeEvent>,
    /// The projection matrix changed
    pub projection_changed: Event,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self {
            terrain_atlas_changed: Event::new("terrain_atlas_changed"),
            texture_pack_changed: Event::new("texture_pack_changed"),
            texture_changed: Event::new("texture_changed"),
            view_distance_changed: Event::new("view_distance_changed"),
            held_block_changed: Event::new("held_block_changed"),
            block_permissions_changed: Event::new("block_permissions_changed"),
            block_definition_changed: Event::new("block_definition_changed"),
            chat_received: Event::new("chat_received"),
            chat_sending: Event::new("chat_sending"),
            chat_font_changed: Event::new("chat_font_changed"),
            hack_permissions_changed: Event::new("hack_permissions_changed"),
            colour_code_changed: Event::new("colour_code_changed"),
            projection_changed: Event::new("projection_changed"),
        }
    }

    /// Creates a bus ready to be shared between subsystems
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Raises `chat_received`, writing any subscriber rewrite back into `text`
    pub fn raise_chat_received(&self, text: &mut String, kind: MessageType) {
        let mut event = ChatEvent::new(std::mem::take(text), kind);
        self.chat_received.raise(&mut event);
        *text = event.text;
    }

    /// Raises `chat_sending`, writing any subscriber rewrite back into `text`
    pub fn raise_chat_sending(&self, text: &mut String) {
        let mut event = ChatEvent::new(std::mem::take(text), MessageType::Normal);
        self.chat_sending.raise(&mut event);
        *text = event.text;
    }

    pub fn raise_texture_changed(&self, name: impl Into<String>, data: Vec<u8>) {
        let mut event = TextureEvent {
            name: name.into(),
            data,
        };
        self.texture_changed.raise(&mut event);
    }

    pub fn raise_colour_code_changed(&self, code: char) {
        self.colour_code_changed.raise(&mut ColourCodeEvent { code });
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}
