use std::collections::HashMap;

use ubxwire_frame::Message;

use crate::class;
use crate::event::Event;
use crate::handlers;
use crate::receiver::Receiver;

/// A message handler: reads the payload into the receiver cache and
/// returns the event to raise, if any.
pub type Handler = Box<dyn FnMut(&Message, &mut Receiver) -> Option<Event> + Send>;

/// Handlers for the ids of a single class.
pub struct ClassTable {
    name: &'static str,
    handlers: HashMap<u8, Handler>,
}

impl ClassTable {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: HashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self.handlers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Outcome of routing one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// A handler ran and returned this event.
    Handled(Option<Event>),
    /// The class is known but the id has no handler; ignored.
    UnhandledId,
    /// No table exists for the class.
    UnknownClass,
}

/// Class-keyed registry of message handlers.
///
/// An unknown class is an error for the caller to record. An unknown id
/// within a known class is silently ignored so newer receiver firmware does
/// not break older hosts.
pub struct Dispatcher {
    classes: HashMap<u8, ClassTable>,
}

impl Dispatcher {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Registry with the ACK, CFG, MON and NAV handlers installed.
    pub fn standard() -> Self {
        use class::{ack, cfg, mon};

        let mut dispatcher = Self::new();

        dispatcher.register(class::ACK, ack::ACK, handlers::ack);
        dispatcher.register(class::ACK, ack::NAK, handlers::nak);

        dispatcher.register(class::CFG, cfg::ANT, handlers::ignore);
        dispatcher.register(class::CFG, cfg::MSG, handlers::ignore);
        dispatcher.register(class::CFG, cfg::NAV5, handlers::cfg_nav5);
        dispatcher.register(class::CFG, cfg::NMEA, handlers::cfg_nmea);
        dispatcher.register(class::CFG, cfg::PRT, handlers::cfg_prt);
        dispatcher.register(class::CFG, cfg::RATE, handlers::cfg_rate);

        for id in [
            mon::BATCH,
            mon::HW2,
            mon::HW,
            mon::IO,
            mon::MSGPP,
            mon::PATCH,
            mon::RXBUF,
            mon::RXR,
            mon::SMGR,
            mon::TXBUF,
        ] {
            dispatcher.register(class::MON, id, handlers::ignore);
        }
        dispatcher.register(class::MON, mon::GNSS, handlers::mon_gnss);
        dispatcher.register(class::MON, mon::VER, handlers::mon_ver);

        dispatcher.register_class(class::NAV);
        dispatcher
    }

    /// Make a class known without registering any ids.
    pub fn register_class(&mut self, class: u8) -> &mut Self {
        self.classes
            .entry(class)
            .or_insert_with(|| ClassTable::new(class::class_name(class)));
        self
    }

    /// Install or replace the handler for `class`/`id`.
    pub fn register<F>(&mut self, class: u8, id: u8, handler: F) -> &mut Self
    where
        F: FnMut(&Message, &mut Receiver) -> Option<Event> + Send + 'static,
    {
        self.classes
            .entry(class)
            .or_insert_with(|| ClassTable::new(class::class_name(class)))
            .handlers
            .insert(id, Box::new(handler));
        self
    }

    /// Route a validated message to its handler.
    pub fn dispatch(&mut self, msg: &Message, rx: &mut Receiver) -> Dispatched {
        let Some(table) = self.classes.get_mut(&msg.class) else {
            return Dispatched::UnknownClass;
        };
        match table.handlers.get_mut(&msg.id) {
            Some(handler) => Dispatched::Handled(handler(msg, rx)),
            None => {
                tracing::trace!(
                    class = table.name,
                    id = msg.id,
                    "ignoring unhandled message id"
                );
                Dispatched::UnhandledId
            }
        }
    }

    /// Check if a class has a table.
    pub fn has_class(&self, class: u8) -> bool {
        self.classes.contains_key(&class)
    }

    /// Get the table for a class.
    pub fn class(&self, class: u8) -> Option<&ClassTable> {
        self.classes.get(&class)
    }

    /// Known classes, sorted.
    pub fn classes(&self) -> Vec<u8> {
        let mut classes: Vec<u8> = self.classes.keys().copied().collect();
        classes.sort_unstable();
        classes
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for class in self.classes() {
            if let Some(table) = self.classes.get(&class) {
                map.entry(&table.name, &table.ids());
            }
        }
        map.finish()
    }
}
