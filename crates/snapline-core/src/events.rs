//! Editor events the snap component listens to, and subscription bookkeeping.

/// The editor's selection at the time of an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<Id> {
    /// Nothing selected.
    #[default]
    None,
    /// A single selected shape.
    Single(Id),
    /// A multi-selection, in selection order.
    Multi(Vec<Id>),
}

impl<Id: Copy + PartialEq> Selection<Id> {
    /// Build a selection from a list, collapsing one element to `Single`.
    pub fn from_list(ids: Vec<Id>) -> Self {
        match ids.len() {
            0 => Selection::None,
            1 => Selection::Single(ids[0]),
            _ => Selection::Multi(ids),
        }
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::None => true,
            Selection::Single(_) => false,
            Selection::Multi(ids) => ids.is_empty(),
        }
    }

    /// Check if a shape is part of the selection.
    pub fn contains(&self, id: Id) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(selected) => *selected == id,
            Selection::Multi(ids) => ids.contains(&id),
        }
    }

    /// Selected ids as a slice.
    pub fn ids(&self) -> &[Id] {
        match self {
            Selection::None => &[],
            Selection::Single(id) => std::slice::from_ref(id),
            Selection::Multi(ids) => ids,
        }
    }
}

/// Kinds of events the snap component subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Editor selection changed.
    Select,
    /// Selected shape (or drag proxy) moved during a drag.
    Move,
    /// Pointer released.
    PointerUp,
    /// Tree layout finished.
    LayoutAfter,
}

impl EventKind {
    /// Every kind the snap component needs while enabled.
    pub const ALL: [EventKind; 4] = [
        EventKind::Select,
        EventKind::Move,
        EventKind::PointerUp,
        EventKind::LayoutAfter,
    ];
}

/// An event delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapEvent<Id> {
    /// Selection changed to the carried value.
    Select(Selection<Id>),
    /// `target` was moved; in a multi-selection drag this is the proxy.
    Move { target: Id },
    /// Pointer released, ending the gesture.
    PointerUp,
    /// Layout pass completed.
    LayoutAfter,
}

impl<Id> SnapEvent<Id> {
    pub fn kind(&self) -> EventKind {
        match self {
            SnapEvent::Select(_) => EventKind::Select,
            SnapEvent::Move { .. } => EventKind::Move,
            SnapEvent::PointerUp => EventKind::PointerUp,
            SnapEvent::LayoutAfter => EventKind::LayoutAfter,
        }
    }
}

/// Handle returned by [`EventHub::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(pub u64);

/// Host event registration.
///
/// Dispatch itself stays with the host: it forwards events to
/// [`Snap::handle_event`](crate::snap::Snap::handle_event) and the component
/// ignores kinds it is not subscribed to.
pub trait EventHub {
    /// Register interest in an event kind.
    fn on(&mut self, kind: EventKind) -> ListenerKey;

    /// Drop a registration. Unknown keys are ignored.
    fn off(&mut self, key: ListenerKey);
}

/// A group of registrations that is released as a unit.
#[derive(Debug)]
pub struct Subscriptions {
    keys: Vec<(EventKind, ListenerKey)>,
}

impl Subscriptions {
    /// Subscribe to every kind in `kinds`.
    pub fn subscribe(hub: &mut dyn EventHub, kinds: &[EventKind]) -> Self {
        let keys = kinds.iter().map(|&kind| (kind, hub.on(kind))).collect();
        Self { keys }
    }

    /// Check if this group covers `kind`.
    pub fn covers(&self, kind: EventKind) -> bool {
        self.keys.iter().any(|(k, _)| *k == kind)
    }

    /// Unsubscribe everything in the group.
    pub fn release(self, hub: &mut dyn EventHub) {
        for (_, key) in self.keys {
            hub.off(key);
        }
    }
}
