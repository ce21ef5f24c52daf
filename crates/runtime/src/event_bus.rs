use foundation::geo::Viewport;

use crate::frame::Frame;

/// User-facing boolean view switches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ViewToggle {
    ShowPoints,
    /// On: color geometries by date. Off: by accuracy.
    ColorByDate,
    ShowGrid,
    LockGrid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// A pan or zoom finished. Fired once per gesture, not per animation frame.
    ViewportSettled(Viewport),
    Toggle(ViewToggle, bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub frame: Frame,
    pub kind: MapEvent,
}

/// Ordered queue of map events, stamped with increasing frames.
#[derive(Debug, Default)]
pub struct EventBus {
    next_frame: Frame,
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, kind: MapEvent) -> Frame {
        let frame = self.next_frame;
        self.next_frame = frame.next();
        self.events.push(Event { frame, kind });
        frame
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Drain, keeping only the last of each run of consecutive viewport events.
    ///
    /// A later viewport supersedes an earlier one that has not been handled
    /// yet. Toggles are never dropped and keep their order. Returns the events
    /// and the number that were superseded.
    pub fn drain_coalesced(&mut self) -> (Vec<Event>, usize) {
        let drained = self.drain();
        let total = drained.len();
        let mut out: Vec<Event> = Vec::with_capacity(total);
        for event in drained {
            let supersedes = matches!(event.kind, MapEvent::ViewportSettled(_))
                && matches!(
                    out.last(),
                    Some(Event {
                        kind: MapEvent::ViewportSettled(_),
                        ..
                    })
                );
            if supersedes {
                out.pop();
            }
            out.push(event);
        }
        let superseded = total - out.len();
        (out, superseded)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, MapEvent, ViewToggle};
    use foundation::bounds::GeoBounds;
    use foundation::geo::Viewport;

    fn vp(zoom: i32) -> MapEvent {
        MapEvent::ViewportSettled(Viewport::new(GeoBounds::new(0.0, 0.0, 1.0, 1.0), zoom))
    }

    #[test]
    fn stamps_increasing_frames() {
        let mut bus = EventBus::new();
        let a = bus.emit(vp(3));
        let b = bus.emit(MapEvent::Toggle(ViewToggle::ShowGrid, true));
        assert!(b.is_newer_than(a));
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].frame, b);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(vp(1));
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn later_viewports_supersede_earlier_ones() {
        let mut bus = EventBus::new();
        bus.emit(vp(1));
        bus.emit(vp(2));
        bus.emit(MapEvent::Toggle(ViewToggle::LockGrid, true));
        bus.emit(vp(3));
        bus.emit(vp(4));
        bus.emit(vp(5));

        let (events, superseded) = bus.drain_coalesced();
        assert_eq!(superseded, 3);
        let kinds: Vec<_> = events.into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![vp(2), MapEvent::Toggle(ViewToggle::LockGrid, true), vp(5)]
        );
    }
}
