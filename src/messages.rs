use crate::flow::FlowEvent;

/// Application message type.
///
/// Everything the user does and everything the background tasks report ends
/// up as a [`FlowEvent`]; the wrapper only exists so the UI can grow its own
/// messages without touching the flow.
#[derive(Debug, Clone)]
pub enum Message {
    /// Input for the screen flow, from a widget or from the event subscription
    Flow(FlowEvent),
    /// The event subscription lost its source
    EventsClosed,
}

impl From<FlowEvent> for Message {
    fn from(event: FlowEvent) -> Self {
        Message::Flow(event)
    }
}
