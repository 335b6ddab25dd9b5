// Cousinentreffen desktop application (iced)

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use iced::futures::SinkExt;
use iced::{Application, Command, Element, Theme};
use log::{info, warn};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::calendar::today_in;
use crate::config::reference_time_zone;
use crate::flow::{FlowController, FlowEvent};
use crate::messages::Message;
use crate::ui;
use crate::AppState;

type EventSlot = Arc<Mutex<Option<UnboundedReceiver<FlowEvent>>>>;

pub struct CousinsApp {
    flow: FlowController,
    // Handed to the subscription on first run
    events: EventSlot,
    time_zone: Tz,
}

impl CousinsApp {
    fn today(&self) -> NaiveDate {
        today_in(self.time_zone, Utc::now())
    }
}

impl Application for CousinsApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = AppState;

    fn new(state: Self::Flags) -> (Self, Command<Message>) {
        let time_zone = reference_time_zone(&state.settings).unwrap_or_else(|e| {
            warn!("{}, falling back to Europe/Berlin", e);
            chrono_tz::Europe::Berlin
        });
        let today = today_in(time_zone, Utc::now());

        let mut flow = FlowController::new(state.store, state.audio, state.settings, today);
        let events = Arc::new(Mutex::new(flow.take_events()));

        let app = CousinsApp {
            flow,
            events,
            time_zone,
        };

        (app, Command::perform(async {}, |_| Message::Flow(FlowEvent::Start)))
    }

    fn title(&self) -> String {
        ui::APP_TITLE.to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Flow(event) => self.flow.dispatch(event),
            Message::EventsClosed => {
                warn!("Flow event stream closed, shutting down background work");
                self.flow.shutdown();
            }
        }
        Command::none()
    }

    fn subscription(&self) -> iced::Subscription<Message> {
        struct FlowEvents;

        let events = self.events.clone();

        iced::subscription::channel(
            std::any::TypeId::of::<FlowEvents>(),
            100,
            move |mut output| async move {
                let receiver = events.lock().ok().and_then(|mut slot| slot.take());

                if let Some(mut receiver) = receiver {
                    info!("Forwarding flow events to the UI");
                    while let Some(event) = receiver.recv().await {
                        let _ = output.send(Message::Flow(event)).await;
                    }
                    let _ = output.send(Message::EventsClosed).await;
                }

                loop {
                    iced::futures::future::pending::<()>().await;
                }
            },
        )
    }

    fn view(&self) -> Element<'_, Message> {
        ui::view(self.flow.state(), self.today())
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
