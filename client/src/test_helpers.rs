use std::{collections::VecDeque, time::Duration};

use common::Snapshot;

use crate::{
    input::UiKey,
    ui::{GameUi, UiInputError},
};

// An empty key queue reads as lost input.
#[derive(Default)]
pub struct MockUi {
    pub messages: Vec<String>,
    pub draws: Vec<Snapshot>,
    pub keys: VecDeque<Result<Option<UiKey>, UiInputError>>,
}

impl MockUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Result<Option<UiKey>, UiInputError>>,
    {
        Self {
            keys: keys.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl GameUi for MockUi {
    fn draw(&mut self, snapshot: &Snapshot) {
        self.draws.push(snapshot.clone());
    }

    fn show_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<UiKey>, UiInputError> {
        self.keys
            .pop_front()
            .unwrap_or(Err(UiInputError::Disconnected))
    }
}
