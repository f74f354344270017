#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisclosureState {
    #[default]
    Closed,
    Open,
}

/// How the escape-key listener must change after a transition. The listener
/// lives exactly as long as the disclosure is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    Attach,
    Detach,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disclosure {
    state: DisclosureState,
}

impl Disclosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DisclosureState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DisclosureState::Open)
    }

    pub fn toggle(&mut self) -> ListenerChange {
        match self.state {
            DisclosureState::Closed => {
                self.state = DisclosureState::Open;
                ListenerChange::Attach
            }
            DisclosureState::Open => {
                self.state = DisclosureState::Closed;
                ListenerChange::Detach
            }
        }
    }

    pub fn escape(&mut self) -> Option<ListenerChange> {
        self.close()
    }

    pub fn navigation_completed(&mut self) -> Option<ListenerChange> {
        self.close()
    }

    fn close(&mut self) -> Option<ListenerChange> {
        match self.state {
            DisclosureState::Open => {
                self.state = DisclosureState::Closed;
                Some(ListenerChange::Detach)
            }
            DisclosureState::Closed => None,
        }
    }
}
